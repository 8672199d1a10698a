use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transit {
    pub from: SystemId,
    pub to: SystemId,
    pub depart_at: u64,
    pub arrive_at: u64,
}
impl Transit {
    pub fn duration(&self) -> u64 {
        self.arrive_at.saturating_sub(self.depart_at)
    }

    pub fn has_arrived(&self, now: u64) -> bool {
        now >= self.arrive_at
    }

    /// Fraction of the trip done at `now`, in `[0, 1]`.
    pub fn progress(&self, now: u64) -> f64 {
        let duration = self.duration();
        if duration == 0 || now >= self.arrive_at {
            return 1.0;
        }
        now.saturating_sub(self.depart_at) as f64 / duration as f64
    }
}

/// A fleet is either parked at a system or travelling along a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FleetState {
    Idle { location: SystemId },
    InTransit(Transit),
}

/// Emitted when a fleet leaves for another system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIssued {
    pub fleet: FleetId,
    pub from: SystemId,
    pub to: SystemId,
    pub depart_at: u64,
    pub arrive_at: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub owner: PlayerId,
    pub strength: u32,
    pub state: FleetState,
}
impl Fleet {
    pub fn new(id: FleetId, owner: PlayerId, strength: u32, home: SystemId) -> Self {
        Self {
            id,
            owner,
            strength,
            state: FleetState::Idle { location: home },
        }
    }

    /// Where the fleet is considered to be.
    /// A fleet in transit is still at its origin until it arrives.
    pub fn location(&self) -> SystemId {
        match self.state {
            FleetState::Idle { location } => location,
            FleetState::InTransit(transit) => transit.from,
        }
    }

    pub fn transit(&self) -> Option<&Transit> {
        match &self.state {
            FleetState::Idle { .. } => None,
            FleetState::InTransit(transit) => Some(transit),
        }
    }

    pub fn is_in_transit(&self) -> bool {
        self.transit().is_some()
    }

    /// Systems this fleet can be sent to right now.
    pub fn move_targets<'a>(&self, graph: &'a GalaxyGraph) -> &'a [SystemId] {
        match self.state {
            FleetState::Idle { location } => graph.adjacent(location),
            FleetState::InTransit(_) => &[],
        }
    }

    /// Start moving to `to`.
    ///
    /// Only an idle fleet can move and only along a lane.
    /// Return `None` and leave the fleet untouched otherwise.
    pub fn depart(
        &mut self,
        to: SystemId,
        graph: &GalaxyGraph,
        configs: &TransitConfigs,
        now: u64,
    ) -> Option<MoveIssued> {
        let FleetState::Idle { location: from } = self.state else {
            return None;
        };
        let distance = graph.distance(from, to)?;

        let transit = Transit {
            from,
            to,
            depart_at: now,
            arrive_at: now + configs.travel_ms(distance),
        };
        self.state = FleetState::InTransit(transit);

        Some(MoveIssued {
            fleet: self.id,
            from,
            to,
            depart_at: transit.depart_at,
            arrive_at: transit.arrive_at,
        })
    }

    /// Complete the trip if `now` reached the arrival time.
    /// Return the system the fleet arrived at.
    pub fn arrive_if_due(&mut self, now: u64) -> Option<SystemId> {
        let FleetState::InTransit(transit) = self.state else {
            return None;
        };
        if !transit.has_arrived(now) {
            return None;
        }
        self.state = FleetState::Idle { location: transit.to };
        Some(transit.to)
    }

    /// World position for drawing, interpolated along the lane while in transit.
    pub fn position(&self, graph: &GalaxyGraph, now: u64) -> Option<DVec2> {
        match self.state {
            FleetState::Idle { location } => graph.system(location).map(|system| system.position),
            FleetState::InTransit(transit) => {
                let from = graph.system(transit.from)?.position;
                let to = graph.system(transit.to)?.position;
                Some(from.lerp(to, transit.progress(now)))
            }
        }
    }
}
