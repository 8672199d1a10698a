use super::*;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "order_type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPayload {
    MoveFleet { fleet_id: FleetId, to_system_id: SystemId },
}

/// An order as handed to whatever persists or broadcasts moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub player_id: PlayerId,
    pub galaxy_id: GalaxyId,
    /// Tick the order was issued on.
    pub tick: u64,
    #[serde(flatten)]
    pub payload: OrderPayload,
    pub status: OrderStatus,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("fleet not found")]
    FleetNotFound,
    #[error("target system not found")]
    TargetNotFound,
    #[error("order is for {expected}, not {found}")]
    FleetMismatch { expected: FleetId, found: FleetId },
    #[error("order targets {expected}, not {found}")]
    TargetMismatch { expected: SystemId, found: SystemId },
    #[error("{0} is already in transit")]
    InTransit(FleetId),
    #[error("{from} and {to} are not connected by a lane")]
    NotConnected { from: SystemId, to: SystemId },
}

impl Order {
    pub fn move_fleet(player_id: PlayerId, galaxy_id: GalaxyId, tick: u64, fleet_id: FleetId, to_system_id: SystemId) -> Self {
        Self {
            player_id,
            galaxy_id,
            tick,
            payload: OrderPayload::MoveFleet {
                fleet_id,
                to_system_id,
            },
            status: OrderStatus::Pending,
        }
    }

    pub fn from_move(player_id: PlayerId, galaxy_id: GalaxyId, tick: u64, issued: &MoveIssued) -> Self {
        Self::move_fleet(player_id, galaxy_id, tick, issued.fleet, issued.to)
    }

    /// Check a move order against the fleet and target it was resolved to.
    pub fn validate(&self, fleet: Option<&Fleet>, target: Option<&System>, graph: &GalaxyGraph) -> Result<(), OrderError> {
        let fleet = fleet.ok_or(OrderError::FleetNotFound)?;
        let target = target.ok_or(OrderError::TargetNotFound)?;

        let OrderPayload::MoveFleet {
            fleet_id,
            to_system_id,
        } = self.payload;

        if fleet_id != fleet.id {
            return Err(OrderError::FleetMismatch {
                expected: fleet_id,
                found: fleet.id,
            });
        }
        if to_system_id != target.id {
            return Err(OrderError::TargetMismatch {
                expected: to_system_id,
                found: target.id,
            });
        }
        if fleet.is_in_transit() {
            return Err(OrderError::InTransit(fleet.id));
        }
        if !graph.connected(fleet.location(), target.id) {
            return Err(OrderError::NotConnected {
                from: fleet.location(),
                to: target.id,
            });
        }

        Ok(())
    }
}
