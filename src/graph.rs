use super::*;
use indexmap::IndexMap;
use smallvec::SmallVec;
use thiserror::Error;

/// Undirected edge between two distinct systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub from: SystemId,
    pub to: SystemId,
    /// Euclidean distance between both endpoints.
    pub distance: f64,
}
impl Lane {
    pub fn key(&self) -> LaneKey {
        LaneKey::new(self.from, self.to)
    }

    /// Return the endpoint that is not `id`, if `id` is one of the endpoints.
    pub fn other(&self, id: SystemId) -> Option<SystemId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("system {0} appears more than once")]
    DuplicateSystem(SystemId),
    #[error("lane {from} <-> {to} references unknown system {missing}")]
    UnknownEndpoint {
        from: SystemId,
        to: SystemId,
        missing: SystemId,
    },
    #[error("lane on {0} loops onto itself")]
    SelfLoop(SystemId),
    #[error("lane {0} <-> {1} is defined more than once")]
    DuplicateLane(SystemId, SystemId),
    #[error("{system} belongs to galaxy {found:?}, not {expected:?}")]
    ForeignSystem {
        system: SystemId,
        expected: GalaxyId,
        found: GalaxyId,
    },
    #[error("galaxy has no system")]
    NoSystems,
    #[error("galaxy generation needs at least one star type")]
    NoStarTypes,
    #[error("invalid {what} range [{min}, {max}]")]
    InvalidRange { what: &'static str, min: u32, max: u32 },
    #[error("galaxy snapshot codec failed")]
    Codec(#[from] postcard::Error),
}

/// Persisted form of a galaxy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxySnapshot {
    pub galaxy_id: GalaxyId,
    pub systems: Vec<System>,
    pub lanes: Vec<Lane>,
}

pub type Neighbors = SmallVec<[SystemId; 6]>;

/// Systems and lanes of one galaxy.
///
/// Built once and validated on construction: every lane joins two distinct
/// systems of this graph and no pair of systems has more than one lane.
#[derive(Debug, Clone)]
pub struct GalaxyGraph {
    galaxy_id: GalaxyId,
    systems: IndexMap<SystemId, System, ahash::RandomState>,
    lanes: Vec<Lane>,
    lane_index: AHashMap<LaneKey, usize>,
    adjacency: AHashMap<SystemId, Neighbors>,
}
impl GalaxyGraph {
    pub fn new(galaxy_id: GalaxyId, systems: Vec<System>, lanes: Vec<Lane>) -> Result<Self, GraphError> {
        let mut by_id: IndexMap<SystemId, System, ahash::RandomState> =
            IndexMap::with_capacity_and_hasher(systems.len(), Default::default());
        for system in systems {
            let id = system.id;
            if system.galaxy_id != galaxy_id {
                return Err(GraphError::ForeignSystem {
                    system: id,
                    expected: galaxy_id,
                    found: system.galaxy_id,
                });
            }
            if by_id.insert(id, system).is_some() {
                return Err(GraphError::DuplicateSystem(id));
            }
        }

        let mut graph = Self {
            galaxy_id,
            adjacency: by_id.keys().map(|&id| (id, Neighbors::new())).collect(),
            systems: by_id,
            lanes: Vec::with_capacity(lanes.len()),
            lane_index: AHashMap::with_capacity(lanes.len()),
        };
        for lane in lanes {
            graph.insert_lane(lane)?;
        }

        Ok(graph)
    }

    pub fn from_snapshot(snapshot: GalaxySnapshot) -> Result<Self, GraphError> {
        Self::new(snapshot.galaxy_id, snapshot.systems, snapshot.lanes)
    }

    pub fn snapshot(&self) -> GalaxySnapshot {
        GalaxySnapshot {
            galaxy_id: self.galaxy_id,
            systems: self.systems.values().cloned().collect(),
            lanes: self.lanes.clone(),
        }
    }

    pub fn save(&self) -> Result<Vec<u8>, GraphError> {
        Ok(postcard::to_stdvec(&self.snapshot())?)
    }

    pub fn load(buffer: &[u8]) -> Result<Self, GraphError> {
        Self::from_snapshot(postcard::from_bytes(buffer)?)
    }

    /// Validate and add a lane.
    pub(crate) fn insert_lane(&mut self, lane: Lane) -> Result<(), GraphError> {
        if lane.from == lane.to {
            return Err(GraphError::SelfLoop(lane.from));
        }
        for endpoint in [lane.from, lane.to] {
            if !self.systems.contains_key(&endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    from: lane.from,
                    to: lane.to,
                    missing: endpoint,
                });
            }
        }
        let key = lane.key();
        if self.lane_index.contains_key(&key) {
            return Err(GraphError::DuplicateLane(key.0, key.1));
        }

        if let Some(neighbors) = self.adjacency.get_mut(&lane.from) {
            neighbors.push(lane.to);
        }
        if let Some(neighbors) = self.adjacency.get_mut(&lane.to) {
            neighbors.push(lane.from);
        }
        self.lane_index.insert(key, self.lanes.len());
        self.lanes.push(lane);

        Ok(())
    }

    pub fn galaxy_id(&self) -> GalaxyId {
        self.galaxy_id
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Systems in generation order.
    pub fn systems(&self) -> impl ExactSizeIterator<Item = &System> {
        self.systems.values()
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn system(&self, id: SystemId) -> Option<&System> {
        self.systems.get(&id)
    }

    pub fn system_at(&self, index: usize) -> Option<&System> {
        self.systems.get_index(index).map(|(_, system)| system)
    }

    pub fn index_of(&self, id: SystemId) -> Option<usize> {
        self.systems.get_index_of(&id)
    }

    /// Systems sharing a lane with `id`. Empty for unknown systems.
    pub fn adjacent(&self, id: SystemId) -> &[SystemId] {
        self.adjacency.get(&id).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// Whether a lane joins `a` and `b`, in either direction.
    pub fn connected(&self, a: SystemId, b: SystemId) -> bool {
        a != b && self.lane_index.contains_key(&LaneKey::new(a, b))
    }

    pub fn lane(&self, a: SystemId, b: SystemId) -> Option<&Lane> {
        self.lane_index
            .get(&LaneKey::new(a, b))
            .and_then(|&index| self.lanes.get(index))
    }

    /// Length of the lane between `a` and `b`.
    pub fn distance(&self, a: SystemId, b: SystemId) -> Option<f64> {
        self.lane(a, b).map(|lane| lane.distance)
    }

    /// Connected components, each listed in system order.
    /// Components are ordered by their first system.
    pub fn components(&self) -> Vec<Vec<SystemId>> {
        let mut sets = UnionFind::new(self.systems.len());
        for lane in self.lanes.iter() {
            if let (Some(a), Some(b)) = (self.index_of(lane.from), self.index_of(lane.to)) {
                sets.union(a, b);
            }
        }

        let mut root_to_component: AHashMap<usize, usize> = AHashMap::new();
        let mut components: Vec<Vec<SystemId>> = Vec::new();
        for (index, &id) in self.systems.keys().enumerate() {
            let root = sets.find(index);
            let component = *root_to_component.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[component].push(id);
        }
        components
    }

    /// An empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }

    /// Nearest system to `point` no further than `radius`.
    pub fn hit_test(&self, point: DVec2, radius: f64) -> Option<&System> {
        let mut nearest = None;
        let mut nearest_distance = f64::INFINITY;
        for system in self.systems.values() {
            let d = distance(point, system.position);
            if d <= radius && d < nearest_distance {
                nearest = Some(system);
                nearest_distance = d;
            }
        }
        nearest
    }

    /// Up to `count` other systems sorted by distance from `id`.
    pub fn nearest_systems(&self, id: SystemId, count: usize) -> Vec<SystemId> {
        let Some(origin) = self.system(id) else {
            return Vec::new();
        };
        let mut others: Vec<(f64, SystemId)> = self
            .systems
            .values()
            .filter(|system| system.id != id)
            .map(|system| (origin.distance(system), system.id))
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0));
        others.into_iter().take(count).map(|(_, id)| id).collect()
    }
}

/// Disjoint sets over system indices.
pub(crate) struct UnionFind {
    parent: Vec<usize>,
}
impl UnionFind {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            // Path halving.
            self.parent[index] = self.parent[self.parent[index]];
            index = self.parent[index];
        }
        index
    }

    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        self.parent[b] = a;
        true
    }
}
