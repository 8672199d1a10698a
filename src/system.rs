use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarType {
    RedDwarf,
    Yellow,
    BlueGiant,
    WhiteDwarf,
}
impl StarType {
    pub const ALL: [StarType; 4] = [
        StarType::RedDwarf,
        StarType::Yellow,
        StarType::BlueGiant,
        StarType::WhiteDwarf,
    ];
}

/// Base resource output of a system per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Yields {
    pub energy: u32,
    pub minerals: u32,
    pub science: u32,
}

/// A node of the galaxy graph. Never modified once the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    pub galaxy_id: GalaxyId,
    pub name: String,
    /// World space position.
    pub position: DVec2,
    pub star_type: StarType,
    pub planet_count: u32,
    pub yields: Yields,
}
impl System {
    pub fn distance(&self, other: &System) -> f64 {
        distance(self.position, other.position)
    }
}

/// Euclidean distance, computed as `sqrt(dx² + dy²)` so that generated lane
/// lengths stay bit for bit stable.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
