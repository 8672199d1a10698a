//! Fixed galaxy used for local development and as a test fixture.

use super::*;

pub const DEV_SEED: u32 = 1337;
pub const DEV_GALAXY_ID: GalaxyId = GalaxyId(0);
pub const DEV_PLAYER_ID: PlayerId = PlayerId(1);
pub const DEV_FLEET_ID: FleetId = FleetId(1);
pub const DEV_FLEET_STRENGTH: u32 = 10;
/// Home system included.
pub const DEV_OWNED_SYSTEMS: usize = 5;
pub const DEV_MIN_OWNED_PLANETS: u32 = 2;

pub struct DevGalaxy {
    pub graph: GalaxyGraph,
    pub home: SystemId,
    /// Systems owned by the dev player, home first.
    pub owned: Vec<SystemId>,
    pub fleets: Vec<Fleet>,
}

pub fn dev_galaxy() -> Result<DevGalaxy, GraphError> {
    dev_galaxy_with(&GenerationConfigs::default())
}

/// Dev galaxy layout on top of custom generation configs. Needs at least one system.
pub fn dev_galaxy_with(configs: &GenerationConfigs) -> Result<DevGalaxy, GraphError> {
    let mut systems = GenerationParameters::new(DEV_SEED).generate_systems(DEV_GALAXY_ID, configs)?;

    let Some(home) = systems.first() else {
        return Err(GraphError::NoSystems);
    };
    let home_id = home.id;
    let home_position = home.position;

    // Home plus its nearest systems.
    let mut by_distance: Vec<(f64, SystemId)> = systems
        .iter()
        .skip(1)
        .map(|system| (distance(home_position, system.position), system.id))
        .collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
    let owned: Vec<SystemId> = std::iter::once(home_id)
        .chain(by_distance.into_iter().map(|(_, id)| id))
        .take(DEV_OWNED_SYSTEMS)
        .collect();

    for system in systems.iter_mut().filter(|system| owned.contains(&system.id)) {
        system.planet_count = system.planet_count.max(DEV_MIN_OWNED_PLANETS);
    }

    let graph = build_graph(DEV_GALAXY_ID, systems, configs)?;

    Ok(DevGalaxy {
        graph,
        home: home_id,
        owned,
        fleets: vec![Fleet::new(DEV_FLEET_ID, DEV_PLAYER_ID, DEV_FLEET_STRENGTH, home_id)],
    })
}
