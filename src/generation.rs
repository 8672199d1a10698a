use super::*;
use indexmap::IndexMap;

pub struct GenerationParameters {
    pub seed: u32,
    rng: SeededRng,
}
impl GenerationParameters {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SeededRng::new(seed),
        }
    }

    /// Pick a seed at random. It is logged so the galaxy can be generated again.
    pub fn random() -> Self {
        let seed = rand::random();
        log::debug!("Generating galaxy with random seed {}.", seed);
        Self::new(seed)
    }

    /// Generate a complete galaxy graph.
    pub fn generate(&mut self, galaxy_id: GalaxyId, configs: &GenerationConfigs) -> Result<GalaxyGraph, GraphError> {
        let systems = self.generate_systems(galaxy_id, configs)?;
        build_graph(galaxy_id, systems, configs)
    }

    /// Place systems and roll their attributes. Lanes are not created.
    pub fn generate_systems(
        &mut self,
        galaxy_id: GalaxyId,
        configs: &GenerationConfigs,
    ) -> Result<Vec<System>, GraphError> {
        if configs.star_types.is_empty() {
            return Err(GraphError::NoStarTypes);
        }
        for (what, (min, max)) in [
            ("planet count", configs.planet_count),
            ("energy", configs.energy),
            ("minerals", configs.minerals),
            ("science", configs.science),
        ] {
            if min > max {
                return Err(GraphError::InvalidRange { what, min, max });
            }
        }

        let rng = &mut self.rng;
        let mut systems = Vec::with_capacity(configs.system_count as usize);
        for number in 1..=configs.system_count {
            // Draw order is part of the galaxy format.
            let x = rng.float(0.0, configs.width);
            let y = rng.float(0.0, configs.height);
            let star_type = rng
                .choice(&configs.star_types)
                .copied()
                .ok_or(GraphError::NoStarTypes)?;
            let planet_count = rng.range(configs.planet_count.0, configs.planet_count.1);
            let yields = Yields {
                energy: rng.range(configs.energy.0, configs.energy.1),
                minerals: rng.range(configs.minerals.0, configs.minerals.1),
                science: rng.range(configs.science.0, configs.science.1),
            };

            systems.push(System {
                id: SystemId(number),
                galaxy_id,
                name: format!("System {}", number),
                position: DVec2::new(x, y),
                star_type,
                planet_count,
                yields,
            });
        }

        Ok(systems)
    }
}

/// Link systems to their nearest neighbors and freeze them into a graph.
pub fn build_graph(
    galaxy_id: GalaxyId,
    systems: Vec<System>,
    configs: &GenerationConfigs,
) -> Result<GalaxyGraph, GraphError> {
    let lanes = nearest_neighbor_lanes(&systems, configs.neighbor_count);
    let mut graph = GalaxyGraph::new(galaxy_id, systems, lanes)?;

    if configs.repair_connectivity {
        repair_connectivity(&mut graph)?;
    }

    log::debug!(
        "Generated galaxy {:?}: {} systems, {} lanes, {} components.",
        galaxy_id,
        graph.len(),
        graph.lanes().len(),
        graph.components().len()
    );

    Ok(graph)
}

/// Each system links to its `neighbor_count` nearest systems.
/// A pair is only linked once, whichever side picked the other first.
pub fn nearest_neighbor_lanes(systems: &[System], neighbor_count: usize) -> Vec<Lane> {
    let mut lanes: IndexMap<LaneKey, Lane, ahash::RandomState> = IndexMap::default();

    for system in systems.iter() {
        let mut neighbors: Vec<(f64, &System)> = systems
            .iter()
            .filter(|other| other.id != system.id)
            .map(|other| (system.distance(other), other))
            .collect();
        // Stable, so equal distances keep system order.
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (distance, neighbor) in neighbors.into_iter().take(neighbor_count) {
            lanes.entry(LaneKey::new(system.id, neighbor.id)).or_insert(Lane {
                from: system.id,
                to: neighbor.id,
                distance,
            });
        }
    }

    lanes.into_values().collect()
}

/// Add the shortest lane leaving the first system's component until the graph
/// is a single component. Return how many lanes were added.
pub fn repair_connectivity(graph: &mut GalaxyGraph) -> Result<usize, GraphError> {
    let mut added = 0;
    loop {
        let components = graph.components();
        let Some(main) = components.first() else {
            return Ok(added);
        };
        if components.len() == 1 {
            return Ok(added);
        }

        let in_main: AHashSet<SystemId> = main.iter().copied().collect();
        let mut best: Option<(f64, SystemId, SystemId)> = None;
        for from in main.iter().filter_map(|&id| graph.system(id)) {
            for to in graph.systems().filter(|system| !in_main.contains(&system.id)) {
                let d = from.distance(to);
                if best.map_or(true, |(best_distance, _, _)| d < best_distance) {
                    best = Some((d, from.id, to.id));
                }
            }
        }

        let Some((distance, from, to)) = best else {
            return Ok(added);
        };
        log::debug!("Bridging {} -> {} ({:.1} units).", from, to, distance);
        graph.insert_lane(Lane { from, to, distance })?;
        added += 1;
    }
}
