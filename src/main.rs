use anyhow::Context;
use starmap::dev::{dev_galaxy, DEV_GALAXY_ID, DEV_PLAYER_ID};
use starmap::logger::Logger;
use starmap::*;
use std::sync::Arc;

/// Give up waiting for arrivals after this many frames.
const MAX_FRAMES: u32 = 2000;

fn main() -> anyhow::Result<()> {
    Logger::init(log::LevelFilter::Debug)?;

    let configs = Configs::load_or_default(std::env::args().nth(1))?;

    let dev = dev_galaxy().context("can not build dev galaxy")?;
    log::info!(
        "Dev galaxy: {} systems, {} lanes, connected: {}.",
        dev.graph.len(),
        dev.graph.lanes().len(),
        dev.graph.is_connected()
    );

    // Round trip through the persisted form.
    let buffer = dev.graph.save()?;
    let graph = Arc::new(GalaxyGraph::load(&buffer)?);
    log::debug!("Galaxy snapshot is {} bytes.", buffer.len());

    let (sender, receiver) = crossbeam_channel::unbounded();
    let mut controller = MapController::new(graph.clone(), &configs, SystemClock, FrameQueue::default(), sender);
    controller.resize(1280.0, 720.0);
    controller.center_on(dev.home);
    for fleet in dev.fleets.iter() {
        controller.add_fleet(fleet.clone());
    }

    // Send the first fleet to its furthest neighbor by clicking on it.
    let fleet = dev.fleets.first().context("dev galaxy has no fleet")?.id;
    let target = graph
        .adjacent(dev.home)
        .iter()
        .filter_map(|&id| graph.lane(dev.home, id))
        .max_by(|a, b| a.distance.total_cmp(&b.distance))
        .and_then(|lane| lane.other(dev.home))
        .context("home system has no lane")?;
    let target_position = graph.system(target).context("unknown target")?.position;

    controller.arm_fleet(Some(fleet));
    let click = controller.world_to_screen(target_position);
    controller.pointer_down(click, PointerButton::Primary);
    controller.pointer_up(click, PointerButton::Primary);

    let mut interval = Interval::new(&configs.frame);
    let mut arrived = false;
    for _ in 0..MAX_FRAMES {
        interval.step();
        controller.pump_frames();

        for event in receiver.try_iter() {
            match event {
                MapEvent::ViewportChanged(viewport) => {
                    log::trace!("Camera at {:?}, zoom {:.2}.", viewport.center, viewport.zoom)
                }
                MapEvent::SystemSelected(system) => log::info!("Selected {:?}.", system),
                MapEvent::MoveIssued(issued) => {
                    let order = Order::from_move(DEV_PLAYER_ID, DEV_GALAXY_ID, 0, &issued);
                    log::info!(
                        "{} leaves {} for {}, {}ms: {}",
                        issued.fleet,
                        issued.from,
                        issued.to,
                        issued.arrive_at - issued.depart_at,
                        serde_json::to_string(&order)?
                    );
                }
                MapEvent::FleetArrived { fleet, system } => {
                    log::info!("{} arrived at {}.", fleet, system);
                    arrived = true;
                }
            }
        }

        if arrived {
            break;
        }
    }

    if !arrived {
        log::warn!("No fleet arrived after {} frames.", MAX_FRAMES);
    }

    Ok(())
}
