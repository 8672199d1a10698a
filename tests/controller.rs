use approx::assert_relative_eq;
use crossbeam_channel::Receiver;
use rand::prelude::*;
use starmap::*;
use std::sync::Arc;

type Controller = MapController<ManualClock, FrameQueue>;

fn system(id: u32, x: f64, y: f64) -> System {
    System {
        id: SystemId(id),
        galaxy_id: GalaxyId(1),
        name: format!("S{}", id),
        position: DVec2::new(x, y),
        star_type: StarType::RedDwarf,
        planet_count: 1,
        yields: Yields::default(),
    }
}

/// 1 -(400)- 2 -(1000)- 3, and 4 with no lane.
fn line_graph() -> Arc<GalaxyGraph> {
    let graph = GalaxyGraph::new(
        GalaxyId(1),
        vec![
            system(1, 0.0, 0.0),
            system(2, 400.0, 0.0),
            system(3, 1400.0, 0.0),
            system(4, 0.0, 1000.0),
        ],
        vec![
            Lane {
                from: SystemId(1),
                to: SystemId(2),
                distance: 400.0,
            },
            Lane {
                from: SystemId(2),
                to: SystemId(3),
                distance: 1000.0,
            },
        ],
    )
    .unwrap();
    Arc::new(graph)
}

/// Screen is 800x600 with world origin in the middle at zoom 1.
fn setup() -> (Controller, ManualClock, Receiver<MapEvent>) {
    let clock = ManualClock::new(0);
    let (sender, receiver) = crossbeam_channel::unbounded();
    let mut controller = MapController::new(line_graph(), &Configs::default(), clock.clone(), FrameQueue::default(), sender);
    controller.resize(800.0, 600.0);
    controller.set_viewport(Viewport::new(DVec2::ZERO, 1.0));
    controller.add_fleet(Fleet::new(FleetId(1), PlayerId(1), 10, SystemId(1)));
    receiver.try_iter().count();
    (controller, clock, receiver)
}

fn selections(receiver: &Receiver<MapEvent>) -> Vec<Option<SystemId>> {
    receiver
        .try_iter()
        .filter_map(|event| match event {
            MapEvent::SystemSelected(system) => Some(system),
            _ => None,
        })
        .collect()
}

fn click(controller: &mut Controller, position: DVec2) {
    controller.pointer_down(position, PointerButton::Primary);
    controller.pointer_up(position, PointerButton::Primary);
}

/// Drag 50px to the right over 10ms.
fn fling(controller: &mut Controller, clock: &ManualClock) {
    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Primary);
    clock.advance(10);
    controller.pointer_move(DVec2::new(450.0, 300.0));
    controller.pointer_up(DVec2::new(450.0, 300.0), PointerButton::Primary);
}

#[test]
fn test_click_selects_nearest_system() {
    let (mut controller, _, receiver) = setup();

    click(&mut controller, DVec2::new(403.0, 302.0));
    assert_eq!(selections(&receiver), vec![Some(SystemId(1))]);
    assert_eq!(controller.selected_system().map(|s| s.id), Some(SystemId(1)));
    assert!(!controller.is_coasting());
    assert!(controller.frames().is_empty());

    click(&mut controller, DVec2::new(600.0, 100.0));
    assert_eq!(selections(&receiver), vec![None]);
    assert!(controller.selected_system().is_none());
}

#[test]
fn test_click_uses_camera_transform() {
    let (mut controller, _, receiver) = setup();
    controller.set_viewport(Viewport::new(DVec2::new(400.0, 0.0), 2.0));

    // System 2 is at the camera center, system 1 is 800px to the left.
    click(&mut controller, DVec2::new(405.0, 300.0));
    click(&mut controller, DVec2::new(-395.0, 300.0));
    // 10px on screen is 5 world units at zoom 2.
    click(&mut controller, DVec2::new(400.0, 330.0));
    click(&mut controller, DVec2::new(400.0, 331.0));
    assert_eq!(
        selections(&receiver),
        vec![Some(SystemId(2)), Some(SystemId(1)), Some(SystemId(2)), None]
    );
}

#[test]
fn test_small_drag_is_a_click() {
    let (mut controller, clock, receiver) = setup();

    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Primary);
    clock.advance(5);
    controller.pointer_move(DVec2::new(402.0, 301.0));
    clock.advance(5);
    controller.pointer_move(DVec2::new(403.0, 303.0));
    controller.pointer_up(DVec2::new(403.0, 303.0), PointerButton::Primary);

    // The camera followed the pointer, so the release point is still on system 1.
    assert_eq!(controller.viewport().center, DVec2::new(-3.0, -3.0));
    assert_eq!(selections(&receiver), vec![Some(SystemId(1))]);
    assert!(!controller.is_coasting());
    assert!(controller.frames().is_empty());
}

#[test]
fn test_drag_pans_and_coasts() {
    let (mut controller, clock, receiver) = setup();

    fling(&mut controller, &clock);

    assert_eq!(controller.viewport().center, DVec2::new(-50.0, 0.0));
    assert!(selections(&receiver).is_empty());
    assert!(controller.is_coasting());
    assert_eq!(controller.velocity(), DVec2::new(-5.0, 0.0));
    assert_eq!(controller.frames().len(), 1);

    clock.advance(16);
    controller.pump_frames();
    assert_relative_eq!(controller.viewport().center.x, -130.0);
    assert_relative_eq!(controller.velocity().x, -4.6);
    assert_eq!(controller.frames().len(), 1);

    let mut frames = 0;
    while controller.is_coasting() {
        clock.advance(16);
        controller.pump_frames();
        frames += 1;
        assert!(frames < 1000, "inertia never stopped");
    }
    assert!(controller.velocity().length() < ViewportConfigs::default().inertia_min_speed);
    assert!(controller.frames().is_empty());

    // Coasting only goes further in the drag direction.
    let stopped = controller.viewport().center;
    assert!(stopped.x < -130.0);
    assert_eq!(stopped.y, 0.0);
    clock.advance(16);
    controller.pump_frames();
    assert_eq!(controller.viewport().center, stopped);
}

#[test]
fn test_new_drag_cancels_inertia() {
    let (mut controller, clock, _) = setup();

    fling(&mut controller, &clock);
    let stale = controller.frames().pending()[0];

    controller.pointer_down(DVec2::new(100.0, 100.0), PointerButton::Primary);
    assert!(!controller.is_coasting());
    assert!(controller.frames().is_empty());
    assert_eq!(controller.velocity(), DVec2::ZERO);

    // A revoked frame that fires anyway does nothing.
    let center = controller.viewport().center;
    clock.advance(16);
    controller.on_frame(stale);
    assert_eq!(controller.viewport().center, center);
    assert!(!controller.is_coasting());
}

#[test]
fn test_wheel_cancels_inertia() {
    let (mut controller, clock, _) = setup();

    fling(&mut controller, &clock);
    assert!(controller.is_coasting());
    controller.wheel(0.0);
    assert!(!controller.is_coasting());
    assert!(controller.frames().is_empty());
    assert_eq!(controller.viewport().zoom, 1.0);

    fling(&mut controller, &clock);
    controller.wheel(120.0);
    assert!(!controller.is_coasting());
    assert_relative_eq!(controller.viewport().zoom, 0.9);
}

#[test]
fn test_wheel_zoom_is_clamped() {
    let (mut controller, _, receiver) = setup();
    let configs = ViewportConfigs::default();

    controller.wheel(-1.0);
    assert_relative_eq!(controller.viewport().zoom, 1.1);

    for _ in 0..100 {
        controller.wheel(1.0);
    }
    assert_eq!(controller.viewport().zoom, configs.min_zoom);

    for _ in 0..100 {
        controller.wheel(-1.0);
    }
    assert_eq!(controller.viewport().zoom, configs.max_zoom);

    let mut rng = thread_rng();
    for _ in 0..10_000 {
        controller.wheel(rng.gen_range(-3.0..3.0));
        let zoom = controller.viewport().zoom;
        assert!(configs.min_zoom <= zoom && zoom <= configs.max_zoom);
    }

    assert!(receiver
        .try_iter()
        .all(|event| matches!(event, MapEvent::ViewportChanged(_))));
}

#[test]
fn test_pointer_edge_cases() {
    let (mut controller, clock, receiver) = setup();

    // Only the primary button drags.
    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Secondary);
    controller.pointer_move(DVec2::new(500.0, 300.0));
    assert!(!controller.is_dragging());
    assert_eq!(controller.viewport().center, DVec2::ZERO);

    // Release without press.
    controller.pointer_up(DVec2::new(400.0, 300.0), PointerButton::Primary);
    assert!(selections(&receiver).is_empty());

    // Leaving ends the drag silently.
    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Primary);
    clock.advance(10);
    controller.pointer_move(DVec2::new(480.0, 300.0));
    controller.pointer_leave();
    controller.pointer_up(DVec2::new(480.0, 300.0), PointerButton::Primary);
    assert!(!controller.is_dragging());
    assert!(!controller.is_coasting());
    assert!(selections(&receiver).is_empty());

    // Moves in the same ms still give a finite velocity.
    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Primary);
    controller.pointer_move(DVec2::new(410.0, 300.0));
    assert_eq!(controller.velocity(), DVec2::new(-10.0, 0.0));
}

#[test]
fn test_center_on() {
    let (mut controller, _, _) = setup();
    controller.set_viewport(Viewport::new(DVec2::new(5.0, 5.0), 1.7));

    controller.center_on(SystemId(3));
    assert_eq!(controller.viewport(), Viewport::new(DVec2::new(1400.0, 0.0), 1.0));
    assert_eq!(controller.world_to_screen(DVec2::new(1400.0, 0.0)), DVec2::new(400.0, 300.0));

    controller.center_on(SystemId(99));
    assert_eq!(controller.viewport().center, DVec2::new(1400.0, 0.0));

    controller.set_viewport(Viewport::new(DVec2::ZERO, 50.0));
    assert_eq!(controller.viewport().zoom, 2.0);
}

#[test]
fn test_drag_threshold_boundary() {
    let (mut controller, clock, receiver) = setup();

    // Exactly on the threshold is still a click.
    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Primary);
    clock.advance(5);
    controller.pointer_move(DVec2::new(405.0, 300.0));
    controller.pointer_up(DVec2::new(405.0, 300.0), PointerButton::Primary);
    assert_eq!(selections(&receiver), vec![Some(SystemId(1))]);
    assert!(!controller.is_coasting());
    assert!(controller.frames().is_empty());

    // Just past it pans and coasts.
    let (mut controller, clock, receiver) = setup();
    controller.pointer_down(DVec2::new(400.0, 300.0), PointerButton::Primary);
    clock.advance(5);
    controller.pointer_move(DVec2::new(405.1, 300.0));
    controller.pointer_up(DVec2::new(405.1, 300.0), PointerButton::Primary);
    assert!(selections(&receiver).is_empty());
    assert!(controller.is_coasting());
    assert_eq!(controller.frames().len(), 1);
    assert_relative_eq!(controller.velocity().x, -1.02, epsilon = 1e-9);
    assert_eq!(controller.velocity().y, 0.0);
}
