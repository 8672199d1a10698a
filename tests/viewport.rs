use approx::assert_abs_diff_eq;
use rand::prelude::*;
use starmap::*;

fn random_viewport(rng: &mut impl Rng, configs: &ViewportConfigs) -> (Viewport, DVec2) {
    let viewport = Viewport::new(
        DVec2::new(rng.gen_range(-5000.0..5000.0), rng.gen_range(-5000.0..5000.0)),
        rng.gen_range(configs.min_zoom..=configs.max_zoom),
    );
    let screen_size = DVec2::new(rng.gen_range(1.0..4000.0), rng.gen_range(1.0..4000.0));
    (viewport, screen_size)
}

#[test]
fn test_screen_world_round_trip() {
    let mut rng = thread_rng();
    let configs = ViewportConfigs::default();

    for _ in 0..10_000 {
        let (viewport, screen_size) = random_viewport(&mut rng, &configs);
        let screen = DVec2::new(rng.gen_range(-100.0..4100.0), rng.gen_range(-100.0..4100.0));

        let world = viewport.screen_to_world(screen, screen_size);
        let back = viewport.world_to_screen(world, screen_size);
        assert_abs_diff_eq!(back.x, screen.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, screen.y, epsilon = 1e-6);

        let world = DVec2::new(rng.gen_range(0.0..2000.0), rng.gen_range(0.0..2000.0));
        let screen = viewport.world_to_screen(world, screen_size);
        let back = viewport.screen_to_world(screen, screen_size);
        assert_abs_diff_eq!(back.x, world.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, world.y, epsilon = 1e-6);
    }
}

#[test]
fn test_transform() {
    let viewport = Viewport::new(DVec2::new(100.0, 50.0), 2.0);
    let screen_size = DVec2::new(800.0, 600.0);

    // The camera center is drawn in the middle of the screen.
    assert_eq!(viewport.world_to_screen(DVec2::new(100.0, 50.0), screen_size), DVec2::new(400.0, 300.0));
    assert_eq!(viewport.world_to_screen(DVec2::new(110.0, 40.0), screen_size), DVec2::new(420.0, 280.0));
    assert_eq!(viewport.screen_to_world(DVec2::ZERO, screen_size), DVec2::new(-100.0, -100.0));
}

#[test]
fn test_zoom_clamp() {
    let configs = ViewportConfigs::default();
    let mut viewport = Viewport::default();

    viewport.set_zoom(10.0, &configs);
    assert_eq!(viewport.zoom, configs.max_zoom);
    viewport.set_zoom(0.0, &configs);
    assert_eq!(viewport.zoom, configs.min_zoom);
    viewport.set_zoom(f64::NAN, &configs);
    assert_eq!(viewport.zoom, configs.min_zoom);
    viewport.set_zoom(1.5, &configs);
    assert_eq!(viewport.zoom, 1.5);
}

#[test]
fn test_pan_by_screen() {
    let mut viewport = Viewport::new(DVec2::new(10.0, 10.0), 2.0);
    let world_delta = viewport.pan_by_screen(DVec2::new(20.0, -8.0));
    assert_eq!(world_delta, DVec2::new(10.0, -4.0));
    assert_eq!(viewport.center, DVec2::new(0.0, 14.0));
}

#[test]
fn test_travel_time() {
    let configs = TransitConfigs::default();
    assert_eq!(configs.travel_ms(0.0), 1500);
    assert_eq!(configs.travel_ms(100.0), 1500);
    assert_eq!(configs.travel_ms(400.0), 3200);
    assert_eq!(configs.travel_ms(750.0), 6000);
    assert_eq!(configs.travel_ms(1000.0), 6000);
}

#[test]
fn test_configs_json() {
    let configs: Configs = serde_json::from_str(r#"{ "viewport": { "max_zoom": 4.0 }, "transit": { "max_travel_ms": 9000 } }"#).unwrap();
    assert_eq!(configs.viewport.max_zoom, 4.0);
    assert_eq!(configs.viewport.min_zoom, 0.3);
    assert_eq!(configs.transit.max_travel_ms, 9000);
    assert_eq!(configs.generation.system_count, 20);
    assert_eq!(configs.generation.star_types, StarType::ALL.to_vec());

    let path = std::env::temp_dir().join(format!("starmap-configs-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&configs).unwrap()).unwrap();
    let loaded = Configs::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.transit.max_travel_ms, 9000);

    assert!(Configs::load(std::env::temp_dir().join("starmap-missing-configs.json")).is_err());
    assert_eq!(Configs::load_or_default(None::<&str>).unwrap().frame.interval, 16);
}
