// crates/tc_physics/tests/volume_properties.rs

//! 路线三维端到端性质

use tc_config::{DomainConfig, RouteConfig, RouteMode, SoilProfile, TrafficConfig, VolumeRunConfig};
use tc_physics::critical::{layered_lookup, parse_layer_spec};
use tc_physics::route::{polyline_length, resample_polyline};
use tc_physics::{simulate_volume, RouteSource, SoilGeometry, VolumeSimulation};

fn small_config(passes: u32) -> VolumeRunConfig {
    VolumeRunConfig {
        domain: DomainConfig {
            route_length_m: 10.0,
            domain_width_m: 6.0,
            depth_m: 2.0,
            dx_m: 0.5,
            dy_m: 0.25,
            dz_m: 0.2,
        },
        traffic: TrafficConfig {
            passes,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn source(config: &VolumeRunConfig) -> RouteSource {
    RouteSource::from_config(&config.route, &config.domain, None).unwrap()
}

#[test]
fn test_cells_monotone_and_bounded() {
    let config = small_config(6);
    let mut sim = VolumeSimulation::new(&config, &source(&config)).unwrap();
    let ceiling = config.soil.max_compaction_index;
    let mut previous = sim.compaction().to_vec();
    while !sim.is_finished() {
        sim.step().unwrap();
        for (before, after) in previous.iter().zip(sim.compaction()) {
            assert!(after >= before);
            assert!((0.0..=ceiling).contains(after));
        }
        previous = sim.compaction().to_vec();
    }
}

#[test]
fn test_peak_lies_under_a_wheel_track() {
    let config = small_config(10);
    let outcome = simulate_volume(&config, &source(&config)).unwrap();
    let (peak_cell, _) = outcome
        .compaction
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &c)| if c > best.1 { (i, c) } else { best });
    let (iz, iy, _) = outcome.grid.unravel(peak_cell);
    assert_eq!(iz, 0);
    let y = outcome.grid.y[iy];
    assert!((y.abs() - 1.1).abs() <= 0.25, "peak at y = {}", y);
}

#[test]
fn test_wetter_soil_compacts_more() {
    let mut dry = small_config(5);
    dry.soil.moisture = 0.23;
    let mut wet = small_config(5);
    wet.soil.moisture = 0.33;
    let a = simulate_volume(&dry, &source(&dry)).unwrap();
    let b = simulate_volume(&wet, &source(&wet)).unwrap();
    for (x, y) in a.compaction.iter().zip(&b.compaction) {
        assert!(y >= x);
    }
}

#[test]
fn test_layered_profile_lookup() {
    let layers = parse_layer_spec("0.30:100,1.00:150,2.00:210", 5.0).unwrap();
    assert_eq!(layered_lookup(&layers, 0.15), 100.0);
    assert_eq!(layered_lookup(&layers, 0.30), 100.0);
    assert_eq!(layered_lookup(&layers, 0.31), 150.0);
    assert_eq!(layered_lookup(&layers, 10.0), 210.0);

    let mut config = small_config(1);
    config.soil.soil_profile = SoilProfile::Custom;
    config.soil.sigma_crit_layers = "0.30:100,1.00:150,2.00:210".to_string();
    let outcome = simulate_volume(&config, &source(&config)).unwrap();
    // 深度层 0.1, 0.3, 0.5, ...
    assert!((outcome.sigma_crit_pa[0] - 100_000.0).abs() < 1e-6);
    assert!((outcome.sigma_crit_pa[2] - 150_000.0).abs() < 1e-6);
}

#[test]
fn test_resampled_route_length() {
    let pts = resample_polyline(&[[0.0, 0.0], [3.0, 4.0], [3.0, 10.0]], 0.7).unwrap();
    assert_eq!(pts.len(), (11.0f64 / 0.7).ceil() as usize + 1);
    assert!((polyline_length(&pts) - 11.0).abs() < 0.2);
    assert_eq!(pts[pts.len() - 1], [3.0, 10.0]);
}

#[test]
fn test_sine_route_widens_grid() {
    let mut config = small_config(1);
    config.route = RouteConfig {
        mode: RouteMode::Sine,
        sine_amplitude_m: 1.2,
        sine_wavelength_m: 10.0,
        ..Default::default()
    };
    let straight = VolumeSimulation::new(&small_config(1), &source(&small_config(1))).unwrap();
    let sine = VolumeSimulation::new(&config, &source(&config)).unwrap();
    assert!(sine.grid().y.len() > straight.grid().y.len());
    assert_eq!(sine.grid().z.len(), straight.grid().z.len());
}

#[test]
fn test_polyline_source() {
    let config = small_config(2);
    let polyline = vec![[0.0, 0.0], [4.0, 1.0], [8.0, 0.0]];
    let source = RouteSource::Polyline(polyline);
    let outcome = simulate_volume(&config, &source).unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.route.left_track.len(), outcome.route.centerline.len());
}

#[test]
fn test_deterministic() {
    let config = small_config(3);
    let a = simulate_volume(&config, &source(&config)).unwrap();
    let b = simulate_volume(&config, &source(&config)).unwrap();
    assert_eq!(a.compaction, b.compaction);
    assert_eq!(a.records, b.records);
    assert_eq!(a.grid.n_cells(), a.compaction.len());
}
