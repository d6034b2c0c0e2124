// crates/tc_physics/tests/column_properties.rs

//! 单点土柱端到端性质

use tc_config::ColumnRunConfig;
use tc_foundation::DepthBand;
use tc_physics::{simulate_column, ColumnSimulation, SoilGeometry};

fn config(passes: u32) -> ColumnRunConfig {
    let mut config = ColumnRunConfig::default();
    config.column.passes = passes;
    config
}

#[test]
fn test_reference_scenario() {
    let outcome = simulate_column(&config(30)).unwrap();
    assert_eq!(outcome.records.len(), 30);

    let first = outcome.records[0];
    let last = outcome.records[29];
    assert!(last.rut_depth_mm > first.rut_depth_mm);
    assert!(last.surface_compaction_index > first.surface_compaction_index);
    assert!(last.cumulative_compaction_energy_kj > 0.0);
    assert!((outcome.load_n - 28_000.0 / 8.0 * 9.81).abs() < 1e-9);
    assert!((outcome.pressure_pa - outcome.load_n / 0.2925).abs() < 1e-6);
}

#[test]
fn test_profiles_monotone_and_bounded() {
    let outcome = simulate_column(&config(40)).unwrap();
    let ceiling = ColumnRunConfig::default().soil.max_compaction_index;
    for pair in outcome.history.windows(2) {
        for (before, after) in pair[0].iter().zip(&pair[1]) {
            assert!(after >= before);
            assert!((0.0..=ceiling).contains(after));
        }
    }
    for pair in outcome.records.windows(2) {
        assert!(pair[1].rut_depth_mm >= pair[0].rut_depth_mm);
        assert!(pair[1].cumulative_compaction_energy_kj >= pair[0].cumulative_compaction_energy_kj);
    }
}

#[test]
fn test_critical_stress_never_decreases() {
    let mut sim = ColumnSimulation::new(&config(10)).unwrap();
    let mut previous = sim.sigma_crit_pa().to_vec();
    for _ in 0..10 {
        sim.step().unwrap();
        for (a, b) in previous.iter().zip(sim.sigma_crit_pa()) {
            assert!(b >= a);
        }
        previous = sim.sigma_crit_pa().to_vec();
    }
}

#[test]
fn test_saturates_below_ceiling() {
    let mut cfg = config(400);
    cfg.soil.compaction_alpha = 0.5;
    let outcome = simulate_column(&cfg).unwrap();
    let surface = outcome.final_compaction[0];
    assert!(surface <= cfg.soil.max_compaction_index);
    assert!(cfg.soil.max_compaction_index - surface < 1e-3);
}

#[test]
fn test_wetter_soil_ruts_deeper() {
    let mut previous = 0.0;
    for moisture in [0.18, 0.23, 0.28, 0.33, 0.38] {
        let mut cfg = config(10);
        cfg.soil.moisture = moisture;
        let rut = simulate_column(&cfg).unwrap().records[9].rut_depth_mm;
        assert!(rut >= previous);
        previous = rut;
    }
}

#[test]
fn test_band_means_match_records() {
    let mut sim = ColumnSimulation::new(&config(2)).unwrap();
    let record = sim.step().unwrap();
    let geometry = tc_physics::ColumnGeometry::new(10.0, 0.1).unwrap();
    let expected = geometry.band_mean(sim.compaction(), DepthBand::TOPSOIL);
    assert_eq!(record.avg_compaction_0_30cm, expected);
}

#[test]
fn test_deterministic() {
    let a = simulate_column(&config(15)).unwrap();
    let b = simulate_column(&config(15)).unwrap();
    assert_eq!(a.records, b.records);
    assert_eq!(a.final_compaction, b.final_compaction);
}

#[test]
fn test_records_serialize() {
    let outcome = simulate_column(&config(2)).unwrap();
    let json = serde_json::to_value(outcome.records[1]).unwrap();
    assert_eq!(json["pass"], 2);
    assert!(json["rut_depth_mm"].as_f64().unwrap() > 0.0);
}
