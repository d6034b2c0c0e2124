// crates/tc_io/src/exporters/volume.rs

//! 路线三维结果导出
//!
//! | 文件 | 内容 |
//! |------|------|
//! | `pass_summary.csv` | 每次通过的汇总 |
//! | `sigma_crit_profile.csv` | 临界应力表（线性为逐深度，分层为逐层） |
//! | `route_centerline.csv` 等 | 重采样中心线与左右轮迹 |
//! | `surface_load_map.csv` | 归一化地表荷载图 |
//! | `peak_cross_section.csv` | 过表层最大压实点的横断面 |
//! | `metadata.csv` | 运行参数与最终结果 |
//! | `volume_3d.html` | 交互式点云（可选） |

use std::path::Path;

use tc_config::VolumeRunConfig;
use tc_physics::types::GRAVITY;
use tc_physics::{CriticalStressTable, Point2, VolumeOutcome};

use crate::error::IoResult;
use crate::html::write_volume_html;
use crate::table::{key_value_row, CsvTable};

use super::ExportSummary;

fn pass_summary(outcome: &VolumeOutcome) -> IoResult<CsvTable> {
    let mut table = CsvTable::new(
        "pass_summary",
        [
            "pass",
            "max_compaction_index",
            "mean_compaction_0_30cm",
            "mean_compaction_30_100cm",
        ],
    );
    for r in &outcome.records {
        table.push(vec![
            r.pass.into(),
            r.max_compaction_index.into(),
            r.mean_compaction_0_30cm.into(),
            r.mean_compaction_30_100cm.into(),
        ])?;
    }
    Ok(table)
}

fn sigma_crit_table(outcome: &VolumeOutcome) -> IoResult<CsvTable> {
    let source = outcome.sigma_crit_table.source_name();
    match &outcome.sigma_crit_table {
        CriticalStressTable::PerDepth { rows } => {
            let mut table =
                CsvTable::new("sigma_crit", ["depth_m", "sigma_crit_kpa", "source_profile"]);
            for &(z, kpa) in rows {
                table.push(vec![z.into(), kpa.into(), source.into()])?;
            }
            Ok(table)
        }
        CriticalStressTable::Layers { layers, .. } => {
            let mut table = CsvTable::new(
                "sigma_crit",
                ["layer_upper_depth_m", "sigma_crit_kpa", "source_profile"],
            );
            for layer in layers {
                table.push(vec![
                    layer.upper_depth_m.into(),
                    layer.sigma_crit_kpa.into(),
                    source.into(),
                ])?;
            }
            Ok(table)
        }
    }
}

fn polyline(name: &str, points: &[Point2]) -> IoResult<CsvTable> {
    let mut table = CsvTable::new(name, ["x_m", "y_m"]);
    for p in points {
        table.push(vec![p[0].into(), p[1].into()])?;
    }
    Ok(table)
}

fn load_map(outcome: &VolumeOutcome) -> IoResult<CsvTable> {
    let grid = &outcome.grid;
    let map = &outcome.load_map;
    let mut table = CsvTable::new("surface_load_map", ["x_m", "y_m", "relative_load"]);
    for (iy, &y) in grid.y.iter().enumerate() {
        for (ix, &x) in grid.x.iter().enumerate() {
            table.push(vec![x.into(), y.into(), map.get(iy, ix).into()])?;
        }
    }
    Ok(table)
}

fn cross_section(outcome: &VolumeOutcome) -> IoResult<CsvTable> {
    let grid = &outcome.grid;
    let (ix, section) = outcome.peak_cross_section();
    let x = grid.x.get(ix).copied().unwrap_or(0.0);
    let mut table = CsvTable::new("peak_cross_section", ["x_m", "y_m", "depth_m", "compaction_index"]);
    let ny = grid.y.len();
    for (iz, &z) in grid.z.iter().enumerate() {
        for (iy, &y) in grid.y.iter().enumerate() {
            table.push(vec![x.into(), y.into(), z.into(), section[iz * ny + iy].into()])?;
        }
    }
    Ok(table)
}

fn metadata(outcome: &VolumeOutcome, config: &VolumeRunConfig) -> IoResult<CsvTable> {
    let last = outcome.last_record();
    let route = &config.route;
    let csv = route
        .csv_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    key_value_row(
        "metadata",
        vec![
            ("passes", config.traffic.passes.into()),
            ("depth_m", config.domain.depth_m.into()),
            ("mass_kg", config.machine.mass_kg.into()),
            ("wheels", config.machine.wheels.into()),
            ("wheel_load_kg", (outcome.load_n / GRAVITY).into()),
            ("tire_width_m", config.machine.tire_width_m.into()),
            ("contact_length_m", config.machine.contact_length_m.into()),
            ("track_gauge_m", config.traffic.track_gauge_m.into()),
            ("contact_pressure_kpa", (outcome.pressure_pa / 1000.0).into()),
            ("moisture", config.soil.moisture.into()),
            ("soil_profile", config.soil.soil_profile.name().into()),
            ("sigma_crit_surface_kpa", config.soil.sigma_crit_surface_kpa.into()),
            ("sigma_crit_gradient_kpa_m", config.soil.sigma_crit_gradient_kpa_m.into()),
            ("sigma_crit_layers", config.soil.sigma_crit_layers.as_str().into()),
            ("route_mode", route.mode.name().into()),
            ("route_csv", csv.into()),
            ("route_sine_amplitude_m", route.sine_amplitude_m.into()),
            ("route_sine_wavelength_m", route.sine_wavelength_m.into()),
            ("max_compaction_final", last.map_or(0.0, |r| r.max_compaction_index).into()),
            ("mean_compaction_0_30cm_final", last.map_or(0.0, |r| r.mean_compaction_0_30cm).into()),
            (
                "mean_compaction_30_100cm_final",
                last.map_or(0.0, |r| r.mean_compaction_30_100cm).into(),
            ),
        ],
    )
}

/// 导出路线三维结果
pub fn export_volume(
    outcome: &VolumeOutcome,
    config: &VolumeRunConfig,
    directory: &Path,
) -> IoResult<ExportSummary> {
    let mut summary = ExportSummary::begin(directory)?;
    summary.table("pass_summary.csv", &pass_summary(outcome)?)?;
    summary.table("sigma_crit_profile.csv", &sigma_crit_table(outcome)?)?;
    summary.table("route_centerline.csv", &polyline("centerline", &outcome.route.centerline)?)?;
    summary.table("route_left_track.csv", &polyline("left_track", &outcome.route.left_track)?)?;
    summary.table("route_right_track.csv", &polyline("right_track", &outcome.route.right_track)?)?;
    summary.table("surface_load_map.csv", &load_map(outcome)?)?;
    summary.table("peak_cross_section.csv", &cross_section(outcome)?)?;
    summary.table("metadata.csv", &metadata(outcome, config)?)?;

    let output = &config.output;
    if output.interactive_html {
        let points = outcome.sample_points(output.volume_threshold, output.max_html_points);
        let path = summary.path("volume_3d.html");
        let title = format!(
            "Compacted volume after {} passes ({})",
            config.traffic.passes,
            config.soil.soil_profile
        );
        write_volume_html(&path, &points, &outcome.route, &title)?;
        summary.files.push(path);
    }
    log::info!("路线三维结果写入 {}", directory.display());
    Ok(summary)
}
