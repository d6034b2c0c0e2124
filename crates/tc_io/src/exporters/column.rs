// crates/tc_io/src/exporters/column.rs

//! 单点土柱结果导出
//!
//! | 文件 | 内容 |
//! |------|------|
//! | `pass_series.csv` | 每次通过的记录 |
//! | `final_profile.csv` | 最终剖面与虚拟传感器 |
//! | `profile_snapshots.csv` | 第 1/3/5/10/N 次通过后的压实剖面 |
//! | `metadata.csv` | 运行参数与最终结果 |

use std::path::Path;

use tc_config::ColumnRunConfig;
use tc_physics::types::GRAVITY;
use tc_physics::ColumnOutcome;

use crate::error::IoResult;
use crate::table::{key_value_row, Cell, CsvTable};

use super::ExportSummary;

fn pass_series(outcome: &ColumnOutcome) -> IoResult<CsvTable> {
    let mut table = CsvTable::new(
        "pass_series",
        [
            "pass",
            "rut_depth_mm",
            "rut_increment_mm",
            "surface_compaction_index",
            "avg_compaction_0_30cm",
            "avg_compaction_30_100cm",
            "compaction_resistance_kn",
            "cumulative_compaction_energy_kj",
        ],
    );
    for r in &outcome.records {
        table.push(vec![
            r.pass.into(),
            r.rut_depth_mm.into(),
            r.rut_increment_mm.into(),
            r.surface_compaction_index.into(),
            r.avg_compaction_0_30cm.into(),
            r.avg_compaction_30_100cm.into(),
            r.compaction_resistance_kn.into(),
            r.cumulative_compaction_energy_kj.into(),
        ])?;
    }
    Ok(table)
}

fn final_profile(outcome: &ColumnOutcome) -> IoResult<CsvTable> {
    let mut table = CsvTable::new(
        "final_profile",
        [
            "depth_m",
            "compaction_index",
            "cone_index_mpa",
            "bulk_density_g_cm3",
            "sigma_crit_kpa",
        ],
    );
    for (s, &sc) in outcome.sensors.iter().zip(&outcome.final_sigma_crit_pa) {
        table.push(vec![
            s.depth_m.into(),
            s.compaction_index.into(),
            s.cone_index_mpa.into(),
            s.bulk_density_g_cm3.into(),
            (sc / 1000.0).into(),
        ])?;
    }
    Ok(table)
}

fn snapshots(outcome: &ColumnOutcome) -> IoResult<CsvTable> {
    let snaps = outcome.snapshots();
    let headers = std::iter::once("depth_m".to_string())
        .chain(snaps.iter().map(|(p, _)| format!("pass_{}", p)));
    let mut table = CsvTable::new("profile_snapshots", headers);
    for (iz, &z) in outcome.depths.iter().enumerate() {
        let mut row: Vec<Cell> = Vec::with_capacity(snaps.len() + 1);
        row.push(z.into());
        row.extend(snaps.iter().map(|(_, profile)| Cell::from(profile[iz])));
        table.push(row)?;
    }
    Ok(table)
}

fn metadata(outcome: &ColumnOutcome, config: &ColumnRunConfig) -> IoResult<CsvTable> {
    let last = outcome.last_record();
    key_value_row(
        "metadata",
        vec![
            ("passes", config.column.passes.into()),
            ("depth_m", config.column.depth_m.into()),
            ("dz_m", config.column.dz_m.into()),
            ("mass_kg", config.machine.mass_kg.into()),
            ("wheels", config.machine.wheels.into()),
            ("wheel_load_kg_effective", (outcome.load_n / GRAVITY).into()),
            ("tire_width_m", config.machine.tire_width_m.into()),
            ("contact_length_m", config.machine.contact_length_m.into()),
            ("contact_pressure_kpa", (outcome.pressure_pa / 1000.0).into()),
            ("moisture", config.soil.moisture.into()),
            ("kc", config.soil.kc.into()),
            ("kphi", config.soil.kphi.into()),
            ("n_bekker", config.soil.n_bekker.into()),
            (
                "surface_compaction_final",
                last.map_or(0.0, |r| r.surface_compaction_index).into(),
            ),
            ("rut_depth_final_mm", last.map_or(0.0, |r| r.rut_depth_mm).into()),
            (
                "cumulative_compaction_energy_final_kj",
                last.map_or(0.0, |r| r.cumulative_compaction_energy_kj).into(),
            ),
        ],
    )
}

/// 导出单点土柱结果
pub fn export_column(
    outcome: &ColumnOutcome,
    config: &ColumnRunConfig,
    directory: &Path,
) -> IoResult<ExportSummary> {
    let mut summary = ExportSummary::begin(directory)?;
    summary.table("pass_series.csv", &pass_series(outcome)?)?;
    summary.table("final_profile.csv", &final_profile(outcome)?)?;
    summary.table("profile_snapshots.csv", &snapshots(outcome)?)?;
    summary.table("metadata.csv", &metadata(outcome, config)?)?;
    log::info!("单点土柱结果写入 {}", directory.display());
    Ok(summary)
}
