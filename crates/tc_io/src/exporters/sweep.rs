// crates/tc_io/src/exporters/sweep.rs

//! 敏感性矩阵导出
//!
//! `baseline.csv`、`sweep_passes.csv`、`sweep_mass.csv`、
//! `sweep_moisture.csv` 与 `gate_checks.csv`。

use std::path::Path;

use tc_physics::{SweepCase, SweepReport, SweepVariable};

use crate::error::IoResult;
use crate::table::CsvTable;

use super::ExportSummary;

const CASE_HEADERS: [&str; 8] = [
    "passes",
    "mass_kg",
    "moisture",
    "rut_final_mm",
    "surface_compaction_final",
    "avg_compaction_0_30cm_final",
    "avg_compaction_30_100cm_final",
    "energy_final_kj",
];

fn cases_table(name: &str, cases: &[SweepCase]) -> IoResult<CsvTable> {
    let mut table = CsvTable::new(name, CASE_HEADERS);
    for c in cases {
        table.push(vec![
            c.passes.into(),
            c.mass_kg.into(),
            c.moisture.into(),
            c.rut_final_mm.into(),
            c.surface_compaction_final.into(),
            c.avg_compaction_0_30cm_final.into(),
            c.avg_compaction_30_100cm_final.into(),
            c.energy_final_kj.into(),
        ])?;
    }
    Ok(table)
}

fn file_name(variable: SweepVariable) -> &'static str {
    match variable {
        SweepVariable::Passes => "sweep_passes.csv",
        SweepVariable::MassKg => "sweep_mass.csv",
        SweepVariable::Moisture => "sweep_moisture.csv",
    }
}

/// 导出敏感性矩阵
pub fn export_sweep(report: &SweepReport, directory: &Path) -> IoResult<ExportSummary> {
    let mut summary = ExportSummary::begin(directory)?;
    summary.table(
        "baseline.csv",
        &cases_table("baseline", std::slice::from_ref(&report.baseline))?,
    )?;
    for sweep in &report.sweeps {
        summary.table(
            file_name(sweep.variable),
            &cases_table(sweep.variable.name(), &sweep.cases)?,
        )?;
    }

    let mut checks = CsvTable::new("gate_checks", ["check", "result"]);
    for c in &report.checks {
        checks.push(vec![c.check.as_str().into(), c.passed.into()])?;
    }
    summary.table("gate_checks.csv", &checks)?;
    log::info!("敏感性矩阵结果写入 {}", directory.display());
    Ok(summary)
}
