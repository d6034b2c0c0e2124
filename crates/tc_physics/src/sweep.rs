// crates/tc_physics/src/sweep.rs

//! 单变量敏感性矩阵（OVAT）
//!
//! 以基准配置为中心，每次只改变一个变量（通过次数 / 整机质量 / 含水率），
//! 检查最终车辙与表层压实指数是否随该变量单调不减。
//! 各工况相互独立，使用 rayon 并行运行，结果保持输入顺序。

use rayon::prelude::*;
use serde::Serialize;
use tc_config::{ColumnRunConfig, SweepConfig};
use tc_foundation::TcError;

use crate::drivers::column::simulate_column;
use crate::error::PhysicsResult;

/// 扫描变量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    /// 通过次数
    Passes,
    /// 整机质量 [kg]
    MassKg,
    /// 含水率
    Moisture,
}

impl SweepVariable {
    /// 变量名（输出列名）
    pub fn name(&self) -> &'static str {
        match self {
            SweepVariable::Passes => "passes",
            SweepVariable::MassKg => "mass_kg",
            SweepVariable::Moisture => "moisture",
        }
    }

    /// 把取值写入配置副本
    pub fn apply(&self, baseline: &ColumnRunConfig, value: f64) -> ColumnRunConfig {
        let mut config = baseline.clone();
        match self {
            SweepVariable::Passes => config.column.passes = value.round().max(0.0) as u32,
            SweepVariable::MassKg => config.machine.mass_kg = value,
            SweepVariable::Moisture => config.soil.moisture = value,
        }
        config
    }
}

/// 单个工况的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepCase {
    /// 通过次数
    pub passes: u32,
    /// 整机质量 [kg]
    pub mass_kg: f64,
    /// 含水率
    pub moisture: f64,
    /// 最终车辙 [mm]
    pub rut_final_mm: f64,
    /// 最终表层压实指数
    pub surface_compaction_final: f64,
    /// 最终 0–30 cm 平均压实指数
    pub avg_compaction_0_30cm_final: f64,
    /// 最终 30–100 cm 平均压实指数
    pub avg_compaction_30_100cm_final: f64,
    /// 最终累计压实功 [kJ]
    pub energy_final_kj: f64,
}

/// 运行单个工况
pub fn run_case(config: &ColumnRunConfig) -> PhysicsResult<SweepCase> {
    let outcome = simulate_column(config)?;
    let last = outcome
        .last_record()
        .copied()
        .ok_or_else(|| TcError::invalid_input("工况没有任何通过记录"))?;
    Ok(SweepCase {
        passes: config.column.passes,
        mass_kg: config.machine.mass_kg,
        moisture: config.soil.moisture,
        rut_final_mm: last.rut_depth_mm,
        surface_compaction_final: last.surface_compaction_index,
        avg_compaction_0_30cm_final: last.avg_compaction_0_30cm,
        avg_compaction_30_100cm_final: last.avg_compaction_30_100cm,
        energy_final_kj: last.cumulative_compaction_energy_kj,
    })
}

/// 对一个变量的所有取值运行工况
pub fn build_sweep(
    baseline: &ColumnRunConfig,
    variable: SweepVariable,
    values: &[f64],
) -> PhysicsResult<Vec<SweepCase>> {
    values
        .par_iter()
        .map(|&v| run_case(&variable.apply(baseline, v)))
        .collect()
}

/// 序列是否单调不减（允许 `tol` 的回落）
pub fn monotonic_non_decreasing(values: &[f64], tol: f64) -> bool {
    values.windows(2).all(|w| w[1] - w[0] >= -tol)
}

/// 一项趋势检查
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateCheck {
    /// 检查描述
    pub check: String,
    /// 是否通过
    pub passed: bool,
}

/// 单变量扫描结果
#[derive(Debug, Clone, Serialize)]
pub struct VariableSweep {
    /// 扫描变量
    pub variable: SweepVariable,
    /// 各工况
    pub cases: Vec<SweepCase>,
}

impl VariableSweep {
    fn checks(&self, tol: f64) -> [GateCheck; 2] {
        let rut: Vec<f64> = self.cases.iter().map(|c| c.rut_final_mm).collect();
        let surface: Vec<f64> = self.cases.iter().map(|c| c.surface_compaction_final).collect();
        let name = self.variable.name();
        [
            GateCheck {
                check: format!("rut_final_mm non-decreasing in {}", name),
                passed: monotonic_non_decreasing(&rut, tol),
            },
            GateCheck {
                check: format!("surface_compaction_final non-decreasing in {}", name),
                passed: monotonic_non_decreasing(&surface, tol),
            },
        ]
    }
}

/// 敏感性矩阵完整结果
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// 基准工况
    pub baseline: SweepCase,
    /// 三个变量的扫描
    pub sweeps: Vec<VariableSweep>,
    /// 趋势检查
    pub checks: Vec<GateCheck>,
}

impl SweepReport {
    /// 全部检查是否通过
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// 按变量取扫描结果
    pub fn sweep(&self, variable: SweepVariable) -> Option<&VariableSweep> {
        self.sweeps.iter().find(|s| s.variable == variable)
    }
}

/// 运行完整敏感性矩阵
pub fn run_sweep(config: &SweepConfig) -> PhysicsResult<SweepReport> {
    config.validate()?;
    let baseline = run_case(&config.baseline)?;

    let plan: [(SweepVariable, Vec<f64>); 3] = [
        (
            SweepVariable::Passes,
            config.pass_values.iter().map(|&p| f64::from(p)).collect(),
        ),
        (SweepVariable::MassKg, config.mass_values_kg.clone()),
        (SweepVariable::Moisture, config.moisture_values.clone()),
    ];

    let mut sweeps = Vec::with_capacity(plan.len());
    let mut checks = Vec::with_capacity(2 * plan.len());
    for (variable, values) in plan {
        let sweep = VariableSweep {
            variable,
            cases: build_sweep(&config.baseline, variable, &values)?,
        };
        checks.extend(sweep.checks(config.tolerance));
        sweeps.push(sweep);
    }

    for check in &checks {
        if check.passed {
            log::info!("PASS: {}", check.check);
        } else {
            log::warn!("FAIL: {}", check.check);
        }
    }

    Ok(SweepReport {
        baseline,
        sweeps,
        checks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic() {
        assert!(monotonic_non_decreasing(&[], 1e-9));
        assert!(monotonic_non_decreasing(&[1.0], 1e-9));
        assert!(monotonic_non_decreasing(&[1.0, 1.0, 2.0], 1e-9));
        assert!(monotonic_non_decreasing(&[1.0, 1.0 - 1e-12], 1e-9));
        assert!(!monotonic_non_decreasing(&[1.0, 0.9], 1e-9));
    }

    #[test]
    fn test_apply_variable() {
        let base = ColumnRunConfig::default();
        assert_eq!(SweepVariable::Passes.apply(&base, 12.0).column.passes, 12);
        assert_eq!(SweepVariable::MassKg.apply(&base, 18_000.0).machine.mass_kg, 18_000.0);
        assert_eq!(SweepVariable::Moisture.apply(&base, 0.33).soil.moisture, 0.33);
    }

    #[test]
    fn test_build_sweep_keeps_order() {
        let mut base = ColumnRunConfig::default();
        base.column.depth_m = 2.0;
        let cases = build_sweep(&base, SweepVariable::Passes, &[10.0, 2.0, 5.0]).unwrap();
        let passes: Vec<u32> = cases.iter().map(|c| c.passes).collect();
        assert_eq!(passes, vec![10, 2, 5]);
    }
}
