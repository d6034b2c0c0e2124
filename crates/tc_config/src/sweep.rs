// crates/tc_config/src/sweep.rs

//! 单变量敏感性（OVAT）扫描配置
//!
//! 以基准土柱配置为中心，每次只改变一个变量。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::column::ColumnRunConfig;
use crate::error::ConfigError;
use crate::output::OutputConfig;
use crate::persist::{read_json, write_json};

/// OVAT 扫描配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// 基准工况
    #[serde(default)]
    pub baseline: ColumnRunConfig,

    /// 通过次数取值
    #[serde(default = "default_pass_values")]
    pub pass_values: Vec<u32>,

    /// 整机质量取值 [kg]
    #[serde(default = "default_mass_values")]
    pub mass_values_kg: Vec<f64>,

    /// 含水率取值
    #[serde(default = "default_moisture_values")]
    pub moisture_values: Vec<f64>,

    /// 单调性检查容差
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// 输出配置
    #[serde(default = "default_sweep_output")]
    pub output: OutputConfig,
}

fn default_pass_values() -> Vec<u32> { vec![5, 10, 20, 30, 40, 60] }
fn default_mass_values() -> Vec<f64> { vec![18_000.0, 24_000.0, 28_000.0, 34_000.0, 42_000.0] }
fn default_moisture_values() -> Vec<f64> { vec![0.18, 0.23, 0.28, 0.33, 0.38] }
fn default_tolerance() -> f64 { 1e-9 }
fn default_sweep_output() -> OutputConfig { OutputConfig::in_directory("outputs/sweep") }

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            baseline: ColumnRunConfig::default(),
            pass_values: default_pass_values(),
            mass_values_kg: default_mass_values(),
            moisture_values: default_moisture_values(),
            tolerance: default_tolerance(),
            output: default_sweep_output(),
        }
    }
}

impl SweepConfig {
    /// 从文件加载配置（加载后立即验证）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: SweepConfig = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        write_json(self, path.as_ref())
    }

    /// 验证配置有效性
    ///
    /// 每个扫描值都代入基准工况后整体验证，保证所有工况在运行前合法。
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.baseline.validate()?;
        ConfigError::require_non_negative("sweep.tolerance", self.tolerance)?;
        if self.pass_values.is_empty() {
            return Err(ConfigError::Missing("sweep.pass_values".to_string()));
        }
        if self.mass_values_kg.is_empty() {
            return Err(ConfigError::Missing("sweep.mass_values_kg".to_string()));
        }
        if self.moisture_values.is_empty() {
            return Err(ConfigError::Missing("sweep.moisture_values".to_string()));
        }
        for &passes in &self.pass_values {
            let mut case = self.baseline.clone();
            case.column.passes = passes;
            case.validate()?;
        }
        for &mass in &self.mass_values_kg {
            let mut case = self.baseline.clone();
            case.machine.mass_kg = mass;
            case.validate()?;
        }
        for &moisture in &self.moisture_values {
            let mut case = self.baseline.clone();
            case.soil.moisture = moisture;
            case.validate()?;
        }
        self.output.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = SweepConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pass_values.len(), 6);
        assert_eq!(config.mass_values_kg.len(), 5);
    }

    #[test]
    fn test_invalid_sweep_value() {
        let mut config = SweepConfig::default();
        config.moisture_values.push(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_sweep_rejected() {
        let mut config = SweepConfig::default();
        config.pass_values.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));
    }
}
