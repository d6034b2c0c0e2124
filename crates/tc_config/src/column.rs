// crates/tc_config/src/column.rs

//! 单点土柱模拟配置

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::machine::{validate_wheel_load, MachineConfig};
use crate::output::OutputConfig;
use crate::persist::{read_json, write_json};
use crate::soil::SoilConfig;

/// 土柱离散与通过次数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// 通过次数
    #[serde(default = "default_passes")]
    pub passes: u32,

    /// 土柱总深度 [m]
    #[serde(default = "default_depth_m")]
    pub depth_m: f64,

    /// 分层厚度 [m]
    #[serde(default = "default_dz_m")]
    pub dz_m: f64,
}

fn default_passes() -> u32 { 30 }
fn default_depth_m() -> f64 { 10.0 }
fn default_dz_m() -> f64 { 0.1 }

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            passes: default_passes(),
            depth_m: default_depth_m(),
            dz_m: default_dz_m(),
        }
    }
}

impl ColumnConfig {
    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.passes < 1 {
            return Err(ConfigError::invalid("column.passes", self.passes, "至少 1 次通过"));
        }
        ConfigError::require_positive("column.depth_m", self.depth_m)?;
        ConfigError::require_cell_fits("column.dz_m", self.dz_m, self.depth_m)
    }
}

/// 单点土柱完整运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRunConfig {
    /// 土柱离散
    #[serde(default)]
    pub column: ColumnConfig,

    /// 土壤参数
    #[serde(default)]
    pub soil: SoilConfig,

    /// 机械参数
    #[serde(default)]
    pub machine: MachineConfig,

    /// 单轮载荷覆盖值 [kg]（为空时按整机质量均分）
    #[serde(default)]
    pub wheel_load_kg: Option<f64>,

    /// 输出配置
    #[serde(default = "default_column_output")]
    pub output: OutputConfig,
}

fn default_column_output() -> OutputConfig {
    OutputConfig::in_directory("outputs/column")
}

impl Default for ColumnRunConfig {
    fn default() -> Self {
        Self {
            column: ColumnConfig::default(),
            soil: SoilConfig::default(),
            machine: MachineConfig::default(),
            wheel_load_kg: None,
            output: default_column_output(),
        }
    }
}

impl ColumnRunConfig {
    /// 从文件加载配置（加载后立即验证）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: ColumnRunConfig = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        write_json(self, path.as_ref())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.column.validate()?;
        self.soil.validate()?;
        self.machine.validate()?;
        validate_wheel_load(self.wheel_load_kg)?;
        self.output.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ColumnRunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.column.passes, 30);
    }

    #[test]
    fn test_dz_larger_than_depth() {
        let mut config = ColumnRunConfig::default();
        config.column.depth_m = 0.5;
        config.column.dz_m = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_passes() {
        let mut config = ColumnRunConfig::default();
        config.column.passes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "column": { "passes": 12 }, "soil": { "moisture": 0.33 } }"#;
        let config: ColumnRunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.column.passes, 12);
        assert_eq!(config.column.depth_m, 10.0);
        assert_eq!(config.soil.moisture, 0.33);
        assert_eq!(config.soil.kc, 120_000.0);
        assert_eq!(config.output.directory, Path::new("outputs/column"));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("column.json");
        let mut config = ColumnRunConfig::default();
        config.wheel_load_kg = Some(3_200.0);
        config.save_to_file(&path).unwrap();

        let loaded = ColumnRunConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = ColumnRunConfig::from_file("/nonexistent/column.json").unwrap_err();
        assert!(matches!(err, ConfigError::Foundation(_)));
    }
}
