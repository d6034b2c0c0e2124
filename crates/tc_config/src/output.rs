// crates/tc_config/src/output.rs

//! 输出配置

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// 是否导出交互式 HTML 三维视图（仅路线模型）
    #[serde(default = "default_interactive_html")]
    pub interactive_html: bool,

    /// 体积采样的压实指数阈值（仅路线模型）
    #[serde(default = "default_volume_threshold")]
    pub volume_threshold: f64,

    /// HTML 视图中最多的采样点数
    #[serde(default = "default_max_html_points")]
    pub max_html_points: usize,
}

fn default_output_dir() -> PathBuf { PathBuf::from("outputs") }
fn default_interactive_html() -> bool { true }
fn default_volume_threshold() -> f64 { 0.45 }
fn default_max_html_points() -> usize { 45_000 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            interactive_html: default_interactive_html(),
            volume_threshold: default_volume_threshold(),
            max_html_points: default_max_html_points(),
        }
    }
}

impl OutputConfig {
    /// 指定输出目录的默认配置
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::Missing("output.directory".to_string()));
        }
        ConfigError::require_range("output.volume_threshold", self.volume_threshold, 0.0, 1.0)?;
        if self.max_html_points == 0 {
            return Err(ConfigError::invalid("output.max_html_points", 0, "必须大于 0"));
        }
        Ok(())
    }
}
