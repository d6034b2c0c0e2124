// crates/tc_config/src/volume.rs

//! 路线三维体积模拟配置
//!
//! - [`DomainConfig`]: 计算域尺寸与网格步长
//! - [`TrafficConfig`]: 通过次数、轮距与路线重采样步长
//! - [`RouteConfig`]: 路线中心线来源（直线 / 正弦 / CSV）
//! - [`VolumeRunConfig`]: 完整运行配置

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::machine::{validate_wheel_load, MachineConfig};
use crate::output::OutputConfig;
use crate::persist::{read_json, write_json};
use crate::soil::VolumeSoilConfig;

/// 计算域配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// 直线/正弦路线长度 [m]
    #[serde(default = "default_route_length_m")]
    pub route_length_m: f64,

    /// 路线两侧计算域总宽度 [m]
    #[serde(default = "default_domain_width_m")]
    pub domain_width_m: f64,

    /// 计算深度 [m]
    #[serde(default = "default_depth_m")]
    pub depth_m: f64,

    /// 沿路线方向网格步长 [m]
    #[serde(default = "default_dx_m")]
    pub dx_m: f64,

    /// 横向网格步长 [m]
    #[serde(default = "default_dy_m")]
    pub dy_m: f64,

    /// 垂向分层厚度 [m]
    #[serde(default = "default_dz_m")]
    pub dz_m: f64,
}

fn default_route_length_m() -> f64 { 80.0 }
fn default_domain_width_m() -> f64 { 8.0 }
fn default_depth_m() -> f64 { 5.0 }
fn default_dx_m() -> f64 { 1.0 }
fn default_dy_m() -> f64 { 0.25 }
fn default_dz_m() -> f64 { 0.20 }

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            route_length_m: default_route_length_m(),
            domain_width_m: default_domain_width_m(),
            depth_m: default_depth_m(),
            dx_m: default_dx_m(),
            dy_m: default_dy_m(),
            dz_m: default_dz_m(),
        }
    }
}

impl DomainConfig {
    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("domain.route_length_m", self.route_length_m)?;
        ConfigError::require_positive("domain.domain_width_m", self.domain_width_m)?;
        ConfigError::require_positive("domain.depth_m", self.depth_m)?;
        ConfigError::require_cell_fits("domain.dx_m", self.dx_m, self.route_length_m)?;
        ConfigError::require_cell_fits("domain.dy_m", self.dy_m, self.domain_width_m)?;
        ConfigError::require_cell_fits("domain.dz_m", self.dz_m, self.depth_m)
    }
}

/// 交通配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficConfig {
    /// 通过次数
    #[serde(default = "default_passes")]
    pub passes: u32,

    /// 左右轮迹间距（轮距）[m]
    #[serde(default = "default_track_gauge_m")]
    pub track_gauge_m: f64,

    /// 路线重采样步长 [m]
    #[serde(default = "default_step_along_route_m")]
    pub step_along_route_m: f64,
}

fn default_passes() -> u32 { 30 }
fn default_track_gauge_m() -> f64 { 2.2 }
fn default_step_along_route_m() -> f64 { 0.5 }

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            passes: default_passes(),
            track_gauge_m: default_track_gauge_m(),
            step_along_route_m: default_step_along_route_m(),
        }
    }
}

impl TrafficConfig {
    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.passes < 1 {
            return Err(ConfigError::invalid("traffic.passes", self.passes, "至少 1 次通过"));
        }
        ConfigError::require_positive("traffic.track_gauge_m", self.track_gauge_m)?;
        ConfigError::require_positive("traffic.step_along_route_m", self.step_along_route_m)
    }
}

/// 路线中心线来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// 沿 x 轴的直线
    #[default]
    Straight,
    /// 正弦曲线
    Sine,
    /// 从 CSV 表读取的折线
    Csv,
}

impl RouteMode {
    /// 模式名称
    pub fn name(&self) -> &'static str {
        match self {
            RouteMode::Straight => "straight",
            RouteMode::Sine => "sine",
            RouteMode::Csv => "csv",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RouteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(RouteMode::Straight),
            "sine" => Ok(RouteMode::Sine),
            "csv" => Ok(RouteMode::Csv),
            _ => Err(ConfigError::invalid(
                "route.mode",
                s,
                "可选: straight, sine, csv",
            )),
        }
    }
}

/// 路线配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// 路线来源
    #[serde(default)]
    pub mode: RouteMode,

    /// CSV 路线文件
    #[serde(default)]
    pub csv_path: Option<PathBuf>,

    /// CSV x 列名
    #[serde(default = "default_csv_x_col")]
    pub csv_x_col: String,

    /// CSV y 列名
    #[serde(default = "default_csv_y_col")]
    pub csv_y_col: String,

    /// 正弦振幅 [m]
    #[serde(default = "default_sine_amplitude_m")]
    pub sine_amplitude_m: f64,

    /// 正弦波长 [m]
    #[serde(default = "default_sine_wavelength_m")]
    pub sine_wavelength_m: f64,

    /// 横向偏移 [m]
    #[serde(default)]
    pub y_offset_m: f64,
}

fn default_csv_x_col() -> String { "x_m".to_string() }
fn default_csv_y_col() -> String { "y_m".to_string() }
fn default_sine_amplitude_m() -> f64 { 1.2 }
fn default_sine_wavelength_m() -> f64 { 30.0 }

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            mode: RouteMode::default(),
            csv_path: None,
            csv_x_col: default_csv_x_col(),
            csv_y_col: default_csv_y_col(),
            sine_amplitude_m: default_sine_amplitude_m(),
            sine_wavelength_m: default_sine_wavelength_m(),
            y_offset_m: 0.0,
        }
    }
}

impl RouteConfig {
    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.y_offset_m.is_finite() {
            return Err(ConfigError::invalid("route.y_offset_m", self.y_offset_m, "必须为有限值"));
        }
        match self.mode {
            RouteMode::Straight => Ok(()),
            RouteMode::Sine => {
                if !self.sine_amplitude_m.is_finite() {
                    return Err(ConfigError::invalid(
                        "route.sine_amplitude_m",
                        self.sine_amplitude_m,
                        "必须为有限值",
                    ));
                }
                ConfigError::require_positive("route.sine_wavelength_m", self.sine_wavelength_m)
            }
            RouteMode::Csv => {
                if self.csv_path.is_none() {
                    return Err(ConfigError::Missing("route.csv_path（csv 模式必须提供）".to_string()));
                }
                if self.csv_x_col.trim().is_empty() || self.csv_y_col.trim().is_empty() {
                    return Err(ConfigError::Missing("route.csv_x_col / route.csv_y_col".to_string()));
                }
                Ok(())
            }
        }
    }
}

/// 路线三维完整运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRunConfig {
    /// 计算域
    #[serde(default)]
    pub domain: DomainConfig,

    /// 交通
    #[serde(default)]
    pub traffic: TrafficConfig,

    /// 路线
    #[serde(default)]
    pub route: RouteConfig,

    /// 土壤
    #[serde(default)]
    pub soil: VolumeSoilConfig,

    /// 机械
    #[serde(default)]
    pub machine: MachineConfig,

    /// 单轮载荷覆盖值 [kg]
    #[serde(default)]
    pub wheel_load_kg: Option<f64>,

    /// 输出
    #[serde(default = "default_volume_output")]
    pub output: OutputConfig,
}

fn default_volume_output() -> OutputConfig {
    OutputConfig::in_directory("outputs/route_3d")
}

impl Default for VolumeRunConfig {
    fn default() -> Self {
        Self {
            domain: DomainConfig::default(),
            traffic: TrafficConfig::default(),
            route: RouteConfig::default(),
            soil: VolumeSoilConfig::default(),
            machine: MachineConfig::default(),
            wheel_load_kg: None,
            output: default_volume_output(),
        }
    }
}

impl VolumeRunConfig {
    /// 从文件加载配置（加载后立即验证）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: VolumeRunConfig = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        write_json(self, path.as_ref())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.domain.validate()?;
        self.traffic.validate()?;
        self.route.validate()?;
        self.soil.validate()?;
        self.machine.validate()?;
        validate_wheel_load(self.wheel_load_kg)?;
        self.output.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::SoilProfile;

    #[test]
    fn test_default_config() {
        let config = VolumeRunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.soil.soil_profile, SoilProfile::SandyLoam);
        assert_eq!(config.route.mode, RouteMode::Straight);
    }

    #[test]
    fn test_cell_exceeds_extent() {
        let mut config = VolumeRunConfig::default();
        config.domain.dy_m = 10.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("domain.dy_m"));
    }

    #[test]
    fn test_csv_mode_requires_path() {
        let mut config = VolumeRunConfig::default();
        config.route.mode = RouteMode::Csv;
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));
        config.route.csv_path = Some(PathBuf::from("route.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_route_mode_parse() {
        assert_eq!("SINE".parse::<RouteMode>().unwrap(), RouteMode::Sine);
        assert!("spline".parse::<RouteMode>().is_err());
    }

    #[test]
    fn test_unknown_profile_in_json_rejected() {
        let json = r#"{ "soil": { "soil_profile": "peat" } }"#;
        assert!(serde_json::from_str::<VolumeRunConfig>(json).is_err());
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut config = VolumeRunConfig::default();
        config.soil.soil_profile = SoilProfile::Custom;
        config.soil.sigma_crit_layers = "0.30:100,1.00:150".to_string();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: VolumeRunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
