// crates/tc_config/src/soil.rs

//! 土壤参数配置
//!
//! - [`SoilConfig`]: 单点土柱模型参数（Bekker 沉陷 + 前期固结硬化）
//! - [`VolumeSoilConfig`]: 路线三维模型参数（深度衰减 + 临界应力剖面）
//! - [`SoilProfile`]: 临界应力剖面名称

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 单点土柱土壤参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilConfig {
    /// Bekker 黏聚模量 kc [N/m^(n+1)]
    #[serde(default = "default_kc")]
    pub kc: f64,

    /// Bekker 摩擦模量 kphi [N/m^(n+2)]
    #[serde(default = "default_kphi")]
    pub kphi: f64,

    /// Bekker 沉陷指数 n
    #[serde(default = "default_n_bekker")]
    pub n_bekker: f64,

    /// 体积含水率（0-1）
    #[serde(default = "default_moisture")]
    pub moisture: f64,

    /// 参考含水率（0-1）
    #[serde(default = "default_reference_moisture")]
    pub reference_moisture: f64,

    /// 含水率软化增益
    #[serde(default = "default_softening_gain")]
    pub moisture_softening_gain: f64,

    /// 表层压实硬化增益
    #[serde(default = "default_hardening_gain")]
    pub hardening_gain: f64,

    /// 压实增长速率 α
    #[serde(default = "default_column_alpha")]
    pub compaction_alpha: f64,

    /// 应力比指数
    #[serde(default = "default_column_stress_exponent")]
    pub stress_exponent: f64,

    /// 前期固结应力硬化速率
    #[serde(default = "default_precon_hardening")]
    pub precon_hardening: f64,

    /// 压实指数饱和上限（0, 1]
    #[serde(default = "default_max_compaction_index")]
    pub max_compaction_index: f64,
}

fn default_kc() -> f64 { 120_000.0 }
fn default_kphi() -> f64 { 4_500_000.0 }
fn default_n_bekker() -> f64 { 1.1 }
fn default_moisture() -> f64 { 0.28 }
fn default_reference_moisture() -> f64 { 0.23 }
fn default_softening_gain() -> f64 { 1.4 }
fn default_hardening_gain() -> f64 { 2.5 }
fn default_column_alpha() -> f64 { 0.06 }
fn default_column_stress_exponent() -> f64 { 1.15 }
fn default_precon_hardening() -> f64 { 0.08 }
fn default_max_compaction_index() -> f64 { 0.95 }

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            kc: default_kc(),
            kphi: default_kphi(),
            n_bekker: default_n_bekker(),
            moisture: default_moisture(),
            reference_moisture: default_reference_moisture(),
            moisture_softening_gain: default_softening_gain(),
            hardening_gain: default_hardening_gain(),
            compaction_alpha: default_column_alpha(),
            stress_exponent: default_column_stress_exponent(),
            precon_hardening: default_precon_hardening(),
            max_compaction_index: default_max_compaction_index(),
        }
    }
}

impl SoilConfig {
    /// 含水率相对参考值的偏移
    #[inline]
    pub fn moisture_offset(&self) -> f64 {
        self.moisture - self.reference_moisture
    }

    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("soil.kc", self.kc)?;
        ConfigError::require_positive("soil.kphi", self.kphi)?;
        ConfigError::require_positive("soil.n_bekker", self.n_bekker)?;
        ConfigError::require_range("soil.moisture", self.moisture, 0.0, 1.0)?;
        ConfigError::require_range("soil.reference_moisture", self.reference_moisture, 0.0, 1.0)?;
        ConfigError::require_non_negative("soil.moisture_softening_gain", self.moisture_softening_gain)?;
        ConfigError::require_non_negative("soil.hardening_gain", self.hardening_gain)?;
        ConfigError::require_positive("soil.compaction_alpha", self.compaction_alpha)?;
        ConfigError::require_positive("soil.stress_exponent", self.stress_exponent)?;
        ConfigError::require_non_negative("soil.precon_hardening", self.precon_hardening)?;
        validate_ceiling("soil.max_compaction_index", self.max_compaction_index)
    }
}

fn validate_ceiling(key: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "必须在 (0, 1] 范围内"))
    }
}

// ============================================================
// 临界应力剖面
// ============================================================

/// 临界应力（前期固结应力）剖面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SoilProfile {
    /// 随深度线性增加
    Linear,
    /// 砂壤土
    #[default]
    SandyLoam,
    /// 黏性土
    Clayey,
    /// 红土
    Lateritic,
    /// 湿软土
    WetWeak,
    /// 用户自定义分层（`sigma_crit_layers`）
    Custom,
}

impl SoilProfile {
    /// 全部剖面
    pub const ALL: [SoilProfile; 6] = [
        SoilProfile::Linear,
        SoilProfile::SandyLoam,
        SoilProfile::Clayey,
        SoilProfile::Lateritic,
        SoilProfile::WetWeak,
        SoilProfile::Custom,
    ];

    /// 剖面名称
    pub fn name(&self) -> &'static str {
        match self {
            SoilProfile::Linear => "linear",
            SoilProfile::SandyLoam => "sandy_loam",
            SoilProfile::Clayey => "clayey",
            SoilProfile::Lateritic => "lateritic",
            SoilProfile::WetWeak => "wet_weak",
            SoilProfile::Custom => "custom",
        }
    }

    /// 全部合法名称
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for SoilProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoilProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == key)
            .ok_or_else(|| {
                ConfigError::invalid(
                    "soil.soil_profile",
                    s,
                    format!("未知土壤剖面，可选: {:?}", Self::names()),
                )
            })
    }
}

// ============================================================
// 三维路线模型土壤参数
// ============================================================

/// 路线三维模型土壤参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSoilConfig {
    /// 体积含水率（0-1）
    #[serde(default = "default_moisture")]
    pub moisture: f64,

    /// 参考含水率（0-1）
    #[serde(default = "default_reference_moisture")]
    pub reference_moisture: f64,

    /// 压实增长速率 α
    #[serde(default = "default_volume_alpha")]
    pub compaction_alpha: f64,

    /// 应力比指数
    #[serde(default = "default_volume_stress_exponent")]
    pub stress_exponent: f64,

    /// 压实指数饱和上限（0, 1]
    #[serde(default = "default_max_compaction_index")]
    pub max_compaction_index: f64,

    /// 应力随深度指数衰减长度 [m]
    #[serde(default = "default_depth_stress_decay")]
    pub depth_stress_decay_m: f64,

    /// 线性剖面：地表临界应力 [kPa]
    #[serde(default = "default_sigma_crit_surface")]
    pub sigma_crit_surface_kpa: f64,

    /// 线性剖面：临界应力梯度 [kPa/m]
    #[serde(default = "default_sigma_crit_gradient")]
    pub sigma_crit_gradient_kpa_m: f64,

    /// 临界应力剖面
    #[serde(default)]
    pub soil_profile: SoilProfile,

    /// 自定义分层，格式 "z1:kPa1,z2:kPa2,..."
    #[serde(default)]
    pub sigma_crit_layers: String,
}

fn default_volume_alpha() -> f64 { 0.035 }
fn default_volume_stress_exponent() -> f64 { 1.2 }
fn default_depth_stress_decay() -> f64 { 1.05 }
fn default_sigma_crit_surface() -> f64 { 110.0 }
fn default_sigma_crit_gradient() -> f64 { 35.0 }

impl Default for VolumeSoilConfig {
    fn default() -> Self {
        Self {
            moisture: default_moisture(),
            reference_moisture: default_reference_moisture(),
            compaction_alpha: default_volume_alpha(),
            stress_exponent: default_volume_stress_exponent(),
            max_compaction_index: default_max_compaction_index(),
            depth_stress_decay_m: default_depth_stress_decay(),
            sigma_crit_surface_kpa: default_sigma_crit_surface(),
            sigma_crit_gradient_kpa_m: default_sigma_crit_gradient(),
            soil_profile: SoilProfile::default(),
            sigma_crit_layers: String::new(),
        }
    }
}

impl VolumeSoilConfig {
    /// 含水率相对参考值的偏移
    #[inline]
    pub fn moisture_offset(&self) -> f64 {
        self.moisture - self.reference_moisture
    }

    /// 验证标量参数
    ///
    /// 自定义分层字符串的解析在构建临界应力剖面时完成。
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_range("soil.moisture", self.moisture, 0.0, 1.0)?;
        ConfigError::require_range("soil.reference_moisture", self.reference_moisture, 0.0, 1.0)?;
        ConfigError::require_positive("soil.compaction_alpha", self.compaction_alpha)?;
        ConfigError::require_positive("soil.stress_exponent", self.stress_exponent)?;
        validate_ceiling("soil.max_compaction_index", self.max_compaction_index)?;
        ConfigError::require_positive("soil.depth_stress_decay_m", self.depth_stress_decay_m)?;
        if self.soil_profile == SoilProfile::Linear {
            ConfigError::require_positive("soil.sigma_crit_surface_kpa", self.sigma_crit_surface_kpa)?;
            ConfigError::require_non_negative(
                "soil.sigma_crit_gradient_kpa_m",
                self.sigma_crit_gradient_kpa_m,
            )?;
        }
        if self.soil_profile == SoilProfile::Custom && self.sigma_crit_layers.trim().is_empty() {
            return Err(ConfigError::Missing(
                "soil.sigma_crit_layers（custom 剖面必须提供分层）".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_soil_valid() {
        assert!(SoilConfig::default().validate().is_ok());
        assert!(VolumeSoilConfig::default().validate().is_ok());
    }

    #[test]
    fn test_moisture_out_of_range() {
        let soil = SoilConfig {
            moisture: 1.2,
            ..Default::default()
        };
        assert!(soil.validate().is_err());
    }

    #[test]
    fn test_ceiling_bounds() {
        let mut soil = SoilConfig::default();
        soil.max_compaction_index = 1.0;
        assert!(soil.validate().is_ok());
        soil.max_compaction_index = 0.0;
        assert!(soil.validate().is_err());
        soil.max_compaction_index = 1.01;
        assert!(soil.validate().is_err());
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("sandy_loam".parse::<SoilProfile>().unwrap(), SoilProfile::SandyLoam);
        assert_eq!(" Wet_Weak ".parse::<SoilProfile>().unwrap(), SoilProfile::WetWeak);
        let err = "peat".parse::<SoilProfile>().unwrap_err();
        assert!(err.to_string().contains("clayey"));
    }

    #[test]
    fn test_profile_serde_names() {
        let json = serde_json::to_string(&SoilProfile::Lateritic).unwrap();
        assert_eq!(json, "\"lateritic\"");
        assert!(serde_json::from_str::<SoilProfile>("\"loess\"").is_err());
    }

    #[test]
    fn test_custom_profile_requires_layers() {
        let soil = VolumeSoilConfig {
            soil_profile: SoilProfile::Custom,
            ..Default::default()
        };
        assert!(matches!(soil.validate(), Err(ConfigError::Missing(_))));
    }
}
