// crates/tc_config/src/machine.rs

//! 机械参数配置

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 行走机械参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// 整机质量 [kg]
    #[serde(default = "default_mass_kg")]
    pub mass_kg: f64,

    /// 车轮数量
    #[serde(default = "default_wheels")]
    pub wheels: u32,

    /// 轮胎有效宽度 [m]
    #[serde(default = "default_tire_width_m")]
    pub tire_width_m: f64,

    /// 轮胎-土壤有效接地长度 [m]
    #[serde(default = "default_contact_length_m")]
    pub contact_length_m: f64,
}

fn default_mass_kg() -> f64 { 28_000.0 }
fn default_wheels() -> u32 { 8 }
fn default_tire_width_m() -> f64 { 0.65 }
fn default_contact_length_m() -> f64 { 0.45 }

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            mass_kg: default_mass_kg(),
            wheels: default_wheels(),
            tire_width_m: default_tire_width_m(),
            contact_length_m: default_contact_length_m(),
        }
    }
}

impl MachineConfig {
    /// 接地面积 [m²]
    #[inline]
    pub fn contact_area_m2(&self) -> f64 {
        self.tire_width_m * self.contact_length_m
    }

    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("machine.mass_kg", self.mass_kg)?;
        if self.wheels < 1 {
            return Err(ConfigError::invalid("machine.wheels", self.wheels, "至少 1 个车轮"));
        }
        ConfigError::require_positive("machine.tire_width_m", self.tire_width_m)?;
        ConfigError::require_positive("machine.contact_length_m", self.contact_length_m)?;
        Ok(())
    }
}

/// 验证可选的单轮载荷覆盖值 [kg]
pub fn validate_wheel_load(wheel_load_kg: Option<f64>) -> Result<(), ConfigError> {
    match wheel_load_kg {
        Some(kg) => ConfigError::require_positive("wheel_load_kg", kg),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_machine() {
        let m = MachineConfig::default();
        assert!(m.validate().is_ok());
        assert!((m.contact_area_m2() - 0.2925).abs() < 1e-12);
    }

    #[test]
    fn test_zero_wheels_rejected() {
        let m = MachineConfig {
            wheels: 0,
            ..Default::default()
        };
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_wheel_load_override() {
        assert!(validate_wheel_load(None).is_ok());
        assert!(validate_wheel_load(Some(3_500.0)).is_ok());
        assert!(validate_wheel_load(Some(0.0)).is_err());
    }
}
