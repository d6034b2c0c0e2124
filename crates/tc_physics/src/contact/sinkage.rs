// crates/tc_physics/src/contact/sinkage.rs

//! Bekker 压力-沉陷关系
//!
//! ```text
//! k     = (k_c / b + k_φ) · f_soft · f_hard
//! z_eq  = (p / k)^(1/n)
//! f_soft = max(0.35, 1 - g_w · (w - w_ref))
//! f_hard = 1 + g_h · c_surface
//! ```
//!
//! 含水率高于参考值时土体软化、沉陷增大；低于参考值时 `f_soft > 1`。
//! 表层压实指数越高，土体越硬。

use tc_config::SoilConfig;

use crate::types::{MIN_LENGTH, MIN_STIFFNESS};

/// 软化系数下限
const MIN_SOFTENING: f64 = 0.35;

/// Bekker 沉陷模型参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BekkerSinkage {
    /// 黏聚模量 k_c
    pub kc: f64,
    /// 摩擦模量 k_φ
    pub kphi: f64,
    /// 沉陷指数 n
    pub n: f64,
    /// 含水率软化系数（构造时确定）
    pub softening: f64,
    /// 压实硬化增益
    pub hardening_gain: f64,
}

impl BekkerSinkage {
    /// 由土壤参数构造
    pub fn from_soil(soil: &SoilConfig) -> Self {
        let softening =
            (1.0 - soil.moisture_softening_gain * soil.moisture_offset()).max(MIN_SOFTENING);
        Self {
            kc: soil.kc,
            kphi: soil.kphi,
            n: soil.n_bekker,
            softening,
            hardening_gain: soil.hardening_gain,
        }
    }

    /// 有效刚度
    pub fn stiffness(&self, tire_width_m: f64, surface_compaction: f64) -> f64 {
        let hardening = 1.0 + self.hardening_gain * surface_compaction;
        (self.kc / tire_width_m.max(MIN_LENGTH) + self.kphi) * self.softening * hardening
    }

    /// 平衡沉陷 [m]
    pub fn sinkage_m(&self, pressure_pa: f64, tire_width_m: f64, surface_compaction: f64) -> f64 {
        let k = self.stiffness(tire_width_m, surface_compaction).max(MIN_STIFFNESS);
        (pressure_pa / k).max(0.0).powf(1.0 / self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wetter_soil_sinks_more() {
        let dry = BekkerSinkage::from_soil(&SoilConfig {
            moisture: 0.18,
            ..Default::default()
        });
        let wet = BekkerSinkage::from_soil(&SoilConfig {
            moisture: 0.38,
            ..Default::default()
        });
        let p = 117_000.0;
        assert!(wet.sinkage_m(p, 0.65, 0.12) > dry.sinkage_m(p, 0.65, 0.12));
    }

    #[test]
    fn test_softening_floor() {
        let s = BekkerSinkage::from_soil(&SoilConfig {
            moisture: 1.0,
            reference_moisture: 0.0,
            ..Default::default()
        });
        assert_eq!(s.softening, 0.35);
    }

    #[test]
    fn test_compaction_hardens_surface() {
        let s = BekkerSinkage::from_soil(&SoilConfig::default());
        assert!(s.sinkage_m(1e5, 0.65, 0.8) < s.sinkage_m(1e5, 0.65, 0.1));
    }

    #[test]
    fn test_zero_pressure() {
        let s = BekkerSinkage::from_soil(&SoilConfig::default());
        assert_eq!(s.sinkage_m(0.0, 0.65, 0.0), 0.0);
    }
}
