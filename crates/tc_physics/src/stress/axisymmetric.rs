// crates/tc_physics/src/stress/axisymmetric.rs

//! 圆形均布荷载中心线下的竖向应力（Boussinesq 积分解）
//!
//! ```text
//! a = sqrt(A / π)
//! σ_z = p · [1 - (1 + (a/z)²)^(-3/2)]
//! ```

use crate::types::{MIN_EQUIVALENT_AREA, MIN_STRESS_DEPTH};

use super::StressModel;

/// 单点土柱应力模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisymmetricStress {
    pressure_pa: f64,
    radius_m: f64,
}

impl AxisymmetricStress {
    /// 由接地压力与接地面积构造
    pub fn new(pressure_pa: f64, contact_area_m2: f64) -> Self {
        let radius_m = (contact_area_m2.max(MIN_EQUIVALENT_AREA) / std::f64::consts::PI).sqrt();
        Self {
            pressure_pa,
            radius_m,
        }
    }

    /// 等效圆半径 [m]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }
}

impl StressModel for AxisymmetricStress {
    fn name(&self) -> &'static str {
        "axisymmetric"
    }

    fn pressure_pa(&self) -> f64 {
        self.pressure_pa
    }

    fn depth_factor(&self, z: f64) -> f64 {
        let ratio = self.radius_m / z.max(MIN_STRESS_DEPTH);
        (1.0 - (1.0 + ratio * ratio).powf(-1.5)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_carries_full_pressure() {
        let s = AxisymmetricStress::new(100_000.0, 0.2925);
        assert!((s.depth_factor(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_decays_with_depth() {
        let s = AxisymmetricStress::new(100_000.0, 0.2925);
        let mut prev = f64::INFINITY;
        for i in 1..100 {
            let d = s.depth_factor(i as f64 * 0.1);
            assert!(d <= prev);
            assert!((0.0..=1.0).contains(&d));
            prev = d;
        }
        assert!(s.depth_factor(10.0) < 0.01);
    }
}
