// crates/tc_physics/src/critical/hardening.rs

//! 随荷载硬化的临界应力
//!
//! ```text
//! σc⁰(z) = 20 kPa + 12 kPa/m · z
//! σc += h · max(0, σ - σc)
//! σc += 0.01 · σ · (1 - c)
//! ```
//! 第一项使超过临界应力的部分被"记住"；第二项为每次加载的残余硬化。

use super::CriticalStress;

/// 初始临界应力：地表值 [Pa]
const SURFACE_PA: f64 = 20_000.0;
/// 初始临界应力：深度梯度 [Pa/m]
const GRADIENT_PA_M: f64 = 12_000.0;
/// 残余硬化系数
const RESIDUAL_RATE: f64 = 0.01;

/// 单点土柱硬化临界应力
#[derive(Debug, Clone, PartialEq)]
pub struct HardeningCriticalStress {
    sigma_pa: Vec<f64>,
    rate: f64,
}

impl HardeningCriticalStress {
    /// 由深度层中心与硬化速率构造
    pub fn new(depths: &[f64], rate: f64) -> Self {
        Self {
            sigma_pa: depths.iter().map(|&z| SURFACE_PA + GRADIENT_PA_M * z).collect(),
            rate,
        }
    }
}

impl CriticalStress for HardeningCriticalStress {
    fn name(&self) -> &'static str {
        "hardening"
    }

    fn profile_pa(&self) -> &[f64] {
        &self.sigma_pa
    }

    fn harden(&mut self, stress_pa: &[f64], compaction: &[f64]) {
        for ((sc, &s), &c) in self.sigma_pa.iter_mut().zip(stress_pa).zip(compaction) {
            *sc += self.rate * (s - *sc).max(0.0);
            *sc += RESIDUAL_RATE * s * (1.0 - c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_profile() {
        let h = HardeningCriticalStress::new(&[0.05, 1.0], 0.08);
        assert!((h.sigma_crit_pa(0) - 20_600.0).abs() < 1e-9);
        assert!((h.sigma_crit_pa(1) - 32_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_hardening_never_decreases() {
        let mut h = HardeningCriticalStress::new(&[0.05, 1.0, 5.0], 0.08);
        let before = h.profile_pa().to_vec();
        h.harden(&[100_000.0, 10_000.0, 0.0], &[0.5, 0.3, 0.95]);
        for (a, b) in before.iter().zip(h.profile_pa()) {
            assert!(b >= a);
        }
        // 超过临界应力的层
        let expected = 20_600.0 + 0.08 * (100_000.0 - 20_600.0);
        let expected = expected + 0.01 * 100_000.0 * 0.5;
        assert!((h.sigma_crit_pa(0) - expected).abs() < 1e-6);
    }
}
