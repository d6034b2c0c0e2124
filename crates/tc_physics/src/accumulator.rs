// crates/tc_physics/src/accumulator.rs

//! 压实指数累积
//!
//! 每次通过对每个单元：
//! ```text
//! r  = clamp(σ / max(σc, ε), 0, r_max)
//! δ  = α · f_w · r^m · A(z) · max(0, 1 - c/c_max)
//! c' = clamp(c + δ, 0, c_max)
//! ```
//! 其中 `f_w = clamp(1 + g·max(0, w - w_ref), lo, hi)` 为含水率放大系数，
//! `A(z)` 为可选的深度衰减（单点土柱 `exp(-z/2.5)`，路线三维为 1）。
//! 增量非负，压实不可逆。
//!
//! 单元之间相互独立：单元数超过阈值时使用 rayon 并行，结果与串行一致。

use rayon::prelude::*;
use tc_config::{SoilConfig, VolumeSoilConfig};
use tc_foundation::{TcError, TcResult};

use crate::critical::CriticalStress;
use crate::geometry::SoilGeometry;
use crate::types::{COLUMN_COMPACTION_DECAY_M, COLUMN_RATIO_CAP, MIN_SIGMA_CRIT, VOLUME_RATIO_CAP};

/// 含水率放大系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistureCoupling {
    /// 每单位含水率偏移的增益
    pub gain: f64,
    /// 下限
    pub lower: f64,
    /// 上限
    pub upper: f64,
}

impl MoistureCoupling {
    /// 单点土柱
    pub const COLUMN: MoistureCoupling = MoistureCoupling {
        gain: 2.2,
        lower: 0.7,
        upper: 2.0,
    };

    /// 路线三维
    pub const VOLUME: MoistureCoupling = MoistureCoupling {
        gain: 2.0,
        lower: 0.75,
        upper: 2.0,
    };

    /// 放大系数；只有高于参考含水率的部分起作用
    pub fn factor(&self, moisture_offset: f64) -> f64 {
        (1.0 + self.gain * moisture_offset.max(0.0)).clamp(self.lower, self.upper)
    }
}

/// 单元压实律
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactionLaw {
    /// 压实速率 α
    pub alpha: f64,
    /// 应力比指数 m
    pub stress_exponent: f64,
    /// 压实指数上限 c_max
    pub ceiling: f64,
    /// 应力比上限
    pub ratio_cap: f64,
    /// 含水率放大系数 f_w
    pub moisture_factor: f64,
    /// 深度衰减长度 [m]（`None` 表示不衰减）
    pub depth_decay_m: Option<f64>,
}

impl CompactionLaw {
    /// 单点土柱压实律
    pub fn column(soil: &SoilConfig) -> Self {
        Self {
            alpha: soil.compaction_alpha,
            stress_exponent: soil.stress_exponent,
            ceiling: soil.max_compaction_index,
            ratio_cap: COLUMN_RATIO_CAP,
            moisture_factor: MoistureCoupling::COLUMN.factor(soil.moisture_offset()),
            depth_decay_m: Some(COLUMN_COMPACTION_DECAY_M),
        }
    }

    /// 路线三维压实律
    pub fn volume(soil: &VolumeSoilConfig) -> Self {
        Self {
            alpha: soil.compaction_alpha,
            stress_exponent: soil.stress_exponent,
            ceiling: soil.max_compaction_index,
            ratio_cap: VOLUME_RATIO_CAP,
            moisture_factor: MoistureCoupling::VOLUME.factor(soil.moisture_offset()),
            depth_decay_m: None,
        }
    }

    /// 截断后的应力比
    #[inline]
    pub fn stress_ratio(&self, stress_pa: f64, sigma_crit_pa: f64) -> f64 {
        (stress_pa / sigma_crit_pa.max(MIN_SIGMA_CRIT)).clamp(0.0, self.ratio_cap)
    }

    /// 深度衰减 A(z)
    #[inline]
    pub fn depth_attenuation(&self, z: f64) -> f64 {
        match self.depth_decay_m {
            Some(decay) => (-z / decay).exp(),
            None => 1.0,
        }
    }

    /// 单元更新后的压实指数
    #[inline]
    pub fn update(&self, compaction: f64, stress_pa: f64, sigma_crit_pa: f64, z: f64) -> f64 {
        let ratio = self.stress_ratio(stress_pa, sigma_crit_pa);
        let brake = (1.0 - compaction / self.ceiling).max(0.0);
        let delta = self.alpha
            * self.moisture_factor
            * ratio.powf(self.stress_exponent)
            * self.depth_attenuation(z)
            * brake;
        (compaction + delta).clamp(0.0, self.ceiling)
    }
}

/// 累积器配置
#[derive(Debug, Clone)]
pub struct AccumulatorConfig {
    /// 是否启用并行
    pub parallel: bool,
    /// 并行阈值（单元数超过此值时使用并行）
    pub parallel_threshold: usize,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 4096,
        }
    }
}

impl AccumulatorConfig {
    /// 串行配置
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }
}

/// 一次通过的统计
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// 单元最大增量
    pub max_increment: f64,
}

/// 压实累积器
#[derive(Debug, Clone)]
pub struct CompactionAccumulator {
    law: CompactionLaw,
    config: AccumulatorConfig,
}

impl CompactionAccumulator {
    /// 创建累积器
    pub fn new(law: CompactionLaw) -> Self {
        Self {
            law,
            config: AccumulatorConfig::default(),
        }
    }

    /// 使用自定义配置
    pub fn with_config(law: CompactionLaw, config: AccumulatorConfig) -> Self {
        Self { law, config }
    }

    /// 压实律
    pub fn law(&self) -> &CompactionLaw {
        &self.law
    }

    /// 初始场截断到 `[0, c_max]`
    pub fn clamp_initial(&self, compaction: &mut [f64]) {
        let ceiling = self.law.ceiling;
        compaction.iter_mut().for_each(|c| *c = c.clamp(0.0, ceiling));
    }

    /// 对整个场执行一次通过
    pub fn step(
        &self,
        compaction: &mut [f64],
        stress_pa: &[f64],
        critical: &dyn CriticalStress,
        geometry: &dyn SoilGeometry,
    ) -> TcResult<StepStats> {
        let n = geometry.n_cells();
        TcError::check_size("compaction", n, compaction.len())?;
        TcError::check_size("stress", n, stress_pa.len())?;
        TcError::check_size("sigma_crit", geometry.depths().len(), critical.profile_pa().len())?;

        let max_increment = if self.config.parallel && n >= self.config.parallel_threshold {
            self.step_parallel(compaction, stress_pa, critical, geometry)
        } else {
            self.step_serial(compaction, stress_pa, critical, geometry)
        };
        Ok(StepStats { max_increment })
    }

    #[inline]
    fn update_cell(
        &self,
        i: usize,
        c: &mut f64,
        stress_pa: f64,
        critical: &dyn CriticalStress,
        geometry: &dyn SoilGeometry,
    ) -> f64 {
        let level = geometry.level_of(i);
        let old = *c;
        *c = self.law.update(
            old,
            stress_pa,
            critical.sigma_crit_pa(level),
            geometry.depths()[level],
        );
        *c - old
    }

    fn step_serial(
        &self,
        compaction: &mut [f64],
        stress_pa: &[f64],
        critical: &dyn CriticalStress,
        geometry: &dyn SoilGeometry,
    ) -> f64 {
        compaction
            .iter_mut()
            .zip(stress_pa)
            .enumerate()
            .map(|(i, (c, &s))| self.update_cell(i, c, s, critical, geometry))
            .fold(0.0, f64::max)
    }

    fn step_parallel(
        &self,
        compaction: &mut [f64],
        stress_pa: &[f64],
        critical: &dyn CriticalStress,
        geometry: &dyn SoilGeometry,
    ) -> f64 {
        compaction
            .par_iter_mut()
            .zip(stress_pa.par_iter())
            .enumerate()
            .map(|(i, (c, &s))| self.update_cell(i, c, s, critical, geometry))
            .reduce(|| 0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical::StaticCriticalStress;
    use crate::geometry::VolumeGrid;

    fn volume_law() -> CompactionLaw {
        CompactionLaw::volume(&VolumeSoilConfig::default())
    }

    #[test]
    fn test_moisture_factor_one_sided() {
        let m = MoistureCoupling::COLUMN;
        assert_eq!(m.factor(-0.1), 1.0);
        assert!((m.factor(0.05) - 1.11).abs() < 1e-12);
        assert_eq!(m.factor(5.0), 2.0);
        assert_eq!(MoistureCoupling::VOLUME.factor(5.0), 2.0);
    }

    #[test]
    fn test_ratio_cap() {
        let law = volume_law();
        assert_eq!(law.stress_ratio(1e9, 1.0), 6.0);
        assert_eq!(law.stress_ratio(-5.0, 1.0), 0.0);
        let column = CompactionLaw::column(&SoilConfig::default());
        assert_eq!(column.stress_ratio(1e9, 1.0), 4.0);
    }

    #[test]
    fn test_update_bounded_and_monotone() {
        let law = volume_law();
        let mut c = 0.0;
        for _ in 0..10_000 {
            let next = law.update(c, 1e6, 1e5, 0.1);
            assert!(next >= c);
            assert!(next <= law.ceiling);
            c = next;
        }
        assert!((law.ceiling - c) < 1e-6);
    }

    #[test]
    fn test_increments_shrink_near_ceiling() {
        for law in [volume_law(), CompactionLaw::column(&SoilConfig::default())] {
            let saturated = 0.8 * law.ceiling;
            // 贴近上限后增量落到舍入误差量级，不再比较
            let resolvable = 1e-12;
            let mut c = 0.0;
            let mut prev_inc = f64::INFINITY;
            let mut checked = 0;
            for _ in 0..20_000 {
                let next = law.update(c, 2.5e5, 1.0e5, 0.2);
                let inc = next - c;
                if c > saturated && inc > resolvable {
                    assert!(inc < prev_inc, "c={} inc={} prev={}", c, inc, prev_inc);
                    checked += 1;
                }
                prev_inc = inc;
                c = next;
            }
            assert!(checked > 10);
            assert!(law.ceiling - c < 1e-9);
        }
    }

    #[test]
    fn test_above_ceiling_does_not_decrease() {
        let law = volume_law();
        assert_eq!(law.update(law.ceiling, 1e6, 1e5, 0.0), law.ceiling);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let grid = VolumeGrid {
            x: (0..40).map(|i| i as f64).collect(),
            y: (0..20).map(|i| i as f64 * 0.25).collect(),
            z: vec![0.1, 0.3, 0.5, 0.7, 0.9, 1.1],
        };
        let critical =
            StaticCriticalStress::from_soil(&VolumeSoilConfig::default(), &grid.z, 1.2).unwrap();
        let stress: Vec<f64> = (0..grid.n_cells()).map(|i| (i % 97) as f64 * 3_000.0).collect();
        let initial: Vec<f64> = grid.level_field(|z| 0.08 * (-z / 1.3).exp());

        let serial = CompactionAccumulator::with_config(volume_law(), AccumulatorConfig::serial());
        let parallel = CompactionAccumulator::with_config(
            volume_law(),
            AccumulatorConfig {
                parallel: true,
                parallel_threshold: 1,
            },
        );

        let mut a = initial.clone();
        let mut b = initial;
        for _ in 0..5 {
            let sa = serial.step(&mut a, &stress, &critical, &grid).unwrap();
            let sb = parallel.step(&mut b, &stress, &critical, &grid).unwrap();
            assert_eq!(sa, sb);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let grid = VolumeGrid {
            x: vec![0.0, 1.0],
            y: vec![0.0],
            z: vec![0.1],
        };
        let critical = StaticCriticalStress::linear(&grid.z, 110.0, 35.0);
        let acc = CompactionAccumulator::new(volume_law());
        let mut c = vec![0.0; 3];
        assert!(acc.step(&mut c, &[0.0; 2], &critical, &grid).is_err());
    }
}
