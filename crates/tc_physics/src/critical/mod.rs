// crates/tc_physics/src/critical/mod.rs

//! 临界（先期固结）应力剖面
//!
//! 应力低于临界应力时压实增量很小，超过后迅速增大。
//! - [`HardeningCriticalStress`]: 单点土柱，随通过次数逐步硬化
//! - [`StaticCriticalStress`]: 路线三维，线性或分层剖面，模拟期间不变

pub mod hardening;
pub mod layered;

pub use hardening::HardeningCriticalStress;
pub use layered::{
    builtin_layers, layered_lookup, parse_layer_spec, resolve_layers, CriticalLayer,
    CriticalStressTable, StaticCriticalStress,
};

/// 临界应力剖面
pub trait CriticalStress: Send + Sync {
    /// 剖面名称
    fn name(&self) -> &'static str;

    /// 各深度层的临界应力 [Pa]
    fn profile_pa(&self) -> &[f64];

    /// 某深度层的临界应力 [Pa]
    #[inline]
    fn sigma_crit_pa(&self, level: usize) -> f64 {
        self.profile_pa()[level]
    }

    /// 通过后的硬化更新（输入为各深度层的应力与更新后的压实指数）
    ///
    /// 静态剖面保持不变。
    fn harden(&mut self, _stress_pa: &[f64], _compaction: &[f64]) {}
}
