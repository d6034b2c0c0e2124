// crates/tc_physics/src/types.rs

//! 物理常数与数值下限
//!
//! 下限值用于保证除法、幂运算在任何合法输入下都不会产生 NaN 或无穷。

/// 重力加速度 [m/s²]
pub const GRAVITY: f64 = 9.81;

/// 接地面积下限 [m²]
pub const MIN_CONTACT_AREA: f64 = 1e-6;

/// 长度类分母下限 [m]
pub const MIN_LENGTH: f64 = 1e-6;

/// 沉陷刚度下限
pub const MIN_STIFFNESS: f64 = 1e-6;

/// 弹性解中的深度下限，避免 z → 0 奇异 [m]
pub const MIN_STRESS_DEPTH: f64 = 1e-4;

/// 等效圆面积下限 [m²]
pub const MIN_EQUIVALENT_AREA: f64 = 1e-8;

/// 临界应力下限 [Pa]
pub const MIN_SIGMA_CRIT: f64 = 1e-6;

/// 荷载图峰值归一化下限
pub const MIN_LOAD_PEAK: f64 = 1e-12;

/// 应力比上限：单点土柱
pub const COLUMN_RATIO_CAP: f64 = 4.0;

/// 应力比上限：路线三维（车轮中心荷载峰值更尖锐）
pub const VOLUME_RATIO_CAP: f64 = 6.0;

/// 单点土柱压实效率的深度衰减长度 [m]
pub const COLUMN_COMPACTION_DECAY_M: f64 = 2.5;
