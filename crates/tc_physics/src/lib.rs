// crates/tc_physics/src/lib.rs

//! TerraCompact Physics Layer (Layer 2)
//!
//! 车辆反复通过引起的土壤压实增量模型。
//!
//! ```text
//! 机械参数 ──► 接触荷载 ──► 应力传播 ──┐
//!                 │                    ├──► 压实累积 ──► 通过记录
//!                 └──► Bekker 沉陷     │
//! 土壤参数 ──► 临界应力剖面 ───────────┘
//! ```
//!
//! # 模块概览
//!
//! - [`contact`]: 单轮载荷、接地压力、Bekker 沉陷
//! - [`stress`]: 竖向应力传播（轴对称弹性解 / 轮迹荷载图）
//! - [`critical`]: 临界应力剖面（硬化 / 线性 / 分层）
//! - [`accumulator`]: 每次通过的压实指数更新
//! - [`geometry`]: 土柱与三维网格
//! - [`route`]: 路线中心线重采样与轮迹
//! - [`drivers`]: 单点土柱与路线三维驱动
//! - [`sensors`]: 虚拟圆锥指数与干密度
//! - [`sampling`]: 三维点云抽样
//! - [`sweep`]: 单变量敏感性矩阵
//!
//! # 使用示例
//!
//! ```
//! use tc_config::ColumnRunConfig;
//! use tc_physics::drivers::ColumnSimulation;
//!
//! let mut config = ColumnRunConfig::default();
//! config.column.passes = 5;
//! let outcome = ColumnSimulation::new(&config)?.run()?;
//! assert_eq!(outcome.records.len(), 5);
//! # Ok::<(), tc_physics::PhysicsError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod contact;
pub mod critical;
pub mod drivers;
pub mod error;
pub mod geometry;
pub mod route;
pub mod sampling;
pub mod sensors;
pub mod stress;
pub mod sweep;
pub mod types;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use accumulator::{AccumulatorConfig, CompactionAccumulator, CompactionLaw, MoistureCoupling};
pub use contact::{contact_pressure_pa, wheel_load_n, BekkerSinkage, ContactLoad};
pub use critical::{CriticalStress, CriticalStressTable, HardeningCriticalStress, StaticCriticalStress};
pub use drivers::column::simulate_column;
pub use drivers::volume::simulate_volume;
pub use drivers::{
    ColumnOutcome, ColumnPassRecord, ColumnSimulation, VolumeOutcome, VolumePassRecord,
    VolumeSimulation,
};
pub use error::{PhysicsError, PhysicsResult};
pub use geometry::{ColumnGeometry, SoilGeometry, VolumeGrid};
pub use route::{Point2, RouteGeometry, RouteSource};
pub use sampling::SampledPoint;
pub use sensors::SensorReading;
pub use stress::{AxisymmetricStress, FootprintStress, LoadMap, StressModel};
pub use sweep::{run_sweep, SweepCase, SweepReport, SweepVariable};
