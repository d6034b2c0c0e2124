// crates/tc_config/src/lib.rs

//! TerraCompact Config Layer (Layer 1)
//!
//! 配置层，提供土柱、路线三维和敏感性扫描的运行配置。
//! 所有配置均可 JSON 序列化，字段缺省时取模型默认值，
//! 并在模拟开始前通过 `validate()` 一次性检查。
//!
//! # 模块概览
//!
//! - [`soil`]: 土壤参数与临界应力剖面名称
//! - [`machine`]: 行走机械参数
//! - [`column`]: 单点土柱运行配置
//! - [`volume`]: 路线三维运行配置
//! - [`sweep`]: OVAT 扫描配置
//! - [`output`]: 输出目录与导出选项
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod error;
pub mod machine;
pub mod output;
mod persist;
pub mod soil;
pub mod sweep;
pub mod volume;

/// 层级标识
pub const LAYER: u8 = 1;

// 重导出核心类型
pub use column::{ColumnConfig, ColumnRunConfig};
pub use error::{ConfigError, ConfigResult};
pub use machine::MachineConfig;
pub use output::OutputConfig;
pub use soil::{SoilConfig, SoilProfile, VolumeSoilConfig};
pub use sweep::SweepConfig;
pub use volume::{DomainConfig, RouteConfig, RouteMode, TrafficConfig, VolumeRunConfig};
