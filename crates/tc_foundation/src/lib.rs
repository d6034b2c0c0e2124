// crates/tc_foundation/src/lib.rs

//! TerraCompact Foundation Layer
//!
//! 基础层，提供整个项目的公共抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与范围检查
//! - [`axis`]: 规则网格坐标轴、插值与深度区间
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: tc_cli
//! Layer 3: tc_io
//! Layer 2: tc_physics
//! Layer 1: tc_config
//! Layer 0: tc_foundation (本层)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 0;

// 重导出常用类型
pub use axis::{arange, cell_centers, interp, nearest_index, DepthBand};
pub use error::{TcError, TcResult};
