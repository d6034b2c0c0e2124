// crates/tc_io/src/lib.rs

//! TerraCompact IO Layer (Layer 3)
//!
//! 结果表格导出、路线 CSV 导入与交互式 HTML 页面。
//!
//! # 模块概览
//!
//! - [`table`]: 内存 CSV 表与写出
//! - [`import`]: CSV 路线折线导入
//! - [`exporters`]: 单点土柱、路线三维、敏感性矩阵结果导出
//! - [`html`]: Plotly 三维点云页面
//! - [`error`]: IO 错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod exporters;
pub mod html;
pub mod import;
pub mod table;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出核心类型
pub use error::{IoError, IoResult};
pub use exporters::{export_column, export_sweep, export_volume, ExportSummary};
pub use html::write_volume_html;
pub use import::{load_route_csv, route_source, RouteCsvOptions};
pub use table::{Cell, CsvTable};
