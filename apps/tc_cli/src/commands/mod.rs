// apps/tc_cli/src/commands/mod.rs

//! CLI 子命令

pub mod column;
pub mod route;
pub mod sweep;
pub mod validate;

use tc_io::ExportSummary;
use tracing::info;

/// 输出已写出的文件列表
pub(crate) fn report_files(summary: &ExportSummary) {
    info!("输出目录: {}", summary.directory.display());
    for file in &summary.files {
        info!("  - {}", file.display());
    }
}

