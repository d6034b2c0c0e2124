// crates/tc_io/src/exporters/mod.rs

//! 结果导出
//!
//! 每个导出器把一次运行的结果写成一组 CSV（可选 HTML），
//! 返回写出的文件列表。

pub mod column;
pub mod sweep;
pub mod volume;

pub use column::export_column;
pub use sweep::export_sweep;
pub use volume::export_volume;

use std::path::{Path, PathBuf};

use crate::error::IoResult;
use crate::table::CsvTable;

/// 已写出的文件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    /// 输出目录
    pub directory: PathBuf,
    /// 文件列表（写出顺序）
    pub files: Vec<PathBuf>,
}

impl ExportSummary {
    /// 在目录中开始导出（目录不存在时创建）
    pub fn begin(directory: &Path) -> IoResult<Self> {
        std::fs::create_dir_all(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            files: Vec::new(),
        })
    }

    /// 目录中的文件路径
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    /// 写出表格并记录
    pub fn table(&mut self, file_name: &str, table: &CsvTable) -> IoResult<()> {
        let path = self.path(file_name);
        table.save(&path)?;
        self.files.push(path);
        Ok(())
    }
}
