// crates/tc_io/src/error.rs

//! IO 错误类型定义
//!
//! 统一 IO 层错误，底层的文件系统、序列化、配置与物理引擎错误
//! 通过 thiserror 自动转换。

use std::path::PathBuf;

use tc_config::ConfigError;
use tc_physics::PhysicsError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件系统错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 路径
        path: PathBuf,
    },

    /// 解析错误
    #[error("解析错误 {file}:{line}: {message}")]
    Parse {
        /// 来源
        file: String,
        /// 行号（从 1 开始）
        line: usize,
        /// 描述
        message: String,
    },

    /// 缺少列
    #[error("{file} 中找不到列: 期望 {expected}")]
    MissingColumn {
        /// 来源
        file: String,
        /// 期望的列名
        expected: String,
    },

    /// 有效行不足
    #[error("{file} 中只有 {found} 行有效数据，至少需要 {required} 行")]
    InsufficientRows {
        /// 来源
        file: String,
        /// 有效行数
        found: usize,
        /// 最少行数
        required: usize,
    },

    /// 表格行宽与表头不一致
    #[error("表格 {table} 行宽不一致: 期望 {expected}, 实际 {actual}")]
    RowWidth {
        /// 表名
        table: String,
        /// 表头列数
        expected: usize,
        /// 行列数
        actual: usize,
    },

    /// CSV 读写错误
    #[error("CSV 错误: {0}")]
    Csv(#[from] csv::Error),

    /// JSON 序列化错误
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 物理引擎错误
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

impl IoError {
    /// 解析错误
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}
