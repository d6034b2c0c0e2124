// crates/tc_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `TcError` 枚举和 `TcResult` 类型别名，作为各层错误的公共基础。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义通用错误，配置/物理/IO 错误在各自 crate 中扩展
//! 2. **易用性**: 提供便捷的构造方法和范围检查辅助函数
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use tc_foundation::error::{TcError, TcResult};
//!
//! fn check_step(step: f64) -> TcResult<()> {
//!     TcError::check_positive("step", step)
//! }
//!
//! assert!(check_step(0.5).is_ok());
//! assert!(check_step(0.0).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type TcResult<T> = Result<T, TcError>;

/// TerraCompact 基础错误类型
#[derive(Error, Debug)]
pub enum TcError {
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl TcError {
    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl TcError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> TcResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否在闭区间内（NaN 视为越界）
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> TcResult<()> {
        if !(value >= min && value <= max) {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 检查值严格为正且有限
    #[inline]
    pub fn check_positive(field: &'static str, value: f64) -> TcResult<()> {
        if !(value > 0.0 && value.is_finite()) {
            Err(Self::out_of_range(field, value, f64::MIN_POSITIVE, f64::MAX))
        } else {
            Ok(())
        }
    }
}

impl From<std::io::Error> for TcError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
