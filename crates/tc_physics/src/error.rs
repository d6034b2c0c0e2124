// crates/tc_physics/src/error.rs

//! 物理引擎错误类型
//!
//! 所有错误都在第一次通过之前产生：配置范围、临界应力分层、路线几何。
//! 通过循环内部只做截断/下限处理，不会返回错误。

use tc_config::ConfigError;
use tc_foundation::TcError;
use thiserror::Error;

/// 物理引擎结果类型
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// 物理引擎错误
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 基础层错误（网格、数组尺寸）
    #[error(transparent)]
    Foundation(#[from] TcError),

    /// 临界应力分层描述无效
    #[error("临界应力分层无效: {0}")]
    InvalidLayerSpec(String),

    /// 路线几何无效
    #[error("路线无效: {0}")]
    InvalidRoute(String),
}

impl PhysicsError {
    /// 分层描述错误
    pub fn layer_spec(message: impl Into<String>) -> Self {
        Self::InvalidLayerSpec(message.into())
    }

    /// 路线错误
    pub fn route(message: impl Into<String>) -> Self {
        Self::InvalidRoute(message.into())
    }
}
