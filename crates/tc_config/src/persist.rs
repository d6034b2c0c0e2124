// crates/tc_config/src/persist.rs

//! JSON 配置文件读写

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use tc_foundation::TcError;

use crate::error::{ConfigError, ConfigResult};

/// 从 JSON 文件读取配置（不做验证）
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    if !path.exists() {
        return Err(TcError::file_not_found(path).into());
    }
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
}

/// 写入格式化 JSON
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> ConfigResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
    std::fs::write(path, content).map_err(ConfigError::Io)?;
    Ok(())
}
