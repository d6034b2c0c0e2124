// crates/tc_config/src/error.rs

//! 配置层错误类型

use tc_foundation::TcError;

/// 配置层结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 基础层错误
    #[error(transparent)]
    Foundation(#[from] TcError),
}

impl ConfigError {
    /// 构造无效值错误
    pub fn invalid(key: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 要求严格为正且有限
    pub fn require_positive(key: &str, value: f64) -> Result<(), Self> {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid(key, value, "必须为正"))
        }
    }

    /// 要求非负且有限
    pub fn require_non_negative(key: &str, value: f64) -> Result<(), Self> {
        if value >= 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid(key, value, "不能为负"))
        }
    }

    /// 要求位于闭区间 `[min, max]`
    pub fn require_range(key: &str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(Self::invalid(
                key,
                value,
                format!("必须在 [{}, {}] 范围内", min, max),
            ))
        }
    }

    /// 要求网格步长不超过对应方向的区域尺寸
    pub fn require_cell_fits(key: &str, cell: f64, extent: f64) -> Result<(), Self> {
        Self::require_positive(key, cell)?;
        if cell > extent {
            return Err(Self::invalid(
                key,
                cell,
                format!("网格步长不能大于区域尺寸 {}", extent),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("soil.moisture", "-1", "必须在 [0, 1] 范围内");
        assert!(err.to_string().contains("soil.moisture"));
    }

    #[test]
    fn test_require_helpers() {
        assert!(ConfigError::require_positive("dz_m", 0.1).is_ok());
        assert!(ConfigError::require_positive("dz_m", 0.0).is_err());
        assert!(ConfigError::require_positive("dz_m", f64::NAN).is_err());
        assert!(ConfigError::require_non_negative("gain", 0.0).is_ok());
        assert!(ConfigError::require_range("moisture", 1.0, 0.0, 1.0).is_ok());
        assert!(ConfigError::require_range("moisture", 1.01, 0.0, 1.0).is_err());
        assert!(ConfigError::require_cell_fits("dz_m", 0.2, 5.0).is_ok());
        assert!(ConfigError::require_cell_fits("dz_m", 6.0, 5.0).is_err());
    }
}
