//! 配置错误类型
//!
//! 涵盖配置文件读写、解析以及配置中权限模板校验失败的情况

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};
use crate::core::error::permission::PermissionError;

/// 配置操作结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置相关错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("读取配置文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析配置文件失败: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("序列化配置失败: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("权限配置无效: {0}")]
    Permission(#[from] PermissionError),
}

impl ToPublicError for ConfigError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            ConfigError::Permission(pe) => pe.to_error_code(),
            _ => ErrorCode::InternalError,
        }
    }

    fn to_public_message(&self) -> String {
        ErrorCode::InternalError.default_message().to_string()
    }
}
