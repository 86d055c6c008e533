//! 序列化兼容层错误类型

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};

/// 序列化兼容层结果类型别名
pub type SerializerShimResult<T> = Result<T, SerializerShimError>;

/// 序列化兼容层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializerShimError {
    #[error("继承序列化修复不支持框架版本 {0}（最低 1.8）")]
    Unsupported(String),

    #[error("继承序列化修复未在框架版本 {0} 上测试")]
    Untested(String),

    #[error("无法解析框架版本: {0:?}")]
    InvalidVersion(String),
}

impl ToPublicError for SerializerShimError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            SerializerShimError::Unsupported(_) | SerializerShimError::Untested(_) => {
                ErrorCode::Unsupported
            }
            SerializerShimError::InvalidVersion(_) => ErrorCode::InvalidInput,
        }
    }

    fn to_public_message(&self) -> String {
        self.to_string()
    }
}
