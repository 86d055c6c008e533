//! 权限错误类型
//!
//! 授权拒绝本身不是错误：`has_permission` 返回 `Ok(false)`。
//! 这里只包含配置缺陷、安全不变量被破坏，以及对象解析失败等需要向上传播的情况。

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};

/// 权限操作结果类型别名
pub type PermissionResult<T> = Result<T, PermissionError>;

/// 权限相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("缺少 {policy} 动作权限配置: {action}")]
    ImproperlyConfigured { policy: &'static str, action: String },

    #[error("{policy} 需要视图提供资源描述")]
    MissingResource { policy: &'static str },

    #[error("视图没有声明 permission_required")]
    MissingPermissionRequired,

    #[error("非法的权限模板 {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("对象级权限与全局权限不应同时为真 ({permission})，权限规则可能存在安全问题")]
    SecurityInvariantViolation { permission: String },

    #[error("未提供认证信息")]
    NotAuthenticated,

    #[error("权限被拒绝: {action}")]
    PermissionDenied { action: String },

    #[error("对象不存在: {resource} pk={pk}")]
    ObjectNotFound { resource: String, pk: String },
}

impl PermissionError {
    /// 动作缺少映射时的配置错误
    pub fn improperly_configured(policy: &'static str, action: Option<&str>) -> Self {
        PermissionError::ImproperlyConfigured {
            policy,
            action: action.unwrap_or("<none>").to_string(),
        }
    }

    /// 是否为部署/配置缺陷
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PermissionError::ImproperlyConfigured { .. }
                | PermissionError::MissingResource { .. }
                | PermissionError::MissingPermissionRequired
                | PermissionError::InvalidTemplate { .. }
        )
    }
}

impl ToPublicError for PermissionError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            PermissionError::ImproperlyConfigured { .. }
            | PermissionError::MissingResource { .. }
            | PermissionError::MissingPermissionRequired
            | PermissionError::InvalidTemplate { .. } => ErrorCode::ImproperlyConfigured,
            PermissionError::SecurityInvariantViolation { .. } => ErrorCode::SecurityViolation,
            PermissionError::NotAuthenticated => ErrorCode::Unauthorized,
            PermissionError::PermissionDenied { .. } => ErrorCode::Forbidden,
            PermissionError::ObjectNotFound { .. } => ErrorCode::ResourceNotFound,
        }
    }

    fn to_public_message(&self) -> String {
        match self {
            // 配置和安全问题不暴露细节
            PermissionError::ImproperlyConfigured { .. }
            | PermissionError::MissingResource { .. }
            | PermissionError::MissingPermissionRequired
            | PermissionError::InvalidTemplate { .. }
            | PermissionError::SecurityInvariantViolation { .. } => {
                ErrorCode::InternalError.default_message().to_string()
            }
            PermissionError::ObjectNotFound { .. } => {
                ErrorCode::ResourceNotFound.default_message().to_string()
            }
            _ => self.to_string(),
        }
    }
}
