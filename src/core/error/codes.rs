//! 对外错误码定义
//!
//! 宿主框架根据错误码决定响应状态：
//! - 授权拒绝返回 403 类响应
//! - 配置错误属于部署缺陷，返回 500 类响应，而不是 403
//!
//! 错误码格式: XXYY
//! - XX: 错误类别 (00=成功, 03=验证, 04=权限, 05=资源, 09=系统)
//! - YY: 具体错误

use serde::{Deserialize, Serialize};

/// 对外错误码 - 用于宿主框架的响应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // ==================== 成功 (00xx) ====================
    Success = 0,

    // ==================== 验证错误 (03xx) ====================
    /// 无效输入（如无法解析的版本号）
    InvalidInput = 302,

    // ==================== 权限错误 (04xx) ====================
    /// 未认证
    Unauthorized = 401,
    /// 禁止访问
    Forbidden = 403,

    // ==================== 资源错误 (05xx) ====================
    /// 资源未找到
    ResourceNotFound = 500,

    // ==================== 系统错误 (09xx) ====================
    /// 内部错误
    InternalError = 900,
    /// 权限配置错误（动作缺少权限映射、模板非法等）
    ImproperlyConfigured = 901,
    /// 权限规则本身不安全
    SecurityViolation = 902,
    /// 当前框架版本不受支持
    Unsupported = 903,
}

impl ErrorCode {
    /// 获取错误码的 i32 值
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// 根据 i32 值获取错误码
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::Success),
            302 => Some(ErrorCode::InvalidInput),
            401 => Some(ErrorCode::Unauthorized),
            403 => Some(ErrorCode::Forbidden),
            500 => Some(ErrorCode::ResourceNotFound),
            900 => Some(ErrorCode::InternalError),
            901 => Some(ErrorCode::ImproperlyConfigured),
            902 => Some(ErrorCode::SecurityViolation),
            903 => Some(ErrorCode::Unsupported),
            _ => None,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::Success => 200,
            ErrorCode::InvalidInput => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::ResourceNotFound => 404,
            ErrorCode::InternalError
            | ErrorCode::ImproperlyConfigured
            | ErrorCode::SecurityViolation
            | ErrorCode::Unsupported => 500,
        }
    }

    /// 获取默认的错误消息
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "成功",
            ErrorCode::InvalidInput => "无效输入",
            ErrorCode::Unauthorized => "未认证",
            ErrorCode::Forbidden => "禁止访问",
            ErrorCode::ResourceNotFound => "资源未找到",
            ErrorCode::InternalError => "内部服务器错误",
            ErrorCode::ImproperlyConfigured => "权限配置错误",
            ErrorCode::SecurityViolation => "权限规则存在安全隐患",
            ErrorCode::Unsupported => "不支持的框架版本",
        }
    }

    /// 判断是否为客户端错误
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }

    /// 判断是否为服务器错误（部署缺陷）
    pub fn is_server_error(&self) -> bool {
        self.http_status() >= 500
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::Success
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_i32(), self.default_message())
    }
}

/// 对外错误信息 - 用于序列化到响应中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicError {
    /// 错误码
    pub code: ErrorCode,
    /// 错误消息
    pub message: String,
}

impl PublicError {
    /// 创建新的对外错误
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 使用默认消息创建错误
    pub fn with_default_message(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    /// HTTP 状态码
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// 序列化为 JSON 响应体
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 内部错误到对外错误的转换 trait
///
/// 实现此 trait 可以将内部错误转换为对外错误，过滤敏感信息
pub trait ToPublicError {
    /// 转换为对外错误
    fn to_public_error(&self) -> PublicError {
        PublicError::new(self.to_error_code(), self.to_public_message())
    }

    /// 获取对外错误码
    fn to_error_code(&self) -> ErrorCode;

    /// 获取对外错误消息（过滤敏感信息）
    fn to_public_message(&self) -> String;
}
