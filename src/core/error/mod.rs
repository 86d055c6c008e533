//! 统一错误处理
//!
//! 1. **按领域拆分**：权限、配置、序列化兼容层各自一个枚举
//! 2. **授权拒绝不是错误**：策略以 `Ok(false)` 表达拒绝，只有配置缺陷、
//!    安全不变量破坏和对象解析失败会以 `Err` 向上传播
//! 3. **对外转换**：所有错误实现 `ToPublicError`，由宿主框架映射为响应

pub mod codes;
pub mod config;
pub mod permission;
pub mod serializer;

pub use codes::{ErrorCode, PublicError, ToPublicError};
pub use config::{ConfigError, ConfigResult};
pub use permission::{PermissionError, PermissionResult};
pub use serializer::{SerializerShimError, SerializerShimResult};
