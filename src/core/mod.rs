pub mod error;
pub mod principal;
pub mod types;

// 错误和结果类型
pub use error::{
    ConfigError, ConfigResult, ErrorCode, PermissionError, PermissionResult, PublicError,
    SerializerShimError, SerializerShimResult, ToPublicError,
};

pub use principal::Principal;
pub use types::{actions, HttpMethod, ObjectRef, ResourceDescriptor};
