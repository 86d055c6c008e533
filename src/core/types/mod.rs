// 核心类型模块
//
// 请求方法、资源描述、对象引用以及内置动作名称

pub mod method;
pub mod resource;

pub use method::HttpMethod;
pub use resource::{ObjectRef, ResourceDescriptor};

/// 内置的 CRUD 动作名称
pub mod actions {
    pub const LIST: &str = "list";
    pub const RETRIEVE: &str = "retrieve";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const PARTIAL_UPDATE: &str = "partial_update";
    pub const DESTROY: &str = "destroy";
}
