//! actionperm - 视图集动作权限策略
//!
//! 把视图集动作（list/retrieve/create/update/partial_update/destroy 以及自定义路由）
//! 映射为权限字符串，并在模型级和对象级两个层次检查主体权限。
//! 认证、会话、ORM 和请求解析由宿主框架提供。

pub mod api;
pub mod config;
pub mod core;
pub mod serializers;
pub mod utils;
