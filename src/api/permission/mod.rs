//! 权限策略模块
//!
//! 把视图集动作映射为权限字符串，并在模型级和对象级两个层次上检查主体权限

pub mod base;
pub mod list_actions;
pub mod perms_map;
pub mod simple_object;
pub mod viewset;
pub mod viewset_without_model;

pub use base::{
    check_object_permissions, check_permissions, resolve_object, BasePermission, IsAuthenticated,
    PermissionStack, Request, Viewset,
};
pub use list_actions::{ListActionRegistry, RouteRegistration};
pub use perms_map::{BarePermissionMap, PermissionTemplate, TemplatedPermissionMap};
pub use simple_object::{PermissionRequiredApi, SimpleObjectPermissions};
pub use viewset::{GenericViewsetPermissions, DEFAULT_LIST_ROUTES};
pub use viewset_without_model::GenericViewsetWithoutModelPermissions;
