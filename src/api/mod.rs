pub mod permission;

pub use permission::{
    BasePermission, GenericViewsetPermissions, GenericViewsetWithoutModelPermissions,
    PermissionRequiredApi, Request, SimpleObjectPermissions, Viewset,
};
