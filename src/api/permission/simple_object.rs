//! 单一权限视图
//!
//! 与按动作映射的策略不同，这里所有请求方法共用视图声明的一个权限，
//! 也不需要视图提供资源描述。

use std::sync::Arc;

use crate::api::permission::base::{BasePermission, IsAuthenticated, PermissionStack, Request, Viewset};
use crate::core::{ObjectRef, PermissionError, PermissionResult};

/// 使用视图 `permission_required` 的全局/对象级检查
///
/// 对象级检查时，如果对象级规则和全局规则同时返回真，说明对象级规则
/// 没有区分对象（例如谓词忽略了对象参数），按安全问题处理并返回错误
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleObjectPermissions;

impl SimpleObjectPermissions {
    fn permission_required(view: &dyn Viewset) -> PermissionResult<&str> {
        view.permission_required().ok_or_else(|| {
            log::warn!("视图 {} 没有声明 permission_required", view.class_id());
            PermissionError::MissingPermissionRequired
        })
    }
}

impl BasePermission for SimpleObjectPermissions {
    fn name(&self) -> &'static str {
        "SimpleObjectPermissions"
    }

    fn has_permission(&self, request: &Request<'_>, view: &dyn Viewset) -> PermissionResult<bool> {
        let perm = Self::permission_required(view)?;
        Ok(request.user.has_perm(perm, None))
    }

    fn has_object_permission(
        &self,
        request: &Request<'_>,
        view: &dyn Viewset,
        obj: &ObjectRef,
    ) -> PermissionResult<bool> {
        let perm = Self::permission_required(view)?;
        let scoped = request.user.has_perm(perm, Some(obj));
        let global = request.user.has_perm(perm, None);

        if scoped && global {
            log::error!(
                "对象级权限与全局权限同时为真: user={} perm={} obj={}",
                request.user.identifier(),
                perm,
                obj
            );
            return Err(PermissionError::SecurityInvariantViolation {
                permission: perm.to_string(),
            });
        }

        Ok(scoped || global)
    }
}

/// 声明单一 `permission_required` 的视图使用的权限栈
///
/// 自定义 `get_object()` 的视图需要自行调用
/// [`check_object_permissions`](crate::api::permission::check_object_permissions)
pub struct PermissionRequiredApi;

impl PermissionRequiredApi {
    pub fn permission_classes() -> PermissionStack {
        vec![Arc::new(IsAuthenticated), Arc::new(SimpleObjectPermissions)]
    }
}
