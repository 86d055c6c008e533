//! 视图集动作权限（不依赖资源描述）
//!
//! 用于没有关联资源类型的视图集。没有默认映射，权限字符串原样使用。
//! 与 [`GenericViewsetPermissions`](super::GenericViewsetPermissions) 不同：
//! 这里不区分调试模式，当前动作为 `None` 的请求级检查一律放行。

use crate::api::permission::base::{BasePermission, Request, Viewset};
use crate::api::permission::perms_map::BarePermissionMap;
use crate::core::{ObjectRef, PermissionError, PermissionResult};

#[derive(Debug, Clone, Default)]
pub struct GenericViewsetWithoutModelPermissions {
    perms_map: BarePermissionMap,
}

impl GenericViewsetWithoutModelPermissions {
    pub const NAME: &'static str = "GenericViewsetWithoutModelPermissions";

    pub fn new(perms_map: BarePermissionMap) -> Self {
        Self { perms_map }
    }

    pub fn perms_map(&self) -> &BarePermissionMap {
        &self.perms_map
    }

    pub fn permissions_for_action(&self, action: Option<&str>) -> PermissionResult<Vec<String>> {
        action
            .and_then(|action| self.perms_map.get(action))
            .map(<[String]>::to_vec)
            .ok_or_else(|| {
                log::warn!("{} 缺少动作 {:?} 的权限映射", Self::NAME, action);
                PermissionError::improperly_configured(Self::NAME, action)
            })
    }
}

impl BasePermission for GenericViewsetWithoutModelPermissions {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn has_permission(&self, request: &Request<'_>, view: &dyn Viewset) -> PermissionResult<bool> {
        // OPTIONS 等自省调用没有动作
        let Some(action) = view.action() else {
            return Ok(true);
        };

        let perms = self.permissions_for_action(Some(action))?;
        Ok(request.user.has_perms(&perms, None))
    }

    fn has_object_permission(
        &self,
        request: &Request<'_>,
        view: &dyn Viewset,
        obj: &ObjectRef,
    ) -> PermissionResult<bool> {
        let perms = self.permissions_for_action(view.action())?;
        Ok(request.user.has_perms(&perms, Some(obj)))
    }
}
