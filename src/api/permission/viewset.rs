//! 视图集动作权限（依赖资源描述）
//!
//! 检查顺序：
//! 1. 调试模式下的 OPTIONS 请求直接放行
//! 2. 主体全局拥有动作所需的全部权限则放行
//! 3. 动作不是列表动作时调用 `get_object()`，由其完成对象级检查，失败原样传播
//! 4. 其余情况拒绝

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::permission::base::{BasePermission, Request, Viewset};
use crate::api::permission::list_actions::ListActionRegistry;
use crate::api::permission::perms_map::TemplatedPermissionMap;
use crate::core::{actions, ObjectRef, PermissionError, PermissionResult, ResourceDescriptor};

/// 未注册额外路由时不执行对象检查的动作
pub const DEFAULT_LIST_ROUTES: &[&str] = &[actions::LIST, actions::CREATE];

/// 按动作映射模型权限的策略
#[derive(Debug, Clone)]
pub struct GenericViewsetPermissions {
    perms_map: TemplatedPermissionMap,
    default_list_routes: HashSet<String>,
    registry: Arc<ListActionRegistry>,
}

impl GenericViewsetPermissions {
    pub const NAME: &'static str = "GenericViewsetPermissions";

    /// 使用默认映射
    pub fn new() -> Self {
        Self::from_map(TemplatedPermissionMap::defaults())
    }

    /// 默认映射合并覆盖映射
    pub fn with_overrides<I, K, V>(overrides: I) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Ok(Self::from_map(TemplatedPermissionMap::with_overrides(overrides)?))
    }

    pub fn from_map(perms_map: TemplatedPermissionMap) -> Self {
        Self {
            perms_map,
            default_list_routes: DEFAULT_LIST_ROUTES.iter().map(|s| s.to_string()).collect(),
            registry: ListActionRegistry::shared(),
        }
    }

    /// 替换默认列表动作
    pub fn with_default_list_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_list_routes = routes.into_iter().map(Into::into).collect();
        self
    }

    /// 使用独立的列表动作注册表
    pub fn with_registry(mut self, registry: Arc<ListActionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn perms_map(&self) -> &TemplatedPermissionMap {
        &self.perms_map
    }

    pub fn registry(&self) -> &Arc<ListActionRegistry> {
        &self.registry
    }

    /// 动作需要的权限
    pub fn permissions_for_action(
        &self,
        action: Option<&str>,
        resource: &ResourceDescriptor,
    ) -> PermissionResult<Vec<String>> {
        action
            .and_then(|action| self.perms_map.render(action, resource))
            .ok_or_else(|| {
                log::warn!("{} 缺少动作 {:?} 的权限映射", Self::NAME, action);
                PermissionError::improperly_configured(Self::NAME, action)
            })
    }

    /// 动作是否为列表动作（默认列表动作或集合级路由）
    pub fn is_list_action(&self, view: &dyn Viewset, action: Option<&str>) -> bool {
        let Some(action) = action else {
            return false;
        };
        self.default_list_routes.contains(action) || self.registry.route_actions(view).contains(action)
    }

    fn required_permissions(&self, view: &dyn Viewset) -> PermissionResult<Vec<String>> {
        let resource = view
            .resource()
            .ok_or(PermissionError::MissingResource { policy: Self::NAME })?;
        self.permissions_for_action(view.action(), &resource)
    }
}

impl Default for GenericViewsetPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl BasePermission for GenericViewsetPermissions {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn has_permission(&self, request: &Request<'_>, view: &dyn Viewset) -> PermissionResult<bool> {
        // 可浏览 API 在没有真实请求上下文时探测权限，只在调试模式下放行
        if request.is_debug_options() {
            log::debug!("调试模式 OPTIONS 请求放行: {}", view.class_id());
            return Ok(true);
        }

        let perms = self.required_permissions(view)?;
        if request.user.has_perms(&perms, None) {
            log::debug!(
                "{} 全局拥有 {:?}，放行 {}::{:?}",
                request.user.identifier(),
                perms,
                view.class_id(),
                view.action()
            );
            return Ok(true);
        }

        if !self.is_list_action(view, view.action()) {
            // get_object() 内部会执行对象级检查
            let obj = view.get_object(request)?;
            log::debug!("{} 通过对象 {} 获得授权", request.user.identifier(), obj);
            return Ok(true);
        }

        log::debug!(
            "{} 缺少 {:?}，拒绝列表动作 {}::{:?}",
            request.user.identifier(),
            perms,
            view.class_id(),
            view.action()
        );
        Ok(false)
    }

    fn has_object_permission(
        &self,
        request: &Request<'_>,
        view: &dyn Viewset,
        obj: &ObjectRef,
    ) -> PermissionResult<bool> {
        if request.is_debug_options() {
            return Ok(true);
        }

        let perms = self.required_permissions(view)?;
        Ok(request.user.has_perms(&perms, Some(obj)))
    }
}
