//! 集成测试共享工具模块
//!
//! 提供内存主体和博客文章视图集，供所有集成测试使用

pub mod assertions;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actionperm::api::permission::{
    resolve_object, BasePermission, GenericViewsetPermissions, IsAuthenticated,
    ListActionRegistry, PermissionStack, Request, RouteRegistration, Viewset,
};
use actionperm::core::{ObjectRef, PermissionResult, Principal, ResourceDescriptor};

/// 内存主体
///
/// 全局权限和按主键授予的对象级权限相互独立，
/// 与只在对象参数为空时回答全局权限的认证后端一致
#[derive(Debug, Clone, Default)]
pub struct TestUser {
    name: String,
    authenticated: bool,
    global: HashSet<String>,
    scoped: HashMap<String, HashSet<String>>,
}

impl TestUser {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            authenticated: true,
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: "anonymous".to_string(),
            authenticated: false,
            ..Self::default()
        }
    }

    /// 授予全局权限
    pub fn grant(mut self, perm: &str) -> Self {
        self.global.insert(perm.to_string());
        self
    }

    /// 授予指定对象上的权限
    pub fn grant_on(mut self, pk: &str, perm: &str) -> Self {
        self.scoped
            .entry(pk.to_string())
            .or_default()
            .insert(perm.to_string());
        self
    }
}

impl Principal for TestUser {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn has_perm(&self, perm: &str, obj: Option<&ObjectRef>) -> bool {
        match obj {
            None => self.global.contains(perm),
            Some(obj) => self
                .scoped
                .get(&obj.pk)
                .is_some_and(|perms| perms.contains(perm)),
        }
    }
}

pub fn post_resource() -> ResourceDescriptor {
    ResourceDescriptor::new("blog", "post")
}

pub fn post(pk: &str) -> ObjectRef {
    ObjectRef::new(post_resource(), pk)
}

/// 博客文章视图集
///
/// `get_object()` 按主键查找已存在的文章并执行权限栈的对象级检查，
/// 调用次数记录在 `get_object_calls` 中
pub struct PostViewset {
    pub action: Option<String>,
    pub pk: String,
    pub routes: Vec<RouteRegistration>,
    pub existing: HashSet<String>,
    pub stack: PermissionStack,
    pub get_object_calls: AtomicUsize,
}

impl PostViewset {
    pub fn new(action: Option<&str>, policy: Arc<GenericViewsetPermissions>) -> Self {
        let mut stack: PermissionStack = Vec::new();
        stack.push(Arc::new(IsAuthenticated));
        stack.push(policy);
        Self {
            action: action.map(str::to_string),
            pk: "1".to_string(),
            routes: Vec::new(),
            existing: ["1", "2"].iter().map(|pk| pk.to_string()).collect(),
            stack,
            get_object_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_pk(mut self, pk: &str) -> Self {
        self.pk = pk.to_string();
        self
    }

    pub fn with_routes(mut self, routes: Vec<RouteRegistration>) -> Self {
        self.routes = routes;
        self
    }

    pub fn get_object_calls(&self) -> usize {
        self.get_object_calls.load(Ordering::SeqCst)
    }
}

impl Viewset for PostViewset {
    fn class_id(&self) -> &'static str {
        "PostViewset"
    }

    fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    fn resource(&self) -> Option<ResourceDescriptor> {
        Some(post_resource())
    }

    fn routes(&self) -> &[RouteRegistration] {
        &self.routes
    }

    fn get_object(&self, request: &Request<'_>) -> PermissionResult<ObjectRef> {
        self.get_object_calls.fetch_add(1, Ordering::SeqCst);
        resolve_object(&self.stack, request, self, &self.pk, |pk| {
            self.existing.contains(pk).then(|| post(pk))
        })
    }
}

/// 使用独立列表动作注册表的默认策略
pub fn isolated_policy() -> Arc<GenericViewsetPermissions> {
    Arc::new(GenericViewsetPermissions::new().with_registry(Arc::new(ListActionRegistry::new())))
}

/// 策略作为 `BasePermission` 使用
pub fn as_permission(policy: &Arc<GenericViewsetPermissions>) -> &dyn BasePermission {
    &**policy
}
