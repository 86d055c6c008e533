//! 列表动作注册表
//!
//! 列表动作不针对单个已存在的对象，权限检查时不会调用 `get_object()`。
//! 路由在注册时显式声明是否为详情路由；注册表按视图集类型缓存由路由推导出的动作集合。

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::api::permission::base::Viewset;
use crate::core::HttpMethod;

/// 视图集上额外注册的路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    pub name: String,
    pub methods: Vec<HttpMethod>,
    /// 是否作用于单个对象
    pub detail: bool,
}

impl RouteRegistration {
    /// 集合级路由
    pub fn collection(name: impl Into<String>, methods: &[HttpMethod]) -> Self {
        Self {
            name: name.into(),
            methods: methods.to_vec(),
            detail: false,
        }
    }

    /// 详情路由
    pub fn detail(name: impl Into<String>, methods: &[HttpMethod]) -> Self {
        Self {
            name: name.into(),
            methods: methods.to_vec(),
            detail: true,
        }
    }

    /// 非详情路由且只绑定 HEAD/GET/POST 时视为列表动作
    pub fn is_list_action(&self) -> bool {
        !self.detail
            && !self.methods.is_empty()
            && self.methods.iter().all(HttpMethod::is_collection_safe)
    }
}

/// 按视图集类型缓存的列表动作
///
/// 缓存值只由静态路由注册推导，计算是幂等的：并发未命中时可能重复计算，
/// 先写入者生效，读到的始终是同一个不可变集合
#[derive(Debug, Default)]
pub struct ListActionRegistry {
    sets: DashMap<&'static str, Arc<HashSet<String>>>,
    computations: AtomicUsize,
}

static SHARED_REGISTRY: OnceLock<Arc<ListActionRegistry>> = OnceLock::new();

impl ListActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程内共享的注册表
    pub fn shared() -> Arc<ListActionRegistry> {
        SHARED_REGISTRY
            .get_or_init(|| Arc::new(ListActionRegistry::new()))
            .clone()
    }

    /// 获取视图集路由推导出的列表动作
    pub fn route_actions(&self, view: &dyn Viewset) -> Arc<HashSet<String>> {
        let class_id = view.class_id();
        if let Some(actions) = self.sets.get(class_id) {
            return Arc::clone(actions.value());
        }

        // 计算期间不持有任何分片锁
        let computed: HashSet<String> = view
            .routes()
            .iter()
            .filter(|route| route.is_list_action())
            .map(|route| route.name.clone())
            .collect();
        self.computations.fetch_add(1, Ordering::Relaxed);
        log::debug!("视图集 {} 的列表路由: {:?}", class_id, computed);

        let entry = self.sets.entry(class_id).or_insert_with(|| Arc::new(computed));
        Arc::clone(entry.value())
    }

    /// 视图集类型被重新定义时清除缓存
    pub fn invalidate(&self, class_id: &str) -> bool {
        self.sets.remove(class_id).is_some()
    }

    pub fn clear(&self) {
        self.sets.clear();
    }

    pub fn cached_classes(&self) -> usize {
        self.sets.len()
    }

    /// 累计计算次数
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::permission::base::Request;
    use crate::core::{ObjectRef, PermissionError, PermissionResult};

    struct ReportViewset {
        routes: Vec<RouteRegistration>,
    }

    impl Viewset for ReportViewset {
        fn class_id(&self) -> &'static str {
            "ReportViewset"
        }

        fn action(&self) -> Option<&str> {
            None
        }

        fn routes(&self) -> &[RouteRegistration] {
            &self.routes
        }

        fn get_object(&self, _request: &Request<'_>) -> PermissionResult<ObjectRef> {
            Err(PermissionError::MissingPermissionRequired)
        }
    }

    fn report_viewset() -> ReportViewset {
        ReportViewset {
            routes: vec![
                RouteRegistration::collection("summary", &[HttpMethod::Get]),
                RouteRegistration::collection("export", &[HttpMethod::Get, HttpMethod::Post]),
                RouteRegistration::collection("purge", &[HttpMethod::Delete]),
                RouteRegistration::collection("rebuild", &[HttpMethod::Post, HttpMethod::Put]),
                RouteRegistration::detail("publish", &[HttpMethod::Post]),
                RouteRegistration::collection("unbound", &[]),
            ],
        }
    }

    #[test]
    fn test_route_is_list_action() {
        assert!(RouteRegistration::collection("a", &[HttpMethod::Head]).is_list_action());
        assert!(!RouteRegistration::collection("b", &[HttpMethod::Patch]).is_list_action());
        assert!(!RouteRegistration::detail("c", &[HttpMethod::Get]).is_list_action());
    }

    #[test]
    fn test_route_actions_filters_routes() {
        let registry = ListActionRegistry::new();
        let actions = registry.route_actions(&report_viewset());

        let expected: HashSet<String> = ["summary", "export"].iter().map(|s| s.to_string()).collect();
        assert_eq!(*actions, expected);
    }

    #[test]
    fn test_route_actions_cached_per_class() {
        let registry = ListActionRegistry::new();
        let first = registry.route_actions(&report_viewset());
        // 同一类型的另一个实例命中缓存
        let second = registry.route_actions(&ReportViewset { routes: Vec::new() });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.computations(), 1);
        assert_eq!(registry.cached_classes(), 1);
    }

    #[test]
    fn test_invalidate_recomputes() {
        let registry = ListActionRegistry::new();
        registry.route_actions(&report_viewset());

        assert!(registry.invalidate("ReportViewset"));
        assert!(!registry.invalidate("ReportViewset"));

        let actions = registry.route_actions(&ReportViewset { routes: Vec::new() });
        assert!(actions.is_empty());
        assert_eq!(registry.computations(), 2);
    }
}
