//! 权限检查的基础契约
//!
//! - [`Request`]: 请求方法、当前主体以及调试模式标记
//! - [`Viewset`]: 宿主框架的视图集，提供当前动作、资源描述、路由注册和对象解析
//! - [`BasePermission`]: 单个权限策略，视图按顺序组合成权限栈

use std::sync::Arc;

use crate::api::permission::list_actions::RouteRegistration;
use crate::core::{HttpMethod, ObjectRef, PermissionError, PermissionResult, Principal, ResourceDescriptor};

/// 权限检查所需的请求上下文
#[derive(Clone, Copy)]
pub struct Request<'a> {
    pub method: HttpMethod,
    pub user: &'a dyn Principal,
    /// 是否处于调试/自省模式
    pub debug: bool,
}

impl<'a> Request<'a> {
    pub fn new(method: HttpMethod, user: &'a dyn Principal) -> Self {
        Self {
            method,
            user,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// 调试模式下的 OPTIONS 请求（可浏览 API 工具探测权限时使用）
    pub fn is_debug_options(&self) -> bool {
        self.method == HttpMethod::Options && self.debug
    }
}

/// 宿主框架的视图集
pub trait Viewset {
    /// 视图集类型标识，同一类型的所有实例共享列表动作缓存
    fn class_id(&self) -> &'static str;

    /// 当前动作，自省调用时为 `None`
    fn action(&self) -> Option<&str>;

    /// 视图集关联的资源类型
    fn resource(&self) -> Option<ResourceDescriptor> {
        None
    }

    /// 注册的额外路由
    fn routes(&self) -> &[RouteRegistration] {
        &[]
    }

    /// 单一权限视图声明的权限字符串
    fn permission_required(&self) -> Option<&str> {
        None
    }

    /// 解析并授权当前目标对象
    ///
    /// 实现需要自行执行对象级权限检查（通常通过 [`resolve_object`]），
    /// 对象不存在或被拒绝时返回对应错误
    fn get_object(&self, request: &Request<'_>) -> PermissionResult<ObjectRef>;
}

/// 单个权限策略
pub trait BasePermission: Send + Sync {
    fn name(&self) -> &'static str;

    fn has_permission(&self, _request: &Request<'_>, _view: &dyn Viewset) -> PermissionResult<bool> {
        Ok(true)
    }

    fn has_object_permission(
        &self,
        _request: &Request<'_>,
        _view: &dyn Viewset,
        _obj: &ObjectRef,
    ) -> PermissionResult<bool> {
        Ok(true)
    }
}

/// 视图的权限栈，按顺序检查
pub type PermissionStack = Vec<Arc<dyn BasePermission>>;

/// 只要求主体已认证
#[derive(Debug, Default, Clone, Copy)]
pub struct IsAuthenticated;

impl BasePermission for IsAuthenticated {
    fn name(&self) -> &'static str {
        "IsAuthenticated"
    }

    fn has_permission(&self, request: &Request<'_>, _view: &dyn Viewset) -> PermissionResult<bool> {
        Ok(request.user.is_authenticated())
    }
}

fn denied(request: &Request<'_>, view: &dyn Viewset) -> PermissionError {
    if !request.user.is_authenticated() {
        return PermissionError::NotAuthenticated;
    }
    PermissionError::PermissionDenied {
        action: view.action().unwrap_or("<none>").to_string(),
    }
}

/// 依次执行权限栈的请求级检查
///
/// 第一个返回 `false` 的策略将被转换为 `NotAuthenticated` 或 `PermissionDenied`，
/// 策略返回的错误原样传播
pub fn check_permissions(
    stack: &[Arc<dyn BasePermission>],
    request: &Request<'_>,
    view: &dyn Viewset,
) -> PermissionResult<()> {
    for permission in stack {
        if !permission.has_permission(request, view)? {
            log::debug!(
                "{} 拒绝 {} 执行 {}::{:?}",
                permission.name(),
                request.user.identifier(),
                view.class_id(),
                view.action()
            );
            return Err(denied(request, view));
        }
    }
    Ok(())
}

/// 依次执行权限栈的对象级检查
pub fn check_object_permissions(
    stack: &[Arc<dyn BasePermission>],
    request: &Request<'_>,
    view: &dyn Viewset,
    obj: &ObjectRef,
) -> PermissionResult<()> {
    for permission in stack {
        if !permission.has_object_permission(request, view, obj)? {
            log::debug!(
                "{} 拒绝 {} 访问对象 {}",
                permission.name(),
                request.user.identifier(),
                obj
            );
            return Err(denied(request, view));
        }
    }
    Ok(())
}

/// 查找对象并执行对象级检查
///
/// `lookup` 返回 `None` 时得到 `ObjectNotFound`，对象级检查失败时得到
/// `PermissionDenied`（或 `NotAuthenticated`）
pub fn resolve_object<F>(
    stack: &[Arc<dyn BasePermission>],
    request: &Request<'_>,
    view: &dyn Viewset,
    pk: &str,
    lookup: F,
) -> PermissionResult<ObjectRef>
where
    F: FnOnce(&str) -> Option<ObjectRef>,
{
    let obj = lookup(pk).ok_or_else(|| PermissionError::ObjectNotFound {
        resource: view
            .resource()
            .map(|resource| resource.to_string())
            .unwrap_or_else(|| view.class_id().to_string()),
        pk: pk.to_string(),
    })?;
    check_object_permissions(stack, request, view, &obj)?;
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Anonymous;

    impl Principal for Anonymous {
        fn identifier(&self) -> &str {
            "anonymous"
        }

        fn is_authenticated(&self) -> bool {
            false
        }

        fn has_perm(&self, _perm: &str, _obj: Option<&ObjectRef>) -> bool {
            false
        }
    }

    struct Member;

    impl Principal for Member {
        fn identifier(&self) -> &str {
            "member"
        }

        fn has_perm(&self, _perm: &str, _obj: Option<&ObjectRef>) -> bool {
            false
        }
    }

    struct NoteViewset;

    impl Viewset for NoteViewset {
        fn class_id(&self) -> &'static str {
            "NoteViewset"
        }

        fn action(&self) -> Option<&str> {
            Some("retrieve")
        }

        fn resource(&self) -> Option<ResourceDescriptor> {
            Some(ResourceDescriptor::new("notes", "note"))
        }

        fn get_object(&self, _request: &Request<'_>) -> PermissionResult<ObjectRef> {
            Err(PermissionError::ObjectNotFound {
                resource: "notes.note".to_string(),
                pk: "0".to_string(),
            })
        }
    }

    struct DenyObjects;

    impl BasePermission for DenyObjects {
        fn name(&self) -> &'static str {
            "DenyObjects"
        }

        fn has_object_permission(
            &self,
            _request: &Request<'_>,
            _view: &dyn Viewset,
            _obj: &ObjectRef,
        ) -> PermissionResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_debug_options_requires_both() {
        let user = Member;
        assert!(Request::new(HttpMethod::Options, &user).with_debug(true).is_debug_options());
        assert!(!Request::new(HttpMethod::Options, &user).is_debug_options());
        assert!(!Request::new(HttpMethod::Get, &user).with_debug(true).is_debug_options());
    }

    #[test]
    fn test_check_permissions_anonymous() {
        let user = Anonymous;
        let request = Request::new(HttpMethod::Get, &user);
        let stack: PermissionStack = vec![Arc::new(IsAuthenticated)];

        let err = check_permissions(&stack, &request, &NoteViewset).unwrap_err();
        assert_eq!(err, PermissionError::NotAuthenticated);
    }

    #[test]
    fn test_check_permissions_authenticated() {
        let user = Member;
        let request = Request::new(HttpMethod::Get, &user);
        let stack: PermissionStack = vec![Arc::new(IsAuthenticated)];

        assert!(check_permissions(&stack, &request, &NoteViewset).is_ok());
    }

    #[test]
    fn test_resolve_object_not_found() {
        let user = Member;
        let request = Request::new(HttpMethod::Get, &user);
        let stack: PermissionStack = vec![Arc::new(IsAuthenticated)];

        let err = resolve_object(&stack, &request, &NoteViewset, "42", |_| None).unwrap_err();
        assert_eq!(
            err,
            PermissionError::ObjectNotFound {
                resource: "notes.note".to_string(),
                pk: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_object_denied() {
        let user = Member;
        let request = Request::new(HttpMethod::Get, &user);
        let stack: PermissionStack = vec![Arc::new(IsAuthenticated), Arc::new(DenyObjects)];
        let note = ObjectRef::new(ResourceDescriptor::new("notes", "note"), "42");

        let err = resolve_object(&stack, &request, &NoteViewset, "42", |_| Some(note.clone()))
            .unwrap_err();
        assert_eq!(
            err,
            PermissionError::PermissionDenied {
                action: "retrieve".to_string()
            }
        );
    }
}
