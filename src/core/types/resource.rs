use serde::{Deserialize, Serialize};
use std::fmt;

/// 资源描述
///
/// 标识被操作的资源类型，权限模板用 `namespace` 和 `type_name` 合成权限字符串，
/// 例如 `{namespace}.view_{type_name}` -> `blog.view_post`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub namespace: String,
    pub type_name: String,
}

impl ResourceDescriptor {
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.type_name)
    }
}

/// 具体对象的引用（资源类型 + 主键）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub resource: ResourceDescriptor,
    pub pk: String,
}

impl ObjectRef {
    pub fn new(resource: ResourceDescriptor, pk: impl Into<String>) -> Self {
        Self {
            resource,
            pk: pk.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.resource, self.pk)
    }
}
