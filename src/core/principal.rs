//! 主体（Principal）能力定义
//!
//! 主体由宿主框架提供：认证、角色和权限数据的存储都不在本库范围内，
//! 这里只约定策略求值所需的查询接口。

use crate::core::types::ObjectRef;

/// 已认证的行为主体
///
/// `obj` 为 `None` 时是全局（模型级）检查，为 `Some` 时是对象级检查。
pub trait Principal: Send + Sync {
    /// 用于日志的标识
    fn identifier(&self) -> &str;

    /// 是否已认证
    fn is_authenticated(&self) -> bool {
        true
    }

    /// 检查单个权限
    fn has_perm(&self, perm: &str, obj: Option<&ObjectRef>) -> bool;

    /// 检查一组权限，必须全部满足；空列表视为满足
    fn has_perms(&self, perms: &[String], obj: Option<&ObjectRef>) -> bool {
        perms.iter().all(|perm| self.has_perm(perm, obj))
    }
}
