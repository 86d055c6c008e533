//! 动作到权限字符串的映射
//!
//! - [`TemplatedPermissionMap`]: 权限模板按资源描述合成，内置六个 CRUD 动作的默认映射，
//!   构造时与覆盖映射合并（覆盖只替换出现的键）
//! - [`BarePermissionMap`]: 调用方直接提供权限字符串，没有默认映射
//!
//! 一个动作映射的所有权限必须全部满足才允许执行该动作。

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::core::{actions, PermissionError, PermissionResult, ResourceDescriptor};

const FIELD_NAMESPACE: &str = "namespace";
const FIELD_TYPE_NAME: &str = "type_name";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("占位符正则必须合法"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Namespace,
    TypeName,
}

/// 已校验的权限模板，例如 `{namespace}.view_{type_name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PermissionTemplate {
    /// 解析模板，只接受 `{namespace}` 和 `{type_name}` 两个字段
    pub fn parse(raw: &str) -> PermissionResult<Self> {
        let invalid = |reason: &str| PermissionError::InvalidTemplate {
            template: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("模板为空"));
        }

        let mut segments = Vec::new();
        let mut last = 0;
        for caps in placeholder_pattern().captures_iter(raw) {
            let (Some(whole), Some(field)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_literal(&mut segments, &raw[last..whole.start()]).map_err(|_| invalid("花括号未闭合"))?;
            segments.push(match field.as_str() {
                FIELD_NAMESPACE => Segment::Namespace,
                FIELD_TYPE_NAME => Segment::TypeName,
                other => return Err(invalid(&format!("未知字段 {:?}", other))),
            });
            last = whole.end();
        }
        push_literal(&mut segments, &raw[last..]).map_err(|_| invalid("花括号未闭合"))?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// `{namespace}.{verb}_{type_name}`
    fn for_verb(verb: &str) -> Self {
        Self {
            raw: format!("{{{}}}.{}_{{{}}}", FIELD_NAMESPACE, verb, FIELD_TYPE_NAME),
            segments: vec![
                Segment::Namespace,
                Segment::Literal(format!(".{}_", verb)),
                Segment::TypeName,
            ],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 用资源描述替换字段
    pub fn render(&self, resource: &ResourceDescriptor) -> String {
        let mut out = String::with_capacity(self.raw.len() + resource.namespace.len() + resource.type_name.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Namespace => out.push_str(&resource.namespace),
                Segment::TypeName => out.push_str(&resource.type_name),
            }
        }
        out
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<(), ()> {
    if text.contains('{') || text.contains('}') {
        return Err(());
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

impl FromStr for PermissionTemplate {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PermissionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 模板化的动作权限映射
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedPermissionMap {
    entries: HashMap<String, Vec<PermissionTemplate>>,
}

impl TemplatedPermissionMap {
    /// 默认的 CRUD 映射
    pub fn defaults() -> Self {
        let view = PermissionTemplate::for_verb("view");
        let add = PermissionTemplate::for_verb("add");
        let change = PermissionTemplate::for_verb("change");
        let delete = PermissionTemplate::for_verb("delete");

        let entries = [
            (actions::LIST, vec![view.clone()]),
            (actions::RETRIEVE, vec![view]),
            (actions::CREATE, vec![add]),
            (actions::UPDATE, vec![change.clone()]),
            (actions::PARTIAL_UPDATE, vec![change]),
            (actions::DESTROY, vec![delete]),
        ]
        .into_iter()
        .map(|(action, templates)| (action.to_string(), templates))
        .collect();

        Self { entries }
    }

    /// 默认映射合并覆盖映射，覆盖中的模板在这里校验
    pub fn with_overrides<I, K, V>(overrides: I) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut map = Self::defaults();
        for (action, templates) in overrides {
            let parsed = templates
                .iter()
                .map(|template| PermissionTemplate::parse(template.as_ref()))
                .collect::<PermissionResult<Vec<_>>>()?;
            map.entries.insert(action.into(), parsed);
        }
        Ok(map)
    }

    pub fn get(&self, action: &str) -> Option<&[PermissionTemplate]> {
        self.entries.get(action).map(Vec::as_slice)
    }

    pub fn contains(&self, action: &str) -> bool {
        self.entries.contains_key(action)
    }

    /// 已映射的动作，按名称排序
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    /// 渲染动作需要的权限，动作未映射时返回 `None`
    pub fn render(&self, action: &str, resource: &ResourceDescriptor) -> Option<Vec<String>> {
        self.get(action).map(|templates| {
            templates
                .iter()
                .map(|template| template.render(resource))
                .collect()
        })
    }
}

impl Default for TemplatedPermissionMap {
    fn default() -> Self {
        Self::defaults()
    }
}

/// 字面量权限映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarePermissionMap {
    entries: HashMap<String, Vec<String>>,
}

impl BarePermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加一个动作
    pub fn with<S>(mut self, action: impl Into<String>, perms: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        self.entries
            .insert(action.into(), perms.into_iter().map(Into::into).collect());
        self
    }

    pub fn get(&self, action: &str) -> Option<&[String]> {
        self.entries.get(action).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }
}

impl<K, S> FromIterator<(K, Vec<S>)> for BarePermissionMap
where
    K: Into<String>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Vec<S>)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|(action, perms)| (action.into(), perms.into_iter().map(Into::into).collect()))
            .collect();
        Self { entries }
    }
}
