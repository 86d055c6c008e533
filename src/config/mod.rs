use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::api::permission::{
    BarePermissionMap, GenericViewsetPermissions, GenericViewsetWithoutModelPermissions, Request,
    DEFAULT_LIST_ROUTES,
};
use crate::core::{ConfigResult, HttpMethod, Principal};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 调试模式，开启后 OPTIONS 请求跳过模型级策略
    pub debug: bool,
    pub log: LogConfig,
    pub permissions: PermissionsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// 为 false 时输出到 stderr
    pub to_file: bool,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PermissionsConfig {
    /// 不执行对象检查的动作
    pub default_list_routes: Vec<String>,
    /// 覆盖默认的模板映射，只替换出现的动作
    pub actions_to_perms_map: HashMap<String, Vec<String>>,
    /// 无模型视图集使用的字面量映射
    pub without_model: HashMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log: LogConfig::default(),
            permissions: PermissionsConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
            dir: "logs".to_string(),
            file: "actionperm".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            default_list_routes: DEFAULT_LIST_ROUTES.iter().map(|s| s.to_string()).collect(),
            actions_to_perms_map: HashMap::new(),
            without_model: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 按配置构建模型视图集策略，覆盖映射中的模板在这里校验
    pub fn build_viewset_permissions(&self) -> ConfigResult<GenericViewsetPermissions> {
        let overrides = self
            .permissions
            .actions_to_perms_map
            .iter()
            .map(|(action, templates)| (action.as_str(), templates.clone()));
        let policy = GenericViewsetPermissions::with_overrides(overrides)?
            .with_default_list_routes(self.permissions.default_list_routes.iter().cloned());
        Ok(policy)
    }

    /// 按配置构建无模型视图集策略
    pub fn build_without_model_permissions(&self) -> GenericViewsetWithoutModelPermissions {
        let perms_map: BarePermissionMap = self
            .permissions
            .without_model
            .iter()
            .map(|(action, perms)| (action.as_str(), perms.clone()))
            .collect();
        GenericViewsetWithoutModelPermissions::new(perms_map)
    }

    /// 构建携带调试标记的请求上下文
    pub fn request<'a>(&self, method: HttpMethod, user: &'a dyn Principal) -> Request<'a> {
        Request::new(method, user).with_debug(self.debug)
    }
}
