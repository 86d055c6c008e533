//! 多表继承模型 JSON 序列化修复的版本分派
//!
//! 旧版框架在序列化多表继承模型时会丢失父表字段，各版本需要不同的修复实现；
//! 2.1 起框架自带的序列化器已经修复该问题。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{SerializerShimError, SerializerShimResult};

/// 宿主框架版本（只比较 major.minor）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
}

impl FrameworkVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for FrameworkVersion {
    type Err = SerializerShimError;

    /// 接受 `major.minor` 或 `major.minor.patch`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SerializerShimError::InvalidVersion(s.to_string());
        let mut parts = s.trim().split('.');

        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        if let Some(patch) = parts.next() {
            if patch.parse::<u32>().is_err() {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(major, minor))
    }
}

/// 选中的序列化实现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SerializerBackend {
    /// 1.8 的 `_meta` 结构
    LegacyInheritanceFix18,
    /// 1.9 - 1.11 的 `_meta` 结构
    LegacyInheritanceFix19,
    /// 框架自带的 JSON 序列化器
    Native,
}

impl SerializerBackend {
    pub fn name(&self) -> &'static str {
        match self {
            SerializerBackend::LegacyInheritanceFix18 => "json_orminheritancefix18",
            SerializerBackend::LegacyInheritanceFix19 => "json_orminheritancefix19",
            SerializerBackend::Native => "json",
        }
    }

    /// 修复已经不再需要，将被移除
    pub fn is_deprecated(&self) -> bool {
        matches!(self, SerializerBackend::Native)
    }
}

impl fmt::Display for SerializerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 根据框架版本选择序列化实现
pub fn select_backend(version: FrameworkVersion) -> SerializerShimResult<SerializerBackend> {
    const V1_8: FrameworkVersion = FrameworkVersion::new(1, 8);
    const V1_9: FrameworkVersion = FrameworkVersion::new(1, 9);
    const V1_12: FrameworkVersion = FrameworkVersion::new(1, 12);
    const V2_1: FrameworkVersion = FrameworkVersion::new(2, 1);
    const V2_2: FrameworkVersion = FrameworkVersion::new(2, 2);

    if version < V1_8 {
        return Err(SerializerShimError::Unsupported(version.to_string()));
    }
    if version < V1_9 {
        return Ok(SerializerBackend::LegacyInheritanceFix18);
    }
    if version < V1_12 {
        return Ok(SerializerBackend::LegacyInheritanceFix19);
    }
    if version < V2_1 {
        return Err(SerializerShimError::Untested(version.to_string()));
    }
    if version < V2_2 {
        log::warn!("框架 {} 不再需要继承序列化修复，该兼容层将被移除", version);
        return Ok(SerializerBackend::Native);
    }
    Err(SerializerShimError::Untested(version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(version: &str) -> SerializerShimResult<SerializerBackend> {
        select_backend(version.parse()?)
    }

    #[test]
    fn test_version_parse() {
        assert_eq!("1.11".parse::<FrameworkVersion>(), Ok(FrameworkVersion::new(1, 11)));
        assert_eq!("2.1.7".parse::<FrameworkVersion>(), Ok(FrameworkVersion::new(2, 1)));
        for bad in ["", "2", "two.one", "2.1.x", "2.1.0.1"] {
            assert_eq!(
                bad.parse::<FrameworkVersion>(),
                Err(SerializerShimError::InvalidVersion(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_minor_compared_numerically() {
        assert!(FrameworkVersion::new(1, 9) < FrameworkVersion::new(1, 11));
        assert!(FrameworkVersion::new(1, 12) < FrameworkVersion::new(2, 0));
    }

    #[test]
    fn test_select_backend_ranges() {
        assert!(matches!(select("1.7"), Err(SerializerShimError::Unsupported(_))));
        assert_eq!(select("1.8"), Ok(SerializerBackend::LegacyInheritanceFix18));
        assert_eq!(select("1.9"), Ok(SerializerBackend::LegacyInheritanceFix19));
        assert_eq!(select("1.11.3"), Ok(SerializerBackend::LegacyInheritanceFix19));
        assert!(matches!(select("1.12"), Err(SerializerShimError::Untested(_))));
        assert!(matches!(select("2.0"), Err(SerializerShimError::Untested(_))));
        assert_eq!(select("2.1"), Ok(SerializerBackend::Native));
        assert!(matches!(select("2.2"), Err(SerializerShimError::Untested(_))));
        assert!(matches!(select("3.0"), Err(SerializerShimError::Untested(_))));
    }

    #[test]
    fn test_native_backend_deprecated() {
        assert!(SerializerBackend::Native.is_deprecated());
        assert!(!SerializerBackend::LegacyInheritanceFix19.is_deprecated());
        assert_eq!(SerializerBackend::Native.to_string(), "json");
    }
}
