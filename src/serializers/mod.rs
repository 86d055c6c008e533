// 序列化兼容层

pub mod orm_inheritance_fix;

pub use orm_inheritance_fix::{select_backend, FrameworkVersion, SerializerBackend};
