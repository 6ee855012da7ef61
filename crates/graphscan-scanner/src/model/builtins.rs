//! Shared builtin type descriptors
use crate::model::types::{TypeInfo, TypeRef, ValueKind};
use once_cell::sync::Lazy;

pub static BOOL: Lazy<TypeRef> = Lazy::new(|| TypeInfo::value("bool", ValueKind::Bool));
pub static CHAR: Lazy<TypeRef> = Lazy::new(|| TypeInfo::value("char", ValueKind::Char));
pub static INTEGER: Lazy<TypeRef> = Lazy::new(|| TypeInfo::value("i64", ValueKind::Integer));
pub static FLOAT: Lazy<TypeRef> = Lazy::new(|| TypeInfo::value("f64", ValueKind::Float));
pub static TEXT: Lazy<TypeRef> = Lazy::new(|| TypeInfo::value("String", ValueKind::Text));
pub static UUID: Lazy<TypeRef> = Lazy::new(|| TypeInfo::value("Uuid", ValueKind::Uuid));

/// Marker interface for host collections that yield elements
pub static ITERABLE: Lazy<TypeRef> =
    Lazy::new(|| TypeInfo::interface("Iterable").iterable().build());

/// All builtin descriptors, for seeding a registry
pub fn all() -> Vec<TypeRef> {
    vec![
        BOOL.clone(),
        CHAR.clone(),
        INTEGER.clone(),
        FLOAT.clone(),
        TEXT.clone(),
        UUID.clone(),
        ITERABLE.clone(),
    ]
}
