//! Object model the scanner walks
//!
//! The scanner never sees concrete host types. Everything it needs comes
//! through the `Introspect` capability and the `TypeInfo` descriptors it
//! hands out.

pub mod builtins;
pub mod dynamic;
pub mod object;
pub mod registry;
pub mod types;

pub use dynamic::{DynObject, Shape};
pub use object::{Introspect, ObjectId, ObjectRef, same_object};
pub use registry::{TypeRegistry, TypeResolver};
pub use types::{
    FieldInfo, FieldRef, Lineage, TypeBuilder, TypeInfo, TypeKind, TypeRef, ValueKind, Visibility,
};
