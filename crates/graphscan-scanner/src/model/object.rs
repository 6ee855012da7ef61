use crate::model::types::{FieldInfo, TypeRef};
use graphscan_error::Result;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an object of the host graph
pub type ObjectRef = Arc<dyn Introspect>;

/// Capability a host object exposes so the scanner can walk it.
///
/// Implementations must be cheap to query and must not mutate the object.
/// A panic inside any of these methods is caught by the scanner and reported
/// against the node being unpacked.
pub trait Introspect: Send + Sync {
    /// The dynamic type of this object
    fn runtime_type(&self) -> TypeRef;

    /// Read a field declared by this object's type or one of its ancestors.
    ///
    /// `Ok(None)` is a null field. Implementations should refuse fields for
    /// which `FieldInfo::is_accessible` is false.
    fn read_field(&self, field: &FieldInfo) -> Result<Option<ObjectRef>>;

    /// Elements of an array object, `None` for non-arrays
    fn array_elements(&self) -> Option<Vec<Option<ObjectRef>>> {
        None
    }

    /// Elements produced by iterating this object, `None` if it does not iterate
    fn produce_elements(&self) -> Option<Result<Vec<Option<ObjectRef>>>> {
        None
    }

    /// Short human readable rendering for diagnostics
    fn describe(&self) -> String {
        self.runtime_type().name().to_string()
    }
}

impl fmt::Debug for dyn Introspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = ObjectId(self as *const dyn Introspect as *const () as usize);
        write!(f, "{}@{id}", self.describe())
    }
}

/// Identity of a shared object: the address of its allocation.
///
/// Only stable while some `Arc` to the object is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn of(object: &ObjectRef) -> Self {
        ObjectId(Arc::as_ptr(object) as *const () as usize)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Reference identity, never value equality
pub fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
    ObjectId::of(a) == ObjectId::of(b)
}
