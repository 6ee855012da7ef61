use crate::model::{FieldRef, ObjectId, ObjectRef, TypeRef};
use std::collections::HashSet;

/// A node waiting to be expanded
pub struct WorkItem {
    pub value: ObjectRef,
    pub ty: TypeRef,
    /// The node this one was reached from, `None` for the root
    pub parent: Option<ObjectRef>,
    pub field: Option<FieldRef>,
}

impl WorkItem {
    pub fn root(value: ObjectRef) -> Self {
        let ty = value.runtime_type();
        Self {
            value,
            ty,
            parent: None,
            field: None,
        }
    }
}

/// Objects already expanded in the current scan, by identity.
///
/// Visited objects are kept alive until the set is dropped so that an
/// address cannot be reused by a new allocation mid-scan.
#[derive(Default)]
pub struct IdentitySet {
    ids: HashSet<ObjectId>,
    pinned: Vec<ObjectRef>,
}

impl IdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the object was already present
    pub fn insert(&mut self, value: &ObjectRef) -> bool {
        if !self.ids.insert(ObjectId::of(value)) {
            return false;
        }
        self.pinned.push(value.clone());
        true
    }

    pub fn contains(&self, value: &ObjectRef) -> bool {
        self.ids.contains(&ObjectId::of(value))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
