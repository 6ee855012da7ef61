//! Runtime-built objects
//!
//! `DynObject` implements `Introspect` over a field table filled in at
//! runtime. Hosts that do not want to hand-write `Introspect` impls can
//! mirror their objects with it, and tests build arbitrary graphs with it,
//! cycles included, since fields can be assigned after construction.
use crate::model::builtins;
use crate::model::object::{Introspect, ObjectRef};
use crate::model::types::{FieldInfo, TypeRef, Visibility};
use graphscan_error::{GraphScanError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// How a `DynObject` exposes its content, derived from its type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Plain,
    Array,
    Sequence,
    Value,
}

pub struct DynObject {
    ty: TypeRef,
    shape: Shape,
    repr: Option<String>,
    // keyed by (declaring type, field name) so shadowed fields stay distinct
    fields: RwLock<HashMap<(String, String), ObjectRef>>,
    elements: RwLock<Vec<Option<ObjectRef>>>,
    element_failure: RwLock<Option<String>>,
}

impl DynObject {
    /// Create an empty object of the given type
    pub fn new(ty: &TypeRef) -> Arc<DynObject> {
        let shape = if ty.is_array() {
            Shape::Array
        } else if ty.is_value_type() {
            Shape::Value
        } else if ty.is_iterable() {
            Shape::Sequence
        } else {
            Shape::Plain
        };
        Arc::new(DynObject {
            ty: ty.clone(),
            shape,
            repr: None,
            fields: RwLock::new(HashMap::new()),
            elements: RwLock::new(Vec::new()),
            element_failure: RwLock::new(None),
        })
    }

    /// An array or sequence object holding `elements`
    pub fn with_elements(ty: &TypeRef, elements: Vec<Option<ObjectRef>>) -> Arc<DynObject> {
        let object = Self::new(ty);
        *object.elements.write().unwrap_or_else(PoisonError::into_inner) = elements;
        object
    }

    /// A leaf value with a display representation
    pub fn value<S: Into<String>>(ty: &TypeRef, repr: S) -> ObjectRef {
        Arc::new(DynObject {
            ty: ty.clone(),
            shape: Shape::Value,
            repr: Some(repr.into()),
            fields: RwLock::new(HashMap::new()),
            elements: RwLock::new(Vec::new()),
            element_failure: RwLock::new(None),
        })
    }

    pub fn text<S: Into<String>>(text: S) -> ObjectRef {
        Self::value(&builtins::TEXT, text)
    }

    pub fn integer(value: i64) -> ObjectRef {
        Self::value(&builtins::INTEGER, value.to_string())
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Assign the most derived field called `name`. `None` clears it.
    pub fn set(&self, name: &str, value: Option<ObjectRef>) -> Result<()> {
        let field = self
            .ty
            .find_field(name)
            .ok_or_else(|| GraphScanError::field_not_declared(self.ty.name(), name))?;
        self.store(field.owner(), name, value);
        Ok(())
    }

    /// Assign a field declared by a specific ancestor
    pub fn set_declared(&self, owner: &str, name: &str, value: Option<ObjectRef>) -> Result<()> {
        let declared = self
            .ty
            .lineage()
            .any(|t| t.name() == owner && t.declared_fields().iter().any(|f| f.name() == name));
        if !declared {
            return Err(GraphScanError::field_not_declared(self.ty.name(), name));
        }
        self.store(owner, name, value);
        Ok(())
    }

    /// Builder form of `set`
    pub fn with(self: Arc<Self>, name: &str, value: ObjectRef) -> Result<Arc<Self>> {
        self.set(name, Some(value))?;
        Ok(self)
    }

    /// Host-side read that ignores accessibility
    pub fn get(&self, name: &str) -> Option<ObjectRef> {
        let field = self.ty.find_field(name)?;
        self.fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(field.owner().to_string(), name.to_string()))
            .cloned()
    }

    pub fn push(&self, element: Option<ObjectRef>) {
        self.elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(element);
    }

    /// Make element production fail with `message` on every call
    pub fn fail_elements<S: Into<String>>(&self, message: S) {
        *self
            .element_failure
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    fn store(&self, owner: &str, name: &str, value: Option<ObjectRef>) {
        let key = (owner.to_string(), name.to_string());
        let mut fields = self.fields.write().unwrap_or_else(PoisonError::into_inner);
        match value {
            Some(value) => {
                fields.insert(key, value);
            }
            None => {
                fields.remove(&key);
            }
        }
    }

    fn snapshot_elements(&self) -> Vec<Option<ObjectRef>> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Introspect for DynObject {
    fn runtime_type(&self) -> TypeRef {
        self.ty.clone()
    }

    fn read_field(&self, field: &FieldInfo) -> Result<Option<ObjectRef>> {
        if !self.ty.declares(field) {
            return Err(GraphScanError::field_not_declared(self.ty.name(), field.name()));
        }
        if field.visibility() == Visibility::Sealed {
            return Err(GraphScanError::field_sealed(field.owner(), field.name()));
        }
        if !field.is_accessible() {
            return Err(GraphScanError::field_inaccessible(field.owner(), field.name()));
        }
        Ok(self
            .fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(field.owner().to_string(), field.name().to_string()))
            .cloned())
    }

    fn array_elements(&self) -> Option<Vec<Option<ObjectRef>>> {
        match self.shape {
            Shape::Array => Some(self.snapshot_elements()),
            _ => None,
        }
    }

    fn produce_elements(&self) -> Option<Result<Vec<Option<ObjectRef>>>> {
        if self.shape != Shape::Sequence {
            return None;
        }
        let failure = self
            .element_failure
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Some(match failure {
            Some(message) => Err(GraphScanError::unpack_elements_unavailable(message)
                .with_type_name(self.ty.name())),
            None => Ok(self.snapshot_elements()),
        })
    }

    fn describe(&self) -> String {
        match &self.repr {
            Some(repr) => format!("{}({})", self.ty.name(), repr),
            None => self.ty.name().to_string(),
        }
    }
}

impl fmt::Debug for DynObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynObject")
            .field("type", &self.ty.name())
            .field("shape", &self.shape)
            .field("repr", &self.repr)
            .finish()
    }
}
