/// Runtime type descriptors
///
/// A `TypeInfo` is the scanner's view of a host type: its fully-qualified
/// name, its shape (object, interface, value, array), its ancestors and the
/// fields it declares. Hosts build these once and share them behind `Arc`.
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type TypeRef = Arc<TypeInfo>;
pub type FieldRef = Arc<FieldInfo>;

/// Scalar-like value categories. Values of these types are never expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Char,
    Integer,
    Float,
    Text,
    Uuid,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Object,
    Interface,
    Value(ValueKind),
    /// Array with the given element type
    Array(TypeRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Readable without an override
    Public,
    /// Readable only while an access override is held
    Private,
    /// Never readable, overrides are refused
    Sealed,
}

/// A field declared by a host type
pub struct FieldInfo {
    name: String,
    owner: String,
    visibility: Visibility,
    is_static: bool,
    overrides: AtomicUsize,
}

impl FieldInfo {
    pub fn new<N: Into<String>, O: Into<String>>(
        name: N,
        owner: O,
        visibility: Visibility,
        is_static: bool,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            visibility,
            is_static,
            overrides: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name of the declaring type
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether a read is currently permitted
    pub fn is_accessible(&self) -> bool {
        match self.visibility {
            Visibility::Public => true,
            Visibility::Private => self.overrides.load(Ordering::Acquire) > 0,
            Visibility::Sealed => false,
        }
    }

    /// Number of access overrides currently held on this field
    pub fn override_count(&self) -> usize {
        self.overrides.load(Ordering::Acquire)
    }

    pub(crate) fn open_override(&self) {
        self.overrides.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn close_override(&self) {
        self.overrides.fetch_sub(1, Ordering::AcqRel);
    }

    /// Stable identity of a shared field descriptor
    pub fn identity(field: &FieldRef) -> usize {
        Arc::as_ptr(field) as usize
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .finish()
    }
}

/// Runtime type descriptor.
///
/// Two descriptors denote the same type when their fully-qualified names are
/// equal, so names must be unique within one host.
#[derive(Debug)]
pub struct TypeInfo {
    name: String,
    kind: TypeKind,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    fields: Vec<FieldRef>,
    iterable: bool,
}

impl TypeInfo {
    /// Start building a concrete object type
    pub fn builder<N: Into<String>>(name: N) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Object)
    }

    /// Start building an interface type
    pub fn interface<N: Into<String>>(name: N) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Interface)
    }

    /// A leaf value type (number, text, flag, uuid)
    pub fn value<N: Into<String>>(name: N, kind: ValueKind) -> TypeRef {
        TypeBuilder::new(name.into(), TypeKind::Value(kind)).build()
    }

    /// The array type whose elements are `element`
    pub fn array_of(element: &TypeRef) -> TypeRef {
        Arc::new(TypeInfo {
            name: format!("{}[]", element.name),
            kind: TypeKind::Array(element.clone()),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            iterable: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// Fields declared directly by this type
    pub fn declared_fields(&self) -> &[FieldRef] {
        &self.fields
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array(_))
    }

    pub fn element_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Element type of the innermost dimension of a (possibly nested) array
    pub fn innermost_element(&self) -> Option<&TypeRef> {
        let mut element = self.element_type()?;
        while let Some(inner) = element.element_type() {
            element = inner;
        }
        Some(element)
    }

    pub fn same_type(&self, other: &TypeInfo) -> bool {
        self.name == other.name
    }

    /// This type followed by its superclass chain
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }

    /// True for value types and anything derived from one
    pub fn is_value_type(&self) -> bool {
        self.conforms(&|t| matches!(t.kind, TypeKind::Value(_)))
    }

    /// True if this type or a supertype exposes element iteration
    pub fn is_iterable(&self) -> bool {
        self.conforms(&|t| t.iterable)
    }

    /// True if this type, a superclass, or an implemented interface is named `name`
    pub fn conforms_to_name(&self, name: &str) -> bool {
        self.conforms(&|t| t.name == name)
    }

    /// Whether a value of type `other` may be used where `self` is expected
    pub fn is_assignable_from(&self, other: &TypeInfo) -> bool {
        if let (TypeKind::Array(mine), TypeKind::Array(theirs)) = (&self.kind, &other.kind) {
            return mine.is_assignable_from(theirs);
        }
        other.conforms(&|t| t.same_type(self))
    }

    /// Every field of this type and its ancestors, most derived first
    pub fn all_fields(&self) -> Vec<FieldRef> {
        self.lineage()
            .flat_map(|t| t.fields.iter().cloned())
            .collect()
    }

    /// Look a field up by name, most derived declaration first
    pub fn find_field(&self, name: &str) -> Option<&FieldRef> {
        self.lineage()
            .flat_map(|t| t.fields.iter())
            .find(|f| f.name == name)
    }

    /// Whether `field` is declared somewhere in this type's lineage
    pub fn declares(&self, field: &FieldInfo) -> bool {
        self.lineage()
            .any(|t| t.name == field.owner && t.fields.iter().any(|f| f.name == field.name))
    }

    fn conforms(&self, predicate: &dyn Fn(&TypeInfo) -> bool) -> bool {
        if predicate(self) {
            return true;
        }
        if let Some(parent) = &self.superclass {
            if parent.conforms(predicate) {
                return true;
            }
        }
        self.interfaces.iter().any(|i| i.conforms(predicate))
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterator over a type and its superclass chain
pub struct Lineage<'a> {
    next: Option<&'a TypeInfo>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.superclass.as_deref();
        Some(current)
    }
}

/// Builder for `TypeInfo`
pub struct TypeBuilder {
    name: String,
    kind: TypeKind,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    fields: Vec<(String, Visibility, bool)>,
    iterable: bool,
}

impl TypeBuilder {
    fn new(name: String, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            iterable: false,
        }
    }

    pub fn extends(mut self, parent: &TypeRef) -> Self {
        self.superclass = Some(parent.clone());
        self
    }

    pub fn implements(mut self, interface: &TypeRef) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Mark the type as producing elements when iterated
    pub fn iterable(mut self) -> Self {
        self.iterable = true;
        self
    }

    pub fn field<N: Into<String>>(self, name: N) -> Self {
        self.field_with(name, Visibility::Public, false)
    }

    pub fn private_field<N: Into<String>>(self, name: N) -> Self {
        self.field_with(name, Visibility::Private, false)
    }

    pub fn sealed_field<N: Into<String>>(self, name: N) -> Self {
        self.field_with(name, Visibility::Sealed, false)
    }

    pub fn static_field<N: Into<String>>(self, name: N) -> Self {
        self.field_with(name, Visibility::Public, true)
    }

    pub fn field_with<N: Into<String>>(
        mut self,
        name: N,
        visibility: Visibility,
        is_static: bool,
    ) -> Self {
        self.fields.push((name.into(), visibility, is_static));
        self
    }

    pub fn build(self) -> TypeRef {
        let owner = self.name.clone();
        let fields = self
            .fields
            .into_iter()
            .map(|(name, visibility, is_static)| {
                Arc::new(FieldInfo::new(name, owner.as_str(), visibility, is_static))
            })
            .collect();
        Arc::new(TypeInfo {
            name: self.name,
            kind: self.kind,
            superclass: self.superclass,
            interfaces: self.interfaces,
            fields,
            iterable: self.iterable,
        })
    }
}
