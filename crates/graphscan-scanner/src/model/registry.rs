use crate::model::builtins;
use crate::model::types::TypeRef;
use std::collections::HashMap;

/// Resolves fully-qualified type names to descriptors.
///
/// Used when turning blacklist seeds into entries; a name the resolver does
/// not know drops the seed.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, name: &str) -> Option<TypeRef>;
}

/// Name-keyed table of type descriptors
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, TypeRef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the builtin value types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for ty in builtins::all() {
            registry.register(ty);
        }
        registry
    }

    /// Register a descriptor, replacing any previous one with the same name
    pub fn register(&mut self, ty: TypeRef) -> &mut Self {
        self.types.insert(ty.name().to_string(), ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        self.types.get(name).cloned()
    }
}

impl FromIterator<TypeRef> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = TypeRef>>(iter: I) -> Self {
        let mut registry = Self::new();
        for ty in iter {
            registry.register(ty);
        }
        registry
    }
}
