use crate::model::{FieldInfo, TypeInfo, TypeRef, TypeResolver};
use log::debug;
use std::fmt;

/// One exclusion rule fixed at scanner construction
#[derive(Clone)]
pub enum BlacklistEntry {
    /// The type and everything assignable to it
    ExactType(TypeRef),
    /// A named field declared by the entry type or one of its ancestors,
    /// seen on the entry type or any subtype
    ExactTypeField(TypeRef, String),
    /// Every type whose fully-qualified name starts with the prefix
    NamePrefix(String),
}

impl BlacklistEntry {
    pub fn is_match(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        match self {
            BlacklistEntry::ExactType(entry) => entry.is_assignable_from(ty),
            BlacklistEntry::ExactTypeField(entry, name) => {
                let Some(field) = field else {
                    return false;
                };
                field.name() == name
                    && entry.is_assignable_from(ty)
                    && entry.lineage().any(|t| t.name() == field.owner())
            }
            BlacklistEntry::NamePrefix(prefix) => ty.name().starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Debug for BlacklistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlacklistEntry::ExactType(ty) => write!(f, "ExactType({})", ty.name()),
            BlacklistEntry::ExactTypeField(ty, field) => {
                write!(f, "ExactTypeField({}.{})", ty.name(), field)
            }
            BlacklistEntry::NamePrefix(prefix) => write!(f, "NamePrefix({prefix})"),
        }
    }
}

/// Unresolved blacklist candidate supplied by the host
#[derive(Debug, Clone)]
pub enum BlacklistSeed {
    Type(String),
    TypeField(String, String),
    Prefix(String),
    Resolved(BlacklistEntry),
}

impl BlacklistSeed {
    pub fn ty<S: Into<String>>(name: S) -> Self {
        BlacklistSeed::Type(name.into())
    }

    pub fn type_field<S: Into<String>, F: Into<String>>(name: S, field: F) -> Self {
        BlacklistSeed::TypeField(name.into(), field.into())
    }

    pub fn prefix<S: Into<String>>(prefix: S) -> Self {
        BlacklistSeed::Prefix(prefix.into())
    }

    /// Turn the seed into an entry, `None` if it cannot be resolved
    pub fn resolve(&self, resolver: &dyn TypeResolver) -> Option<BlacklistEntry> {
        match self {
            BlacklistSeed::Type(name) => resolver.resolve_type(name).map(BlacklistEntry::ExactType),
            BlacklistSeed::TypeField(name, field) => {
                if field.is_empty() {
                    return None;
                }
                resolver
                    .resolve_type(name)
                    .map(|ty| BlacklistEntry::ExactTypeField(ty, field.clone()))
            }
            BlacklistSeed::Prefix(prefix) => {
                if prefix.is_empty() {
                    None
                } else {
                    Some(BlacklistEntry::NamePrefix(prefix.clone()))
                }
            }
            BlacklistSeed::Resolved(entry) => Some(entry.clone()),
        }
    }
}

impl From<BlacklistEntry> for BlacklistSeed {
    fn from(entry: BlacklistEntry) -> Self {
        BlacklistSeed::Resolved(entry)
    }
}

/// Immutable set of resolved entries
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: Vec<BlacklistEntry>,
}

impl Blacklist {
    pub fn new(entries: Vec<BlacklistEntry>) -> Self {
        Self { entries }
    }

    /// Resolve seeds in order; unresolvable seeds are dropped
    pub fn from_seeds(seeds: &[BlacklistSeed], resolver: &dyn TypeResolver) -> Self {
        let entries = seeds
            .iter()
            .filter_map(|seed| {
                let entry = seed.resolve(resolver);
                if entry.is_none() {
                    debug!("Dropping unresolvable blacklist seed {seed:?}");
                }
                entry
            })
            .collect();
        Self { entries }
    }

    pub fn is_match(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        self.entries.iter().any(|entry| entry.is_match(ty, field))
    }

    pub fn entries(&self) -> &[BlacklistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
