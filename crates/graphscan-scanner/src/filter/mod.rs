//! Exclusion filters
//!
//! Three layers decide whether a type, or a field of a type, is off limits:
//! the static blacklist fixed at initialization, dynamic filters added at
//! runtime, and the reloadable configuration filter. They are consulted in
//! that order and the first rejection wins.

pub mod blacklist;
pub mod config;
pub mod registry;

pub use blacklist::{Blacklist, BlacklistEntry, BlacklistSeed};
pub use config::{
    ConfigurableFilter, FilterConfig, FilterConfigSource, FilterRule, FilterRuleConfig,
    YamlFileSource,
};
pub use registry::{FilterRef, FilterRegistry, ScanFilter};

use crate::model::{FieldInfo, TypeInfo};

#[derive(Debug, Default)]
pub struct FilterChain {
    blacklist: Blacklist,
    dynamic: FilterRegistry,
    configurable: ConfigurableFilter,
}

impl FilterChain {
    pub fn new(configurable: ConfigurableFilter) -> Self {
        Self {
            blacklist: Blacklist::default(),
            dynamic: FilterRegistry::new(),
            configurable,
        }
    }

    pub fn is_blacklisted(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        self.blacklist.is_match(ty, field)
            || !self.dynamic.accepts(ty, field)
            || !self.configurable.accept(ty, field)
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub(crate) fn set_blacklist(&mut self, blacklist: Blacklist) {
        self.blacklist = blacklist;
    }

    pub fn dynamic(&self) -> &FilterRegistry {
        &self.dynamic
    }

    pub fn configurable(&self) -> &ConfigurableFilter {
        &self.configurable
    }

    pub(crate) fn configurable_mut(&mut self) -> &mut ConfigurableFilter {
        &mut self.configurable
    }
}
