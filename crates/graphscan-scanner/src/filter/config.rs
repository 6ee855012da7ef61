//! Configuration-driven filter
//!
//! Rules come from a `FilterConfigSource`, normally a YAML file:
//!
//! ```yaml
//! blacklist:
//!   - type: host.session.PlayerEntry
//!     field: inventory
//!   - prefix: "host.internal."
//!   - pattern: '^host\.net\..*Packet$'
//! ```
//!
//! A loaded rule set replaces the previous one in a single swap, so scans
//! running during a reload see either the old rules or the new ones.
use crate::filter::registry::ScanFilter;
use crate::model::{FieldInfo, TypeInfo};
use graphscan_error::{GraphScanError, Result};
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Raw filter configuration as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub blacklist: Vec<FilterRuleConfig>,
}

/// One configured rule. Exactly one of `type`, `prefix` or `pattern` must be set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterRuleConfig {
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    /// Field name for `type` rules, field regex for `pattern` rules
    #[serde(default)]
    pub field: Option<String>,
}

/// Compiled rule
#[derive(Debug, Clone)]
pub enum FilterRule {
    /// Type (or any type extending it) by exact name, optionally narrowed to one field
    Type { name: String, field: Option<String> },
    Prefix(String),
    Pattern { types: Regex, field: Option<Regex> },
}

impl FilterRule {
    pub fn matches(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        match self {
            FilterRule::Type { name, field: wanted } => {
                ty.conforms_to_name(name)
                    && match wanted {
                        None => true,
                        Some(wanted) => field.is_some_and(|f| f.name() == wanted),
                    }
            }
            FilterRule::Prefix(prefix) => ty.name().starts_with(prefix.as_str()),
            FilterRule::Pattern { types, field: wanted } => {
                types.is_match(ty.name())
                    && match wanted {
                        None => true,
                        Some(wanted) => field.is_some_and(|f| wanted.is_match(f.name())),
                    }
            }
        }
    }
}

impl FilterConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            GraphScanError::config_invalid_format(format!("Failed to parse filter rules: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                GraphScanError::config_not_found(format!(
                    "Filter configuration not found: {}",
                    path.display()
                ))
                .with_config_path(path)
            } else {
                GraphScanError::io_with_path(
                    format!("Failed to read filter configuration: {e}"),
                    path,
                )
            }
        })?;
        Self::from_yaml_str(&content).map_err(|e| e.with_config_path(path))
    }

    /// Validate and compile every rule. Any invalid rule fails the whole set.
    pub fn compile(&self) -> Result<Vec<FilterRule>> {
        self.blacklist
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.compile(index))
            .collect()
    }
}

impl FilterRuleConfig {
    fn compile(&self, index: usize) -> Result<FilterRule> {
        let invalid =
            |reason: &str| GraphScanError::config_invalid_value(format!("rule #{index}: {reason}"));
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        let field = self.field.clone();
        if field.as_deref() == Some("") {
            return Err(invalid("empty field"));
        }

        match (
            non_empty(&self.type_name),
            non_empty(&self.prefix),
            non_empty(&self.pattern),
        ) {
            (Some(name), None, None) => Ok(FilterRule::Type {
                name: name.to_string(),
                field,
            }),
            (None, Some(prefix), None) => {
                if field.is_some() {
                    return Err(invalid("prefix rules take no field"));
                }
                Ok(FilterRule::Prefix(prefix.to_string()))
            }
            (None, None, Some(pattern)) => {
                let types = Regex::new(pattern)
                    .map_err(|e| invalid(&format!("bad type pattern '{pattern}': {e}")))?;
                let field = field
                    .map(|f| {
                        Regex::new(&f)
                            .map_err(|e| invalid(&format!("bad field pattern '{f}': {e}")))
                    })
                    .transpose()?;
                Ok(FilterRule::Pattern { types, field })
            }
            _ => Err(invalid("exactly one of 'type', 'prefix' or 'pattern' is required")),
        }
    }
}

/// Where the configurable filter reads its rules from
pub trait FilterConfigSource: Send + Sync {
    fn load(&self) -> Result<FilterConfig>;

    fn describe(&self) -> String;
}

/// YAML file on disk, re-read on every load
#[derive(Debug, Clone)]
pub struct YamlFileSource {
    path: PathBuf,
}

impl YamlFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FilterConfigSource for YamlFileSource {
    fn load(&self) -> Result<FilterConfig> {
        FilterConfig::from_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl FilterConfigSource for FilterConfig {
    fn load(&self) -> Result<FilterConfig> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} rules)", self.blacklist.len())
    }
}

/// Reloadable rule-driven filter. Accepts everything until rules are loaded.
#[derive(Default)]
pub struct ConfigurableFilter {
    source: Option<Arc<dyn FilterConfigSource>>,
    rules: RwLock<Arc<Vec<FilterRule>>>,
}

impl ConfigurableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: Arc<dyn FilterConfigSource>) -> Self {
        Self {
            source: Some(source),
            rules: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn set_source(&mut self, source: Arc<dyn FilterConfigSource>) {
        self.source = Some(source);
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Reload rules from the source and return how many are active.
    ///
    /// On failure the previously loaded rules stay in effect.
    pub fn load_config(&self) -> Result<usize> {
        let source = self.source.as_ref().ok_or_else(|| {
            GraphScanError::config_not_found("No filter configuration source set")
        })?;
        debug!("Loading filter rules from {}", source.describe());
        let rules = source.load()?.compile()?;
        let count = rules.len();
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(rules);
        info!("Loaded {count} filter rules from {}", source.describe());
        Ok(count)
    }

    pub fn rule_count(&self) -> usize {
        self.snapshot().len()
    }

    fn snapshot(&self) -> Arc<Vec<FilterRule>> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScanFilter for ConfigurableFilter {
    fn accept(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        !self.snapshot().iter().any(|rule| rule.matches(ty, field))
    }
}

impl std::fmt::Debug for ConfigurableFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurableFilter")
            .field("source", &self.source.as_ref().map(|s| s.describe()))
            .field("rules", &self.rule_count())
            .finish()
    }
}
