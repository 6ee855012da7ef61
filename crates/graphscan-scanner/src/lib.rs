//! # graphscan-scanner
//!
//! Identity-based object graph scanner.
//!
//! Starting from a root object, the scanner walks everything reachable
//! through fields, arrays and element-producing collections, and reports
//! every object whose type is assignable to one of the requested target
//! types. Traversal is breadth-first, visits each object once by identity,
//! and stops at value types, static fields, back-references to the parent
//! and anything the filter chain rejects.
//!
//! ## Key Features
//!
//! - **Capability based**: host objects implement `Introspect`; `DynObject` covers
//!   runtime-built graphs
//! - **Layered exclusion**: static blacklist, dynamic filters, reloadable YAML rules
//! - **Failure isolation**: unreadable fields and panicking host code are reported per node
//! - **Parallel roots**: `scan_all` spreads independent roots over rayon
//!
//! ## Example
//!
//! ```ignore
//! use graphscan_scanner::{BlacklistSeed, ObjectScanner, TypeRegistry};
//!
//! let registry = TypeRegistry::with_builtins();
//! let mut scanner = ObjectScanner::new(vec![BlacklistSeed::prefix("host.internal.")], &registry);
//! scanner.initialize();
//! let matches = scanner.scan(&[target_type], Some(&root))?;
//! ```

pub mod collector;
pub mod core;
pub mod diagnostics;
pub mod filter;
pub mod model;
pub mod unpackers;

pub use collector::{ScanMatch, ScanOutcome, ScanStats};
pub use crate::core::{IdentitySet, ObjectScanner, ScannerOptions, WorkItem};
pub use diagnostics::{FieldError, NodeFailure};
pub use filter::{
    Blacklist, BlacklistEntry, BlacklistSeed, ConfigurableFilter, FilterChain, FilterConfig,
    FilterConfigSource, FilterRef, FilterRegistry, FilterRule, FilterRuleConfig, ScanFilter,
    YamlFileSource,
};
pub use model::{
    DynObject, FieldInfo, FieldRef, Introspect, ObjectId, ObjectRef, TypeInfo, TypeKind, TypeRef,
    TypeRegistry, TypeResolver, ValueKind, Visibility, builtins, same_object,
};
pub use unpackers::{
    AccessOverride, ArrayUnpacker, Candidate, FieldUnpacker, SequenceUnpacker, UnpackContext,
    Unpacker,
};

/// Canonical result type for this crate
pub use graphscan_error::{GraphScanError, Result};
