//! graphscan - identity-based object graph scanner
//!
//! This is a convenience crate that re-exports the main functionality
//! from the graphscan crates for benchmarking and integration.

pub use graphscan_error::*;
pub use graphscan_scanner::{
    self, BlacklistEntry, BlacklistSeed, DynObject, Introspect, ObjectRef, ObjectScanner,
    ScanMatch, ScanOutcome, ScannerOptions, TypeInfo, TypeRef, TypeRegistry,
};
