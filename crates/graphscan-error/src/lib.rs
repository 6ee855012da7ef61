//! # graphscan-error - Unified Error Handling
//!
//! This crate provides the error system shared by the graphscan crates:
//! - One error type for every domain (scanner state, field access, unpacking,
//!   configuration, I/O)
//! - Contextual information (type names, field names, config paths)
//! - Short summaries for diagnostic logs and longer messages for callers
//!
//! ## Module Organization
//!
//! - [`types`] - Main error type and Result alias
//! - [`kinds`] - Error kind enums for fine-grained categorization
//! - [`helpers`] - Constructors for standardized errors
//! - [`conversions`] - `From` impls, context builders and accessors

pub use kinds::*;
pub use types::*;

pub mod conversions;
pub mod helpers;
pub mod kinds;
pub mod types;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_creation() {
        let err = GraphScanError::scanner("not ready", ScannerErrorKind::Uninitialized);
        assert!(err.is_scanner());
        assert_eq!(err.type_name(), None);
    }

    #[test]
    fn test_error_context() {
        let err = GraphScanError::field_access("denied", FieldAccessErrorKind::Inaccessible)
            .with_type_name("host.edit.Session")
            .with_field_name("history");

        assert_eq!(err.type_name(), Some("host.edit.Session"));
        assert_eq!(err.field_name(), Some("history"));
    }

    #[test]
    fn test_user_message() {
        let err = GraphScanError::config_invalid_format("expected a sequence")
            .with_config_path("/etc/graphscan/filters.yml");

        let msg = err.user_message();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("filters.yml"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GraphScanError = io_err.into();
        assert!(err.is_io());
    }

    #[test]
    fn test_helper_functions() {
        let err = GraphScanError::scanner_uninitialized();
        assert!(err.is_scanner());
        assert_eq!(err.scanner_kind(), Some(&ScannerErrorKind::Uninitialized));

        let err = GraphScanError::unpack_panicked("boom");
        assert!(err.is_unpack());

        let err = GraphScanError::field_sealed("Session", "lock");
        assert!(err.is_field_access());
    }

    #[test]
    fn test_contextual_methods() {
        let err = GraphScanError::io("File not found").with_config_path("/test/filters.yml");
        assert_eq!(err.config_path(), Some(&PathBuf::from("/test/filters.yml")));
    }

    #[test]
    fn test_kind_names_feed_diagnostics() {
        let err = GraphScanError::field_sealed("Session", "lock");
        assert_eq!(err.kind_name(), "FieldAccess/Sealed");
        assert_eq!(err.message(), "field 'lock' of 'Session' is sealed");
    }
}
