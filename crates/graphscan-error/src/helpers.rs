//! Helper functions for creating standardized errors
//!
//! These keep error messages uniform across the scanner, the unpackers and
//! host `Introspect` implementations.

use crate::kinds::*;
use crate::types::GraphScanError;
use std::path::PathBuf;

impl GraphScanError {
    /// Create a new I/O error
    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io {
            message: message.into(),
            file_path: None,
            source_message: None,
        }
    }

    /// Create a new I/O error with file path context
    pub fn io_with_path<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::Io {
            message: message.into(),
            file_path: Some(path.into()),
            source_message: None,
        }
    }

    /// Create a new scanner error
    pub fn scanner<M: Into<String>>(message: M, kind: ScannerErrorKind) -> Self {
        Self::Scanner {
            message: message.into(),
            kind,
        }
    }

    /// Create a new field access error
    pub fn field_access<M: Into<String>>(message: M, kind: FieldAccessErrorKind) -> Self {
        Self::FieldAccess {
            message: message.into(),
            type_name: None,
            field_name: None,
            kind,
        }
    }

    /// Create a new unpack error
    pub fn unpack<M: Into<String>>(message: M, kind: UnpackErrorKind) -> Self {
        Self::Unpack {
            message: message.into(),
            type_name: None,
            unpacker: None,
            kind,
        }
    }

    /// Create a new configuration error
    pub fn config<M: Into<String>>(message: M, kind: ConfigErrorKind) -> Self {
        Self::Config {
            message: message.into(),
            config_path: None,
            kind,
        }
    }

    // === Scanner Domain Helpers ===

    /// Create the error returned when scanning before `initialize`
    pub fn scanner_uninitialized() -> Self {
        Self::scanner("Class scanner not initialized", ScannerErrorKind::Uninitialized)
    }

    /// Create a scanner error for a worker pool that could not be built
    pub fn scanner_pool_unavailable<M: Into<String>>(message: M) -> Self {
        Self::scanner(message, ScannerErrorKind::PoolUnavailable)
    }

    // === Field Access Domain Helpers ===

    /// Create a field error for a non-public field read without an override
    pub fn field_inaccessible(type_name: &str, field_name: &str) -> Self {
        Self::field_access(
            format!("field '{field_name}' of '{type_name}' is not accessible"),
            FieldAccessErrorKind::Inaccessible,
        )
        .with_type_name(type_name)
        .with_field_name(field_name)
    }

    /// Create a field error for a field that refuses access overrides
    pub fn field_sealed(type_name: &str, field_name: &str) -> Self {
        Self::field_access(
            format!("field '{field_name}' of '{type_name}' is sealed"),
            FieldAccessErrorKind::Sealed,
        )
        .with_type_name(type_name)
        .with_field_name(field_name)
    }

    /// Create a field error for a field the object does not carry
    pub fn field_not_declared(type_name: &str, field_name: &str) -> Self {
        Self::field_access(
            format!("'{type_name}' does not declare field '{field_name}'"),
            FieldAccessErrorKind::NotDeclared,
        )
        .with_type_name(type_name)
        .with_field_name(field_name)
    }

    /// Create a field error reported by host code
    pub fn field_host_failure<M: Into<String>>(message: M) -> Self {
        Self::field_access(message, FieldAccessErrorKind::HostFailure)
    }

    // === Unpack Domain Helpers ===

    /// Create an unpack error for a strategy failure
    pub fn unpack_failed<M: Into<String>>(message: M) -> Self {
        Self::unpack(message, UnpackErrorKind::StrategyFailed)
    }

    /// Create an unpack error for a sequence that could not produce elements
    pub fn unpack_elements_unavailable<M: Into<String>>(message: M) -> Self {
        Self::unpack(message, UnpackErrorKind::ElementsUnavailable)
    }

    /// Create an unpack error from a caught panic payload message
    pub fn unpack_panicked<M: Into<String>>(message: M) -> Self {
        Self::unpack(message, UnpackErrorKind::Panicked)
    }

    // === Config Domain Helpers ===

    /// Create a config error for a missing file
    pub fn config_not_found<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::NotFound)
    }

    /// Create a config error for unparsable content
    pub fn config_invalid_format<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::InvalidFormat)
    }

    /// Create a config error for a well-formed but unusable value
    pub fn config_invalid_value<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::InvalidValue)
    }
}
