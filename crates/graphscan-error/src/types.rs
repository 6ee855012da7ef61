//! Main error type for the graphscan toolkit
//!
//! `GraphScanError` is the single error type returned across the graphscan
//! crates. Variants are organized by domain and carry the context that the
//! scanner diagnostics need (type and field names, config paths).

use crate::kinds::*;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main unified error type for the graphscan toolkit
#[derive(Error, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GraphScanError {
    /// File system and I/O related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        // Note: We store the source error message instead of the error itself for cloneability
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        source_message: Option<String>,
    },

    /// Scanner lifecycle errors
    #[error("Scanner error: {message}")]
    Scanner {
        message: String,
        kind: ScannerErrorKind,
    },

    /// Errors raised while reading a single field of an object
    #[error("Field access error: {message}")]
    FieldAccess {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        type_name: Option<String>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        field_name: Option<String>,
        kind: FieldAccessErrorKind,
    },

    /// Errors raised by an unpacking strategy for a whole node
    #[error("Unpack error: {message}")]
    Unpack {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        type_name: Option<String>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        unpacker: Option<String>,
        kind: UnpackErrorKind,
    },

    /// Filter configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        config_path: Option<PathBuf>,
        kind: ConfigErrorKind,
    },
}

/// Convenient result type for graphscan operations
pub type Result<T> = std::result::Result<T, GraphScanError>;
