//! Error conversion implementations and contextual methods
//!
//! This module provides conversions from standard library errors to
//! GraphScanError, plus methods for adding context, checking the domain and
//! rendering messages.

use crate::kinds::*;
use crate::types::GraphScanError;
use std::path::PathBuf;

// === From implementations for standard library types ===

impl From<std::io::Error> for GraphScanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
            source_message: Some(format!("IO Error: {err}")),
        }
    }
}

// === Contextual builder methods ===

impl GraphScanError {
    /// Add type name context
    pub fn with_type_name<T: Into<String>>(mut self, name: T) -> Self {
        let name = name.into();
        match &mut self {
            Self::FieldAccess { type_name, .. } => *type_name = Some(name),
            Self::Unpack { type_name, .. } => *type_name = Some(name),
            _ => {}
        }
        self
    }

    /// Add field name context to field access errors
    pub fn with_field_name<F: Into<String>>(mut self, name: F) -> Self {
        if let Self::FieldAccess { field_name, .. } = &mut self {
            *field_name = Some(name.into());
        }
        self
    }

    /// Name the unpacker an unpack error came from
    pub fn with_unpacker<U: Into<String>>(mut self, name: U) -> Self {
        if let Self::Unpack { unpacker, .. } = &mut self {
            *unpacker = Some(name.into());
        }
        self
    }

    /// Add config path context
    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path),
            Self::Config { config_path, .. } => *config_path = Some(path),
            _ => {}
        }
        self
    }
}

// === Type checking methods ===

impl GraphScanError {
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_scanner(&self) -> bool {
        matches!(self, Self::Scanner { .. })
    }

    pub fn is_field_access(&self) -> bool {
        matches!(self, Self::FieldAccess { .. })
    }

    pub fn is_unpack(&self) -> bool {
        matches!(self, Self::Unpack { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// === Context accessor methods ===

impl GraphScanError {
    /// The bare message without domain prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Io { message, .. }
            | Self::Scanner { message, .. }
            | Self::FieldAccess { message, .. }
            | Self::Unpack { message, .. }
            | Self::Config { message, .. } => message,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::FieldAccess { type_name, .. } => type_name.as_deref(),
            Self::Unpack { type_name, .. } => type_name.as_deref(),
            _ => None,
        }
    }

    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::FieldAccess { field_name, .. } => field_name.as_deref(),
            _ => None,
        }
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Config { config_path, .. } => config_path.as_ref(),
            _ => None,
        }
    }

    pub fn scanner_kind(&self) -> Option<&ScannerErrorKind> {
        match self {
            Self::Scanner { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn config_kind(&self) -> Option<&ConfigErrorKind> {
        match self {
            Self::Config { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// `Domain/Kind` label used where diagnostics name the failure type
    pub fn kind_name(&self) -> String {
        match self {
            Self::Io { .. } => "Io".to_string(),
            Self::Scanner { kind, .. } => format!("Scanner/{}", kind.name()),
            Self::FieldAccess { kind, .. } => format!("FieldAccess/{}", kind.name()),
            Self::Unpack { kind, .. } => format!("Unpack/{}", kind.name()),
            Self::Config { kind, .. } => format!("Config/{}", kind.name()),
        }
    }
}

// === User-friendly message generation ===

impl GraphScanError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File error in '{}': {}", path.display(), message)
                } else {
                    message.clone()
                }
            }
            Self::Scanner { message, .. } => format!("Scanner error: {message}"),
            Self::FieldAccess {
                message,
                type_name,
                field_name,
                ..
            } => {
                let mut msg = format!("Field read failed: {message}");
                if let Some(ty) = type_name {
                    msg.push_str(&format!(" (type: {ty})"));
                }
                if let Some(field) = field_name {
                    msg.push_str(&format!(" (field: {field})"));
                }
                msg
            }
            Self::Unpack {
                message,
                type_name,
                unpacker,
                ..
            } => {
                let mut msg = format!("Unpacking failed: {message}");
                if let Some(name) = unpacker {
                    msg.push_str(&format!(" (unpacker: {name})"));
                }
                if let Some(ty) = type_name {
                    msg.push_str(&format!(" (type: {ty})"));
                }
                msg
            }
            Self::Config {
                message,
                config_path,
                ..
            } => {
                if let Some(path) = config_path {
                    format!("Configuration error in '{}': {}", path.display(), message)
                } else {
                    format!("Configuration error: {message}")
                }
            }
        }
    }

    /// Get a detailed error message with the kind appended
    pub fn debug_message(&self) -> String {
        let mut msg = self.user_message();
        match self {
            Self::Scanner { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::FieldAccess { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Unpack { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Config { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Io { .. } => {}
        }
        msg
    }

    /// Get a short error summary without context details
    pub fn summary(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("I/O: {message}"),
            Self::Scanner { kind, .. } => format!("Scanner: {kind}"),
            Self::FieldAccess { kind, .. } => format!("Field: {kind}"),
            Self::Unpack { kind, .. } => format!("Unpack: {kind}"),
            Self::Config { kind, .. } => format!("Config: {kind}"),
        }
    }
}
