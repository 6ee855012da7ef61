//! Error kind enums for the different scanner domains
//!
//! These provide fine-grained classification for programmatic handling and
//! are what the diagnostic log prints in place of an exception class name.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Specific kinds of scanner state errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScannerErrorKind {
    #[error("Scanner not initialized")]
    Uninitialized,
    #[error("Worker pool unavailable")]
    PoolUnavailable,
}

/// Specific kinds of field access errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldAccessErrorKind {
    #[error("Field not accessible")]
    Inaccessible,
    #[error("Field is sealed")]
    Sealed,
    #[error("Field not declared by type")]
    NotDeclared,
    #[error("Host read failure")]
    HostFailure,
}

/// Specific kinds of unpacking errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnpackErrorKind {
    #[error("Unpacker failed")]
    StrategyFailed,
    #[error("Elements unavailable")]
    ElementsUnavailable,
    #[error("Host code panicked")]
    Panicked,
}

/// Specific kinds of configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfigErrorKind {
    #[error("Configuration file not found")]
    NotFound,
    #[error("Invalid configuration format")]
    InvalidFormat,
    #[error("Invalid configuration value")]
    InvalidValue,
}

impl ScannerErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::PoolUnavailable => "PoolUnavailable",
        }
    }
}

impl FieldAccessErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inaccessible => "Inaccessible",
            Self::Sealed => "Sealed",
            Self::NotDeclared => "NotDeclared",
            Self::HostFailure => "HostFailure",
        }
    }
}

impl UnpackErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StrategyFailed => "StrategyFailed",
            Self::ElementsUnavailable => "ElementsUnavailable",
            Self::Panicked => "Panicked",
        }
    }
}

impl ConfigErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::InvalidFormat => "InvalidFormat",
            Self::InvalidValue => "InvalidValue",
        }
    }
}
