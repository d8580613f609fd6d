//! Error types for format operations
//!
//! The conversion core never fails: unsupported content degrades into
//! warnings. These errors cover the edges around it (loading trees,
//! looking up formats, reading format parameters).

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error while reading a document tree
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation or parameter
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
