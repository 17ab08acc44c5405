//! Error types for loading and storing toolchain documents.

use std::path::PathBuf;

/// Errors that can occur while reading or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON parse or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading/writing document files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document file not found.
    #[error("document not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Unrecognized interchange format name.
    #[error("unknown document format '{name}' (expected 'toml' or 'json')")]
    UnknownFormat {
        /// The rejected name.
        name: String,
    },
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, ModelError>;
