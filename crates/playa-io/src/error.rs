//! Error types for layout I/O.
//!
//! Covers config file loading, output document writing and the debug
//! coordinate dump.

use playa_core::LayoutError;

/// Result type alias for layout I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;

/// Error type for layout I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON serialization error
    #[error("RON serialization error: {0}")]
    RonSer(#[from] ron::Error),

    /// RON deserialization error
    #[error("RON parse error: {0}")]
    RonDe(#[from] ron::error::SpannedError),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// File extension not handled
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// File exceeds the size limit
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Allowed size in bytes
        limit: u64,
    },

    /// Layout generation failed
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl IoError {
    /// Creates an unsupported format error.
    pub fn unsupported_format(extension: &str) -> Self {
        Self::UnsupportedFormat(extension.to_string())
    }
}
