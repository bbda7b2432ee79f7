//! Error types for layout generation
use thiserror::Error;

/// Layout and packing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Venue parameters that cannot produce a layout
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Broken internal invariant (an algorithmic defect, not bad input)
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl LayoutError {
    /// Creates a configuration error with a custom message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an invariant error with a custom message.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
