//! Error types for render operations

use thiserror::Error;

/// Errors that can occur while rendering markup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Selector could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// Converter not found in registry
    #[error("Converter '{0}' not found")]
    ConverterNotFound(String),
    /// The conversion routine failed or panicked
    #[error("Conversion failed: {0}")]
    ConversionFailed(String),
    /// Source text exceeds the configured limit
    #[error("Source is {size} bytes, over the {limit} byte limit")]
    SourceTooLarge { size: usize, limit: usize },
    /// Sanitizer settings ammonia cannot honour
    #[error("Invalid sanitize policy: {0}")]
    InvalidSanitizePolicy(String),
    /// Page parsing or serialization failed
    #[error("Document error: {0}")]
    Document(String),
}
