//! Converter trait definition
//!
//! This module defines the Converter trait that every markup conversion routine implements.
//! The renderer treats converters as black boxes: text in, structured markup out.

use crate::error::RenderError;

/// Trait for markup converters
///
/// Implementors turn lightweight-markup source text into an HTML fragment. The output is
/// not trusted: the renderer always sanitizes it before it reaches a page.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Converter for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn convert(&self, source: &str) -> Result<String, RenderError> {
///         Ok(format!("<p>{}</p>", source.to_uppercase()))
///     }
/// }
/// ```
pub trait Converter: Send + Sync {
    /// The name of this converter (e.g., "markdown", "plain")
    fn name(&self) -> &str;

    /// Optional description of this converter
    fn description(&self) -> &str {
        ""
    }

    /// Content type this converter accepts (e.g., "text/markdown")
    fn content_type(&self) -> &str;

    /// File extensions associated with this converter (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic converter detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Convert source text into an HTML fragment
    fn convert(&self, source: &str) -> Result<String, RenderError>;
}
