//! Markdown conversion
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and HTML rendering:
//! - CommonMark compliant, with GFM extensions (tables, strikethrough, autolinks, task lists)
//! - Never fails on malformed input; every byte sequence is some Markdown document
//!
//! Raw HTML embedded in the source is passed through (`render.unsafe_`). It is not trusted:
//! the renderer's sanitizer is what decides which tags survive.

use crate::convert::Converter;
use crate::error::RenderError;
use comrak::{markdown_to_html, Options};

/// Converter for CommonMark Markdown
///
/// comrak's options hold a non-`Send` broken-link callback, so they are built per call
/// instead of stored on the converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl Converter for MarkdownConverter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GFM extensions"
    }

    fn content_type(&self) -> &str {
        "text/markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn convert(&self, source: &str) -> Result<String, RenderError> {
        Ok(markdown_to_html(source, &default_comrak_options()))
    }
}

fn default_comrak_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.render.unsafe_ = true;
    options
}
