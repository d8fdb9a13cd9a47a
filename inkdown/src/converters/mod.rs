//! Built-in converters
//!
//! - `markdown`: CommonMark (plus GFM extensions) via `comrak`
//! - `plain`: escaped plain text split into paragraphs

pub mod markdown;
pub mod plain;

pub use markdown::MarkdownConverter;
pub use plain::PlainTextConverter;
