//! Render lightweight markup held in HTML page elements
//!
//!     A page carries raw Markdown inside a designated element. This crate locates that
//!     element, reads its text, converts it to HTML, sanitizes the result and writes it back,
//!     once per page.
//!
//!     This is a pure lib: it powers inkdown-cli but is shell agnostic. No code here prints,
//!     reads env vars or touches the filesystem. Diagnostics go through `tracing`; installing
//!     a subscriber is the caller's business.
//!
//! Pipeline
//!
//!     locate → extract → normalize (optional) → gate (optional) → convert → sanitize → write
//!
//!     - locate:    [`selector::Selector`] over a parsed [`dom::Page`], first match or all
//!     - extract:   element text content, trimmed (never the element's inner markup)
//!     - normalize: [`normalize::normalize_line_breaks`]
//!     - gate:      [`render::ContentTypeGate`], exact match on a content-type attribute
//!     - convert:   a [`Converter`] from the [`ConverterRegistry`]
//!     - sanitize:  [`sanitize::Sanitizer`] (ammonia allow-list), always applied
//!     - write:     replace the element's children, then mark it rendered
//!
//!     [`render_markup`] runs the page-independent middle of the pipeline and is what most
//!     tests exercise. [`Renderer::render_html`] runs the whole thing over a document.
//!
//! Library Choices
//!
//!     We never parse Markdown or HTML ourselves: `comrak` converts, `html5ever` +
//!     `markup5ever_rcdom` handle pages, `ammonia` sanitizes.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs
//!     ├── render
//!     │   ├── <testname>.rs
//!     │   └── mod.rs
//!     └── fixtures
//!         └── <page>.html
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs pulls them
//!     in as modules.

pub mod convert;
pub mod converters;
pub mod dom;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod render;
pub mod report;
pub mod sanitize;
pub mod selector;

pub use convert::Converter;
pub use error::RenderError;
pub use normalize::normalize_line_breaks;
pub use registry::ConverterRegistry;
pub use render::{
    render_markup, ContentTypeGate, RenderOptions, RenderedPage, Renderer, SelectionMode,
};
pub use report::{ElementOutcome, RenderReport};
pub use sanitize::{SanitizePolicy, Sanitizer};
