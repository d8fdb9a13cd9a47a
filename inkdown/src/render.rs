//! The renderer
//!
//! One pass over a page: locate the target elements, extract their source text, optionally
//! normalize it, check the content-type gate, convert, sanitize and write the result back.
//!
//! A pass runs once over a fully parsed document ("content ready"): all structural markup,
//! and therefore every source element's text, is present. Nothing else about the page is
//! loaded or consulted.
//!
//! Failures are contained per element: a conversion error is logged and recorded in the
//! [`RenderReport`], the element keeps its original content (nothing is written until the
//! sanitized output exists), and the remaining elements still render.

use crate::convert::Converter;
use crate::dom::{self, Page};
use crate::error::RenderError;
use crate::normalize::normalize_line_breaks;
use crate::registry::ConverterRegistry;
use crate::report::{ElementOutcome, RenderReport};
use crate::sanitize::{SanitizePolicy, Sanitizer};
use crate::selector::Selector;
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;

/// Default cap on the size of a single source text.
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// Which of several matching elements get rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Only the first match in document order
    #[default]
    First,
    /// Every match
    All,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(SelectionMode::First),
            "all" => Ok(SelectionMode::All),
            other => Err(format!("unknown selection mode '{other}' (expected first or all)")),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::First => f.write_str("first"),
            SelectionMode::All => f.write_str("all"),
        }
    }
}

/// Content-type gate: convert only elements whose tag attribute equals the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeGate {
    pub attribute: String,
    pub marker: String,
}

impl ContentTypeGate {
    /// Exact match only. A missing attribute never passes.
    pub fn admits(&self, value: Option<&str>) -> bool {
        value == Some(self.marker.as_str())
    }
}

impl Default for ContentTypeGate {
    fn default() -> Self {
        Self {
            attribute: "data-content-type".to_string(),
            marker: "text/markdown".to_string(),
        }
    }
}

/// Options for a render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Selector for the elements whose content is replaced
    pub selector: String,
    /// Optional selector for a separate element holding the source text
    pub source: Option<String>,
    pub mode: SelectionMode,
    /// Promote single line breaks to paragraph breaks before converting
    pub normalize: bool,
    pub gate: Option<ContentTypeGate>,
    /// Registry name of the converter
    pub converter: String,
    pub sanitize: SanitizePolicy,
    pub max_source_bytes: usize,
    /// Attribute set on rendered elements; elements carrying it are skipped
    pub rendered_marker: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            selector: ".content".to_string(),
            source: None,
            mode: SelectionMode::First,
            normalize: true,
            gate: None,
            converter: "markdown".to_string(),
            sanitize: SanitizePolicy::default(),
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
            rendered_marker: Some("data-rendered".to_string()),
        }
    }
}

/// A rendered page and the report of what happened to it.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    pub report: RenderReport,
}

/// Renders lightweight markup held in page elements.
pub struct Renderer {
    registry: ConverterRegistry,
    options: RenderOptions,
    selector: Selector,
    source: Option<Selector>,
    sanitizer: Sanitizer,
}

impl Renderer {
    /// Create a renderer with the built-in converters
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        Self::with_registry(ConverterRegistry::default(), options)
    }

    /// Create a renderer over a custom registry
    ///
    /// Selectors, the converter name and the sanitize policy are validated here, so a
    /// constructed renderer only fails per element.
    pub fn with_registry(
        registry: ConverterRegistry,
        options: RenderOptions,
    ) -> Result<Self, RenderError> {
        let selector = Selector::parse(&options.selector)?;
        let source = options
            .source
            .as_deref()
            .map(Selector::parse)
            .transpose()?;
        registry.get(&options.converter)?;
        let sanitizer = Sanitizer::new(options.sanitize.clone())?;

        Ok(Self {
            registry,
            options,
            selector,
            source,
            sanitizer,
        })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render raw source text to sanitized markup, without touching any page.
    pub fn render_markup(&self, raw: &str) -> Result<String, RenderError> {
        let converter = self.registry.get(&self.options.converter)?;
        run_pipeline(raw, converter, &self.sanitizer, &self.options)
    }

    /// Parse, render and serialize a complete HTML document.
    pub fn render_html(&self, html: &str) -> Result<RenderedPage, RenderError> {
        let page = Page::parse(html);
        let report = self.render_page(&page);
        let html = page.to_html()?;
        Ok(RenderedPage { html, report })
    }

    /// Render every selected element of an already parsed page in place.
    pub fn render_page(&self, page: &Page) -> RenderReport {
        let mut report = RenderReport::new(self.selector.as_str());

        let matches = page.select(&self.selector);
        report.matched = matches.len();
        if matches.is_empty() {
            tracing::info!(selector = %self.selector, "No element matched, nothing to render");
            return report;
        }

        let targets = match self.options.mode {
            SelectionMode::First => &matches[..1],
            SelectionMode::All => &matches[..],
        };
        tracing::debug!(
            selector = %self.selector,
            matched = matches.len(),
            mode = %self.options.mode,
            "Located target elements"
        );

        let source = match &self.source {
            Some(selector) => match page.select_first(selector) {
                Some(node) => Some(node),
                None => {
                    tracing::info!(source = %selector, "Source element not found, nothing to render");
                    for index in 0..targets.len() {
                        report.push(index, ElementOutcome::MissingSource);
                    }
                    return report;
                }
            },
            None => None,
        };

        for (index, target) in targets.iter().enumerate() {
            let outcome = self.render_element(target, source.as_ref().unwrap_or(target));
            report.push(index, outcome);
        }

        tracing::info!(
            selector = %self.selector,
            rendered = report.rendered(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Render pass complete"
        );
        report
    }

    fn render_element(&self, target: &Handle, source: &Handle) -> ElementOutcome {
        if let Some(marker) = &self.options.rendered_marker {
            if dom::attribute(target, marker).is_some() {
                tracing::debug!(marker = %marker, "Element already rendered, skipping");
                return ElementOutcome::AlreadyRendered;
            }
        }

        if let Some(gate) = &self.options.gate {
            let found = dom::attribute(source, &gate.attribute);
            if !gate.admits(found.as_deref()) {
                tracing::info!(
                    attribute = %gate.attribute,
                    expected = %gate.marker,
                    found = ?found,
                    "Content type not recognised, leaving element untouched"
                );
                return ElementOutcome::GateMismatch { found };
            }
        }

        let raw = dom::text_content(source);
        let raw = raw.trim();
        tracing::debug!(raw = ?raw, "Raw source before processing");

        match self.render_markup(raw) {
            Ok(html) => {
                dom::replace_children(target, &html);
                if let Some(marker) = &self.options.rendered_marker {
                    dom::set_attribute(target, marker, "true");
                }
                tracing::debug!("Rendered markup applied");
                ElementOutcome::Rendered
            }
            Err(err) => {
                tracing::warn!(
                    selector = %self.selector,
                    error = %err,
                    "Rendering failed, original content kept"
                );
                ElementOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}

/// Render raw source text to sanitized markup with the built-in converters.
///
/// This is the page-independent core of the renderer: size check, optional
/// normalization, conversion and sanitization.
pub fn render_markup(raw: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let registry = ConverterRegistry::default();
    let converter = registry.get(&options.converter)?;
    let sanitizer = Sanitizer::new(options.sanitize.clone())?;
    run_pipeline(raw, converter, &sanitizer, options)
}

fn run_pipeline(
    raw: &str,
    converter: &dyn Converter,
    sanitizer: &Sanitizer,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    if raw.len() > options.max_source_bytes {
        return Err(RenderError::SourceTooLarge {
            size: raw.len(),
            limit: options.max_source_bytes,
        });
    }

    let text = if options.normalize {
        Cow::Owned(normalize_line_breaks(raw))
    } else {
        Cow::Borrowed(raw)
    };
    tracing::debug!(text = ?text, converter = converter.name(), "Source before conversion");

    let converted = catch_unwind(AssertUnwindSafe(|| converter.convert(&text)))
        .map_err(|payload| RenderError::ConversionFailed(panic_message(payload)))??;
    tracing::debug!(html = %converted, "Converted markup");

    Ok(sanitizer.clean(&converted))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("converter panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("converter panicked: {message}")
    } else {
        "converter panicked".to_string()
    }
}
