//! Per-page render outcomes

use serde::Serialize;

/// What happened to one selected element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ElementOutcome {
    /// Content replaced with the rendered markup
    Rendered,
    /// The content-type tag did not match the recognised marker
    GateMismatch { found: Option<String> },
    /// The element already carries the rendered marker
    AlreadyRendered,
    /// A separate source selector is configured but matched nothing
    MissingSource,
    /// Conversion failed; original content left in place
    Failed { error: String },
}

/// Outcome of one element, by position among the selector's matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementReport {
    pub index: usize,
    #[serde(flatten)]
    pub outcome: ElementOutcome,
}

/// Summary of a render pass over a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Selector used to locate target elements
    pub selector: String,
    /// Number of elements the selector matched (before mode filtering)
    pub matched: usize,
    pub elements: Vec<ElementReport>,
}

impl RenderReport {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, index: usize, outcome: ElementOutcome) {
        self.elements.push(ElementReport { index, outcome });
    }

    pub fn rendered(&self) -> usize {
        self.count(|outcome| matches!(outcome, ElementOutcome::Rendered))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ElementOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.elements.len() - self.rendered() - self.failed()
    }

    /// True when nothing on the page was touched.
    pub fn is_noop(&self) -> bool {
        self.rendered() == 0
    }

    fn count(&self, predicate: impl Fn(&ElementOutcome) -> bool) -> usize {
        self.elements
            .iter()
            .filter(|element| predicate(&element.outcome))
            .count()
    }
}
