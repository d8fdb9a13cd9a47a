//! HTML sanitization
//!
//! Converted markup is injected into a live page, so every fragment passes through an
//! allow-list before it is written. We use `ammonia`, which parses with `html5ever` and
//! rebuilds the fragment keeping only allowed tags, attributes and URL schemes.
//!
//! The base allow-list is ammonia's default (headings, paragraphs, lists, emphasis, code,
//! tables, links, images...). A [`SanitizePolicy`] can widen it with extra tags and
//! generic attributes, and controls the `rel` attribute added to links.

use crate::error::RenderError;
use ammonia::Builder;

/// Knobs for the sanitizer allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    /// Tags allowed on top of the default allow-list
    pub extra_tags: Vec<String>,
    /// Attributes allowed on every tag on top of the default allow-list
    pub extra_attributes: Vec<String>,
    /// Value for the `rel` attribute on links; empty leaves links untouched
    pub link_rel: String,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            extra_tags: Vec::new(),
            extra_attributes: Vec::new(),
            link_rel: "noopener noreferrer".to_string(),
        }
    }
}

/// Tags ammonia drops together with their content. They can never be allowed.
const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Allow-list sanitizer applied between conversion and write-back.
///
/// `ammonia::Builder` borrows its tag and attribute names, so the builder is assembled per
/// call from the owned policy. The policy itself is checked once, in [`Sanitizer::new`].
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    policy: SanitizePolicy,
}

impl Sanitizer {
    /// Validate `policy` against what ammonia accepts.
    ///
    /// Rejects extra tags that ammonia strips along with their content (`script`, `style`)
    /// and an extra `rel` attribute while `link_rel` is set.
    pub fn new(policy: SanitizePolicy) -> Result<Self, RenderError> {
        if let Some(tag) = policy
            .extra_tags
            .iter()
            .find(|tag| CLEAN_CONTENT_TAGS.contains(&tag.to_ascii_lowercase().as_str()))
        {
            return Err(RenderError::InvalidSanitizePolicy(format!(
                "tag '{tag}' is always removed with its content and cannot be allowed"
            )));
        }

        if !policy.link_rel.is_empty()
            && policy
                .extra_attributes
                .iter()
                .any(|attr| attr.eq_ignore_ascii_case("rel"))
        {
            return Err(RenderError::InvalidSanitizePolicy(
                "attribute 'rel' cannot be allowed while link_rel is set".to_string(),
            ));
        }

        Ok(Self { policy })
    }

    pub fn policy(&self) -> &SanitizePolicy {
        &self.policy
    }

    /// Clean an HTML fragment against the allow-list
    pub fn clean(&self, html: &str) -> String {
        let mut builder = Builder::default();
        builder
            .add_tags(self.policy.extra_tags.iter().map(String::as_str))
            .add_generic_attributes(self.policy.extra_attributes.iter().map(String::as_str));

        if self.policy.link_rel.is_empty() {
            builder.link_rel(None);
        } else {
            builder.link_rel(Some(self.policy.link_rel.as_str()));
        }

        builder.clean(html).to_string()
    }
}
