//! Shared configuration loader for the inkdown toolchain.
//!
//! `defaults/inkdown.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`InkdownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use inkdown::{ContentTypeGate, RenderOptions, SanitizePolicy, SelectionMode};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/inkdown.default.toml");

/// Top-level configuration consumed by inkdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct InkdownConfig {
    pub render: RenderConfig,
    pub sanitize: SanitizeConfig,
    pub limits: LimitsConfig,
}

/// Which elements get rendered, and how.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub selector: String,
    #[serde(default)]
    pub source: Option<String>,
    pub mode: SelectionMode,
    pub normalize: bool,
    pub converter: String,
    pub rendered_marker: String,
    pub gate: GateConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    pub enabled: bool,
    pub attribute: String,
    pub marker: String,
}

/// Mirrors the knobs exposed by the sanitizer.
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizeConfig {
    pub extra_tags: Vec<String>,
    pub extra_attributes: Vec<String>,
    pub link_rel: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_source_bytes: usize,
}

impl From<&SanitizeConfig> for SanitizePolicy {
    fn from(config: &SanitizeConfig) -> Self {
        SanitizePolicy {
            extra_tags: config.extra_tags.clone(),
            extra_attributes: config.extra_attributes.clone(),
            link_rel: config.link_rel.clone(),
        }
    }
}

impl From<&InkdownConfig> for RenderOptions {
    fn from(config: &InkdownConfig) -> Self {
        let render = &config.render;
        let gate = render.gate.enabled.then(|| ContentTypeGate {
            attribute: render.gate.attribute.clone(),
            marker: render.gate.marker.clone(),
        });

        RenderOptions {
            selector: render.selector.clone(),
            source: render.source.clone().filter(|s| !s.trim().is_empty()),
            mode: render.mode,
            normalize: render.normalize,
            gate,
            converter: render.converter.clone(),
            sanitize: SanitizePolicy::from(&config.sanitize),
            max_source_bytes: config.limits.max_source_bytes,
            rendered_marker: Some(render.rendered_marker.clone()).filter(|m| !m.is_empty()),
        }
    }
}

impl From<InkdownConfig> for RenderOptions {
    fn from(config: InkdownConfig) -> Self {
        RenderOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<InkdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<InkdownConfig, ConfigError> {
    Loader::new().build()
}
