//! Converter registry for converter discovery and selection
//!
//! This module provides a centralized registry for all available converters.
//! Converters can be registered and retrieved by name.

use crate::convert::Converter;
use crate::error::RenderError;
use std::collections::HashMap;

/// Registry of markup converters
///
/// # Examples
///
/// ```ignore
/// let mut registry = ConverterRegistry::new();
/// registry.register(MyConverter);
///
/// let converter = registry.get("my-converter")?;
/// let html = converter.convert("source text")?;
/// ```
pub struct ConverterRegistry {
    converters: HashMap<String, Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ConverterRegistry {
            converters: HashMap::new(),
        }
    }

    /// Register a converter
    ///
    /// If a converter with the same name already exists, it will be replaced.
    pub fn register<C: Converter + 'static>(&mut self, converter: C) {
        self.converters
            .insert(converter.name().to_string(), Box::new(converter));
    }

    /// Get a converter by name
    pub fn get(&self, name: &str) -> Result<&dyn Converter, RenderError> {
        self.converters
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| RenderError::ConverterNotFound(name.to_string()))
    }

    /// Check if a converter exists
    pub fn has(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    /// List all available converter names (sorted)
    pub fn list_converters(&self) -> Vec<String> {
        let mut names: Vec<_> = self.converters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect a converter from a filename based on its extension
    ///
    /// Returns the converter name if a matching extension is found, or None otherwise.
    pub fn detect_converter_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.converters
            .values()
            .find(|converter| converter.file_extensions().contains(&extension))
            .map(|converter| converter.name().to_string())
    }

    /// Find the converter that accepts a content type (e.g. "text/markdown")
    pub fn detect_converter_from_content_type(&self, content_type: &str) -> Option<String> {
        self.converters
            .values()
            .find(|converter| converter.content_type() == content_type)
            .map(|converter| converter.name().to_string())
    }

    /// Convert source text using the named converter
    pub fn convert(&self, source: &str, converter: &str) -> Result<String, RenderError> {
        self.get(converter)?.convert(source)
    }

    /// Create a registry with the built-in converters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::converters::MarkdownConverter);
        registry.register(crate::converters::PlainTextConverter);

        registry
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
