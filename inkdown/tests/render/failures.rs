//! Conversion failures stay contained to their element

use super::texts;
use inkdown::converters::MarkdownConverter;
use inkdown::{
    Converter, ConverterRegistry, ElementOutcome, RenderError, RenderOptions, Renderer,
    SelectionMode,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="content">first *post*</div>
<div class="content">FAIL here</div>
<div class="content">third *post*</div>
</body></html>"#;

/// Markdown, except that sources mentioning FAIL are rejected (or blow up).
struct Picky {
    panics: bool,
}

impl Converter for Picky {
    fn name(&self) -> &str {
        "picky"
    }

    fn content_type(&self) -> &str {
        "text/markdown"
    }

    fn convert(&self, source: &str) -> Result<String, RenderError> {
        if source.contains("FAIL") {
            if self.panics {
                panic!("cannot handle {source}");
            }
            return Err(RenderError::ConversionFailed(format!(
                "malformed source: {source}"
            )));
        }
        MarkdownConverter.convert(source)
    }
}

fn render(panics: bool) -> inkdown::RenderedPage {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Picky { panics });
    let options = RenderOptions {
        mode: SelectionMode::All,
        converter: "picky".to_string(),
        ..RenderOptions::default()
    };
    Renderer::with_registry(registry, options)
        .unwrap()
        .render_html(PAGE)
        .unwrap()
}

#[test]
fn test_failed_element_keeps_original_content() {
    let rendered = render(false);

    let after = texts(&rendered.html, ".content");
    assert_eq!(after[1], "FAIL here");
    assert!(!rendered.html.contains(r#"<div class="content" data-rendered="true">FAIL"#));
    assert!(rendered.html.contains(r#"<div class="content">FAIL here</div>"#));
}

#[test]
fn test_siblings_still_render() {
    let rendered = render(false);

    assert_eq!(rendered.report.rendered(), 2);
    assert_eq!(rendered.report.failed(), 1);
    assert!(rendered.html.contains("<p>first <em>post</em></p>"));
    assert!(rendered.html.contains("<p>third <em>post</em></p>"));
    match &rendered.report.elements[1].outcome {
        ElementOutcome::Failed { error } => assert!(error.contains("malformed source")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_panicking_converter_is_contained() {
    let rendered = render(true);

    assert_eq!(texts(&rendered.html, ".content")[1], "FAIL here");
    assert_eq!(rendered.report.rendered(), 2);
    match &rendered.report.elements[1].outcome {
        ElementOutcome::Failed { error } => assert!(error.contains("panicked")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_oversized_source_is_rejected_per_element() {
    let page = r#"<div class="content">short</div><div class="content">this one is far too long</div>"#;
    let options = RenderOptions {
        mode: SelectionMode::All,
        max_source_bytes: 10,
        ..RenderOptions::default()
    };

    let rendered = Renderer::new(options).unwrap().render_html(page).unwrap();

    assert_eq!(rendered.report.rendered(), 1);
    assert_eq!(
        texts(&rendered.html, ".content")[1],
        "this one is far too long"
    );
}
