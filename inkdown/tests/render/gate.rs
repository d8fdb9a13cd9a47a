//! Content-type gating

use super::{fixture, inner_html, texts};
use inkdown::{ContentTypeGate, ElementOutcome, RenderOptions, Renderer, SelectionMode};

fn gated(gate: ContentTypeGate) -> RenderOptions {
    RenderOptions {
        mode: SelectionMode::All,
        gate: Some(gate),
        ..RenderOptions::default()
    }
}

#[test]
fn test_only_recognised_content_type_is_converted() {
    let page = fixture("feed.html");
    let original = texts(&page, ".content");

    let rendered = Renderer::new(gated(ContentTypeGate::default()))
        .unwrap()
        .render_html(&page)
        .unwrap();

    let outcomes: Vec<_> = rendered
        .report
        .elements
        .iter()
        .map(|element| element.outcome.clone())
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ElementOutcome::Rendered,
            ElementOutcome::GateMismatch {
                found: Some("text/plain".to_string())
            },
            ElementOutcome::Rendered,
            ElementOutcome::GateMismatch { found: None },
        ]
    );

    let after = texts(&rendered.html, ".content");
    assert_eq!(after[1], original[1]);
    assert_eq!(after[3], original[3]);

    let contents = inner_html(&rendered.html, ".content");
    assert!(contents[0].contains("<h2>First post</h2>"));
    assert!(contents[2].contains("<code>code</code>"));
}

#[test]
fn test_gate_match_is_exact() {
    let page = r#"<div class="content" data-content-type="text/markdown; charset=utf-8">*x*</div>"#;

    let rendered = Renderer::new(gated(ContentTypeGate::default()))
        .unwrap()
        .render_html(page)
        .unwrap();

    assert_eq!(texts(&rendered.html, ".content"), vec!["*x*"]);
    assert_eq!(rendered.report.rendered(), 0);
}

#[test]
fn test_custom_attribute_and_plain_converter() {
    let page = fixture("feed.html");
    let options = RenderOptions {
        converter: "plain".to_string(),
        normalize: false,
        ..gated(ContentTypeGate {
            attribute: "data-content-type".to_string(),
            marker: "text/plain".to_string(),
        })
    };

    let rendered = Renderer::new(options).unwrap().render_html(&page).unwrap();

    assert_eq!(rendered.report.rendered(), 1);
    let contents = inner_html(&rendered.html, ".content");
    assert_eq!(contents[1], "<p>## Not markdown<br>\nKeep *this* literal.</p>\n");
}

#[test]
fn test_gate_reads_the_source_element() {
    let page = r#"<div id="src" data-kind="md">**hi**</div><div class="content">old</div>"#;
    let options = RenderOptions {
        source: Some("#src".to_string()),
        gate: Some(ContentTypeGate {
            attribute: "data-kind".to_string(),
            marker: "md".to_string(),
        }),
        ..RenderOptions::default()
    };

    let rendered = Renderer::new(options).unwrap().render_html(page).unwrap();

    assert_eq!(
        inner_html(&rendered.html, ".content"),
        vec!["<p><strong>hi</strong></p>\n"]
    );
}
