//! Rendering whole pages: locate, extract, convert, write.

use super::{attributes, fixture, inner_html, texts};
use inkdown::dom::Page;
use inkdown::{render_markup, ElementOutcome, RenderOptions, Renderer, SelectionMode};
use serde_json::json;

fn renderer(options: RenderOptions) -> Renderer {
    Renderer::new(options).expect("valid options")
}

fn post_options() -> RenderOptions {
    RenderOptions {
        selector: ".content".to_string(),
        source: Some("#debug-markdown".to_string()),
        ..RenderOptions::default()
    }
}

#[test]
fn test_post_source_is_rendered_into_content() {
    let rendered = renderer(post_options())
        .render_html(&fixture("post.html"))
        .unwrap();

    let content = &inner_html(&rendered.html, ".content")[0];
    assert!(content.contains("<h1>Weekend notes</h1>"));
    assert!(content.contains("<strong>friends</strong>"));
    assert!(content.contains("trail mix"));
    assert!(content.contains("<ul>"));
    assert!(!content.contains("Loading..."));

    assert_eq!(rendered.report.matched, 1);
    assert_eq!(rendered.report.rendered(), 1);
}

#[test]
fn test_source_element_is_left_in_place() {
    let rendered = renderer(post_options())
        .render_html(&fixture("post.html"))
        .unwrap();

    let source = &texts(&rendered.html, "#debug-markdown")[0];
    assert!(source.contains("Went hiking with **friends**."));
}

#[test]
fn test_rendered_content_equals_conversion_of_text() {
    let page = fixture("feed.html");
    let original = texts(&page, ".content");

    let options = RenderOptions {
        mode: SelectionMode::All,
        ..RenderOptions::default()
    };
    let rendered = renderer(options.clone()).render_html(&page).unwrap();

    let contents = inner_html(&rendered.html, ".content");
    assert_eq!(contents.len(), original.len());
    for (content, text) in contents.iter().zip(&original) {
        assert_eq!(content, &render_markup(text.trim(), &options).unwrap());
    }
}

#[test]
fn test_missing_element_is_a_silent_noop() {
    let page = fixture("post.html");
    let options = RenderOptions {
        selector: ".comments".to_string(),
        ..RenderOptions::default()
    };

    let rendered = renderer(options).render_html(&page).unwrap();

    assert_eq!(rendered.html, Page::parse(&page).to_html().unwrap());
    assert_eq!(rendered.report.matched, 0);
    assert!(rendered.report.elements.is_empty());
    assert!(rendered.report.is_noop());
}

#[test]
fn test_missing_source_element_is_a_noop() {
    let page = fixture("post.html");
    let options = RenderOptions {
        source: Some("#gone".to_string()),
        ..RenderOptions::default()
    };

    let rendered = renderer(options).render_html(&page).unwrap();

    assert_eq!(texts(&rendered.html, ".content"), vec!["Loading..."]);
    assert_eq!(rendered.report.elements[0].outcome, ElementOutcome::MissingSource);
    assert!(rendered.report.is_noop());
}

#[test]
fn test_first_mode_renders_only_the_first_match() {
    let page = fixture("feed.html");
    let original = texts(&page, ".content");

    let rendered = renderer(RenderOptions::default())
        .render_html(&page)
        .unwrap();

    assert_eq!(rendered.report.matched, 4);
    assert_eq!(rendered.report.elements.len(), 1);

    let contents = inner_html(&rendered.html, ".content");
    assert!(contents[0].contains("<h2>First post</h2>"));
    assert_eq!(texts(&rendered.html, ".content")[1..], original[1..]);
}

#[test]
fn test_all_mode_renders_every_match() {
    let options = RenderOptions {
        mode: SelectionMode::All,
        ..RenderOptions::default()
    };

    let rendered = renderer(options)
        .render_html(&fixture("feed.html"))
        .unwrap();

    assert_eq!(rendered.report.rendered(), 4);
    let contents = inner_html(&rendered.html, ".content");
    assert!(contents[0].contains("<em>emphasis</em>"));
    assert!(contents[1].contains("<h2>Not markdown</h2>"));
    assert!(contents[2].contains("<code>code</code>"));
    assert!(contents[3].contains("<p>No content type at all.</p>"));
}

#[test]
fn test_rendered_elements_are_marked() {
    let rendered = renderer(post_options())
        .render_html(&fixture("post.html"))
        .unwrap();

    assert_eq!(
        attributes(&rendered.html, ".content", "data-rendered"),
        vec![Some("true".to_string())]
    );
}

#[test]
fn test_second_pass_is_a_noop() {
    let renderer = renderer(post_options());
    let first = renderer.render_html(&fixture("post.html")).unwrap();
    let second = renderer.render_html(&first.html).unwrap();

    assert_eq!(second.html, first.html);
    assert_eq!(
        second.report.elements[0].outcome,
        ElementOutcome::AlreadyRendered
    );
}

#[test]
fn test_marker_can_be_disabled() {
    let options = RenderOptions {
        rendered_marker: None,
        ..post_options()
    };

    let rendered = renderer(options)
        .render_html(&fixture("post.html"))
        .unwrap();

    assert_eq!(attributes(&rendered.html, ".content", "data-rendered"), vec![None]);
    assert_eq!(rendered.report.rendered(), 1);
}

#[test]
fn test_render_page_mutates_in_place() {
    let page = Page::parse(&fixture("post.html"));
    let report = renderer(post_options()).render_page(&page);

    assert_eq!(report.rendered(), 1);
    let html = page.to_html().unwrap();
    assert!(html.contains("<h1>Weekend notes</h1>"));
}

#[test]
fn test_report_serializes_to_json() {
    let rendered = renderer(post_options())
        .render_html(&fixture("post.html"))
        .unwrap();

    assert_eq!(
        serde_json::to_value(&rendered.report).unwrap(),
        json!({
            "selector": ".content",
            "matched": 1,
            "elements": [{ "index": 0, "status": "rendered" }]
        })
    );
}
