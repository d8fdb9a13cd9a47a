//! Rendered markup never carries script into the page

use super::{fixture, inner_html};
use inkdown::{RenderOptions, Renderer, SanitizePolicy};

#[test]
fn test_hostile_source_is_sanitized() {
    let rendered = Renderer::new(RenderOptions::default())
        .unwrap()
        .render_html(&fixture("hostile.html"))
        .unwrap();

    assert!(!rendered.html.contains("<script"));
    assert!(!rendered.html.contains("onerror"));
    assert!(!rendered.html.contains("javascript:"));
    assert!(!rendered.html.contains("steal"));
    assert!(!rendered.html.contains("document.cookie"));

    let content = &inner_html(&rendered.html, ".content")[0];
    assert!(content.contains("Hello"));
    assert!(content.contains(r#"<img src="cat.png">"#));
    assert!(content.contains("click me"));
}

#[test]
fn test_page_outside_the_target_is_untouched() {
    let rendered = Renderer::new(RenderOptions::default())
        .unwrap()
        .render_html(&fixture("hostile.html"))
        .unwrap();

    assert!(rendered.html.contains("<title>Hostile</title>"));
}

#[test]
fn test_policy_widens_allow_list() {
    let page = r#"<div class="content">&lt;span class="tag"&gt;rust&lt;/span&gt;</div>"#;

    let strict = Renderer::new(RenderOptions::default())
        .unwrap()
        .render_html(page)
        .unwrap();
    assert_eq!(
        inner_html(&strict.html, ".content"),
        vec!["<p><span>rust</span></p>\n"]
    );

    let options = RenderOptions {
        sanitize: SanitizePolicy {
            extra_attributes: vec!["class".to_string()],
            ..SanitizePolicy::default()
        },
        ..RenderOptions::default()
    };
    let relaxed = Renderer::new(options).unwrap().render_html(page).unwrap();
    assert_eq!(
        inner_html(&relaxed.html, ".content"),
        vec![r#"<p><span class="tag">rust</span></p>"#.to_string() + "\n"]
    );
}
