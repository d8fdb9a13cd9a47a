//! Page-level render tests

mod failures;
mod gate;
mod page;
mod security;

use inkdown::dom::{self, Page};
use inkdown::selector::Selector;
use std::fs;
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

/// Inner HTML of every element matching `selector` in a serialized page.
pub fn inner_html(html: &str, selector: &str) -> Vec<String> {
    let page = Page::parse(html);
    page.select(&Selector::parse(selector).unwrap())
        .iter()
        .map(|node| dom::inner_html(node).unwrap())
        .collect()
}

/// Text content of every element matching `selector` in a serialized page.
pub fn texts(html: &str, selector: &str) -> Vec<String> {
    let page = Page::parse(html);
    page.select(&Selector::parse(selector).unwrap())
        .iter()
        .map(dom::text_content)
        .collect()
}

/// Value of `attribute` on every element matching `selector`.
pub fn attributes(html: &str, selector: &str, attribute: &str) -> Vec<Option<String>> {
    let page = Page::parse(html);
    page.select(&Selector::parse(selector).unwrap())
        .iter()
        .map(|node| dom::attribute(node, attribute))
        .collect()
}
