//! Plain text conversion
//!
//! Posts can also be authored as `text/plain`. Such text is escaped and split into
//! paragraphs on blank lines; single line breaks inside a paragraph become `<br>`.

use crate::convert::Converter;
use crate::error::RenderError;

/// Converter for plain text
pub struct PlainTextConverter;

impl Converter for PlainTextConverter {
    fn name(&self) -> &str {
        "plain"
    }

    fn description(&self) -> &str {
        "Plain text, escaped and split into paragraphs"
    }

    fn content_type(&self) -> &str {
        "text/plain"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn convert(&self, source: &str) -> Result<String, RenderError> {
        let source = source.replace("\r\n", "\n");
        let mut html = String::new();

        for block in source.split("\n\n") {
            let block = block.trim_matches('\n');
            if block.trim().is_empty() {
                continue;
            }
            let lines: Vec<String> = block.lines().map(html_escape).collect();
            html.push_str("<p>");
            html.push_str(&lines.join("<br>\n"));
            html.push_str("</p>\n");
        }

        Ok(html)
    }
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
