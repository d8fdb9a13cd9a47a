//! Line-break normalization
//!
//! Authors often separate paragraphs with a single line break, which CommonMark folds into
//! one paragraph. This shim promotes every line break that ends a non-empty line into a
//! paragraph break. It is line oriented and naive: a line already followed by a blank line
//! still gets the extra break, so runs of blank lines grow.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(.+)\n").unwrap());

/// Double every line break that follows a non-empty line.
///
/// CRLF line endings are folded to LF first.
pub fn normalize_line_breaks(source: &str) -> String {
    let source = source.replace("\r\n", "\n");
    LINE_END.replace_all(&source, "$1\n\n").into_owned()
}
