//! Element selectors
//!
//! Source elements are addressed with a single compound selector: an optional tag name
//! followed by any number of `#id` and `.class` parts, e.g. `.content`, `#debug-markdown`,
//! `div.post.content`. Combinators, attribute selectors and pseudo-classes are rejected.

use crate::error::RenderError;
use std::fmt;
use std::str::FromStr;

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let invalid = |reason: &str| RenderError::InvalidSelector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(invalid("selector is empty"));
        }

        let mut selector = Selector {
            source: trimmed.to_string(),
            tag: None,
            id: None,
            classes: Vec::new(),
        };

        let mut chars = trimmed.chars().peekable();

        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(prefix) = chars.next() {
            let ident = take_ident(&mut chars);
            match prefix {
                '#' | '.' if ident.is_empty() => {
                    return Err(invalid(&format!("expected a name after '{prefix}'")));
                }
                '#' => {
                    if selector.id.is_some() {
                        return Err(invalid("more than one id"));
                    }
                    selector.id = Some(ident);
                }
                '.' => selector.classes.push(ident),
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(invalid("combinators and selector lists are not supported"));
                }
                other => return Err(invalid(&format!("unexpected character '{other}'"))),
            }
        }

        Ok(selector)
    }

    /// Whether an element with the given tag name, `id` and `class` attributes matches.
    pub fn matches(&self, tag: &str, id: Option<&str>, class: Option<&str>) -> bool {
        if let Some(expected) = &self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }

        if let Some(expected) = &self.id {
            if id != Some(expected.as_str()) {
                return false;
            }
        }

        let classes: Vec<&str> = class.map(|c| c.split_whitespace().collect()).unwrap_or_default();
        self.classes
            .iter()
            .all(|wanted| classes.contains(&wanted.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            ident.push(c);
            chars.next();
        } else {
            break;
        }
    }
    ident
}

impl FromStr for Selector {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
