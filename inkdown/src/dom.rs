//! Page access
//!
//! Pages are parsed with `html5ever` into a `markup5ever_rcdom` tree. The helpers here cover
//! exactly what the renderer needs from a page: find elements, read their text and
//! attributes, swap their children for a rendered fragment, and serialize the page back.
//!
//! `RcDom` is `Rc` based, so a [`Page`] never leaves the thread that parsed it.

use crate::error::RenderError;
use crate::selector::Selector;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, Attribute, LocalName, QualName,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::rc::Rc;

/// A parsed HTML page.
pub struct Page {
    dom: RcDom,
}

impl Page {
    /// Parse a complete HTML document. Malformed markup is repaired the way browsers do.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<Handle> {
        descendants(&self.dom.document)
            .into_iter()
            .filter(|node| element_matches(node, selector))
            .collect()
    }

    /// First element matching `selector`, in document order.
    pub fn select_first(&self, selector: &Selector) -> Option<Handle> {
        descendants(&self.dom.document)
            .into_iter()
            .find(|node| element_matches(node, selector))
    }

    /// Serialize the whole page back to HTML
    pub fn to_html(&self) -> Result<String, RenderError> {
        inner_html(&self.dom.document)
    }
}

/// Serialized children of `node`, like DOM `innerHTML`.
pub fn inner_html(node: &Handle) -> Result<String, RenderError> {
    let mut output = Vec::new();
    let handle = SerializableHandle::from(node.clone());
    serialize(&mut output, &handle, SerializeOpts::default())
        .map_err(|e| RenderError::Document(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| RenderError::Document(format!("UTF-8 conversion failed: {e}")))
}

/// Concatenated text of every descendant text node, like DOM `textContent`.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    for descendant in descendants(node) {
        if let NodeData::Text { contents } = &descendant.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// Value of an attribute on an element node.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Set (or overwrite) an attribute on an element node. Non-elements are left alone.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(existing) = attrs.iter_mut().find(|attr| &*attr.name.local == name) {
            existing.value = value.to_string().into();
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: value.to_string().into(),
            });
        }
    }
}

/// Replace the children of `node` with the nodes of an HTML fragment.
pub fn replace_children(node: &Handle, fragment: &str) {
    let parsed = parse_document(RcDom::default(), Default::default()).one(fragment);

    let new_children = match find_element(&parsed.document, "body") {
        Some(body) => body.children.take(),
        None => Vec::new(),
    };

    for child in &new_children {
        child.parent.set(Some(Rc::downgrade(node)));
    }

    let old_children = node.children.replace(new_children);
    for child in &old_children {
        child.parent.set(None);
    }
}

/// Pre-order list of `root` and all of its descendants.
fn descendants(root: &Handle) -> Vec<Handle> {
    let mut ordered = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        ordered.push(node);
    }

    ordered
}

fn element_matches(node: &Handle, selector: &Selector) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => selector.matches(
            &name.local,
            attribute(node, "id").as_deref(),
            attribute(node, "class").as_deref(),
        ),
        _ => false,
    }
}

fn find_element(root: &Handle, tag: &str) -> Option<Handle> {
    descendants(root).into_iter().find(|node| {
        matches!(&node.data, NodeData::Element { name, .. } if &*name.local == tag)
    })
}
