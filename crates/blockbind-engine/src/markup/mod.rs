//! The persisted markup tree.
//!
//! Markup is an immutable tree of elements and text nodes. It is produced by
//! [`parse_fragment`] (total: malformed input degrades, it never errors) and
//! consumed by [`write_fragment`] (deterministic: attributes are written in
//! sorted order). Blocks never mutate markup in place; extraction and
//! rendering always build fresh trees.

mod cursor;
mod parser;
mod selector;
mod writer;

pub use parser::parse_fragment;
pub use selector::{Selector, find_all, find_first};
pub use writer::write_fragment;

use std::collections::BTreeMap;

/// A single node in a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element: tag name, attribute map, ordered children.
///
/// Tag names are stored lowercase. The attribute map is a `BTreeMap` so that
/// serialization order is deterministic without a separate normalization
/// pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// The element's class names, split on whitespace.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(|c| c.split_ascii_whitespace())
            .into_iter()
            .flatten()
    }
}

impl Node {
    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

/// Concatenated text content of a node list.
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        collect_text(n, &mut out);
    }
    out
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element(el) => {
            for c in &el.children {
                collect_text(c, out);
            }
        }
    }
}
