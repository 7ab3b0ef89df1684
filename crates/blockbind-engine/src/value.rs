//! Typed attribute values and records.
//!
//! These are the closed set of shapes a block attribute can take. Their
//! `serde` form is the interchange contract with the host editor UI: records
//! and patches cross the boundary as JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markup::{Element, Node};

/// The declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    RichText,
    Array,
}

impl ValueType {
    /// The value used when an attribute has no declared default and
    /// extraction found nothing.
    pub fn empty_value(self) -> Value {
        match self {
            ValueType::String => Value::String(String::new()),
            ValueType::Number => Value::Number(0.0),
            ValueType::Boolean => Value::Boolean(false),
            ValueType::RichText => Value::RichText(Vec::new()),
            ValueType::Array => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::RichText => "richText",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// One attribute value.
///
/// The untagged `serde` form keeps patches natural to write from the UI
/// side: `"x"`, `50`, `true`, `["run", {"tag": "strong", ...}]`,
/// `[{"paragraph": [...]}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
    RichText(Vec<Inline>),
    Array(Vec<Item>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Boolean(_) => ValueType::Boolean,
            Value::RichText(_) => ValueType::RichText,
            Value::Array(_) => ValueType::Array,
        }
    }

    /// Whether this value fits the declared type. An empty `RichText` and an
    /// empty `Array` are indistinguishable in JSON (both `[]`), so each is
    /// accepted where the other is declared when empty.
    pub fn conforms_to(&self, ty: ValueType) -> bool {
        match (self, ty) {
            (Value::RichText(v), ValueType::Array) => v.is_empty(),
            (Value::Array(v), ValueType::RichText) => v.is_empty(),
            _ => self.value_type() == ty,
        }
    }
}

/// A run of rich text: plain text or an inline formatting span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inline {
    Text(String),
    Span {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<Inline>,
    },
}

impl Inline {
    pub(crate) fn from_node(node: &Node) -> Inline {
        match node {
            Node::Text(t) => Inline::Text(t.clone()),
            Node::Element(el) => Inline::Span {
                tag: el.tag.clone(),
                attrs: el.attrs.clone(),
                children: el.children.iter().map(Inline::from_node).collect(),
            },
        }
    }

    pub(crate) fn to_node(&self) -> Node {
        match self {
            Inline::Text(t) => Node::Text(t.clone()),
            Inline::Span {
                tag,
                attrs,
                children,
            } => Node::Element(Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.iter().map(Inline::to_node).collect(),
            }),
        }
    }
}

/// Converts a node list into rich text runs.
pub fn inlines_from_nodes(nodes: &[Node]) -> Vec<Inline> {
    nodes.iter().map(Inline::from_node).collect()
}

/// One entry of an `Array` value: a paragraph of rich text, or a nested
/// record produced by a query extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Paragraph(Vec<Inline>),
    Group(AttributeRecord),
}

/// A complete attribute record: every key the schema declares, nothing else.
///
/// Records are never mutated in place by the engine; edits arrive as patch
/// records and are applied with [`AttributeRecord::merged`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRecord {
    values: BTreeMap<String, Value>,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Shallow patch merge: keys present in `patch` replace this record's
    /// values, all other keys keep their current values. Returns a fresh
    /// record; neither input is modified.
    pub fn merged(&self, patch: &AttributeRecord) -> AttributeRecord {
        let mut values = self.values.clone();
        for (k, v) in &patch.values {
            values.insert(k.clone(), v.clone());
        }
        AttributeRecord { values }
    }
}

impl FromIterator<(String, Value)> for AttributeRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, Value)]) -> AttributeRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn merged_replaces_patched_keys_and_keeps_the_rest() {
        let base = record(&[
            ("title", Value::String("old".into())),
            ("width", Value::Number(50.0)),
        ]);
        let patch = record(&[("title", Value::String("new".into()))]);

        let merged = base.merged(&patch);

        assert_eq!(merged.get("title"), Some(&Value::String("new".into())));
        assert_eq!(merged.get("width"), Some(&Value::Number(50.0)));
        // base untouched
        assert_eq!(base.get("title"), Some(&Value::String("old".into())));
    }

    #[test]
    fn patch_json_shapes_deserialize_untagged() {
        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Boolean(true));
        let v: Value = serde_json::from_str("50").unwrap();
        assert_eq!(v, Value::Number(50.0));
        let v: Value = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(v, Value::String("hi".into()));
        let v: Value =
            serde_json::from_str(r#"["a", {"tag": "strong", "children": ["b"]}]"#).unwrap();
        assert_eq!(
            v,
            Value::RichText(vec![
                Inline::Text("a".into()),
                Inline::Span {
                    tag: "strong".into(),
                    attrs: BTreeMap::new(),
                    children: vec![Inline::Text("b".into())],
                },
            ])
        );
        let v: Value = serde_json::from_str(r#"[{"paragraph": ["p1"]}]"#).unwrap();
        assert_eq!(
            v,
            Value::Array(vec![Item::Paragraph(vec![Inline::Text("p1".into())])])
        );
    }

    #[test]
    fn empty_sequences_conform_to_both_sequence_types() {
        assert!(Value::RichText(vec![]).conforms_to(ValueType::Array));
        assert!(Value::Array(vec![]).conforms_to(ValueType::RichText));
        assert!(!Value::RichText(vec![Inline::Text("x".into())]).conforms_to(ValueType::Array));
    }

    #[test]
    fn record_serializes_as_plain_object() {
        let rec = record(&[
            ("title", Value::String("Hi".into())),
            ("wide", Value::Boolean(false)),
        ]);
        assert_eq!(
            serde_json::to_string(&rec).unwrap(),
            r#"{"title":"Hi","wide":false}"#
        );
    }
}
