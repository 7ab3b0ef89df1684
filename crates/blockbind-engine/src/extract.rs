//! Schema-driven extraction of typed attributes from markup.
//!
//! Extraction is total: it never fails, whatever the markup looks like.
//! Legacy content shows strain exactly here, so every missing element,
//! missing attribute or failed coercion resolves to the attribute's default
//! and the record always comes back complete.

use std::sync::LazyLock;

use regex::Regex;

use crate::markup::{Node, Selector, find_all, find_first, text_content};
use crate::schema::{AttributeDefinition, Extraction};
use crate::value::{AttributeRecord, Item, Value, ValueType, inlines_from_nodes};

/// Strict decimal literal grammar for number coercion. Anything else (hex,
/// exponents, trailing junk) falls back to the default.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

/// Extracts a typed record from a markup fragment.
///
/// Pure and deterministic; the output has exactly the schema's declared
/// keys. First match wins for non-query extractions, in document order.
pub fn extract(schema: &[AttributeDefinition], markup: &[Node]) -> AttributeRecord {
    schema
        .iter()
        .map(|def| (def.name.clone(), extract_one(def, markup)))
        .collect()
}

fn extract_one(def: &AttributeDefinition, markup: &[Node]) -> Value {
    match &def.extraction {
        Extraction::Constant => def.default_value(),
        Extraction::FromAttribute {
            selector,
            attribute,
        } => find_element(markup, selector)
            .and_then(|el| el.attrs.get(attribute))
            .and_then(|raw| coerce(raw, def.value_type))
            .unwrap_or_else(|| def.default_value()),
        Extraction::FromChildren { selector } => find_element(markup, selector)
            .and_then(|el| children_value(&el.children, def.value_type))
            .unwrap_or_else(|| def.default_value()),
        Extraction::FromQuery {
            selector,
            sub_fields,
        } => {
            let Some(sel) = Selector::parse(selector) else {
                return def.default_value();
            };
            // An absent match set is an empty sequence, not an error.
            let groups = find_all(markup, &sel)
                .into_iter()
                .map(|el| Item::Group(extract(sub_fields, &el.children)))
                .collect();
            Value::Array(groups)
        }
    }
}

fn find_element<'a>(markup: &'a [Node], selector: &str) -> Option<&'a crate::markup::Element> {
    let sel = Selector::parse(selector)?;
    find_first(markup, &sel)
}

/// Strict string-to-type coercion for attribute sources.
fn coerce(raw: &str, ty: ValueType) -> Option<Value> {
    match ty {
        ValueType::String => Some(Value::String(raw.to_string())),
        ValueType::Number => {
            if !DECIMAL.is_match(raw.trim()) {
                return None;
            }
            raw.trim().parse::<f64>().ok().map(Value::Number)
        }
        ValueType::Boolean => match raw.trim() {
            "true" => Some(Value::Boolean(true)),
            "false" => Some(Value::Boolean(false)),
            _ => None,
        },
        // Unreachable for validated schemas; coercion failure means default.
        ValueType::RichText | ValueType::Array => None,
    }
}

/// Turns a matched element's children into a value of the declared type.
fn children_value(children: &[Node], ty: ValueType) -> Option<Value> {
    match ty {
        ValueType::String => Some(Value::String(text_content(children))),
        ValueType::Number | ValueType::Boolean => coerce(&text_content(children), ty),
        ValueType::RichText => Some(Value::RichText(inlines_from_nodes(children))),
        ValueType::Array => Some(Value::Array(paragraphs(children))),
    }
}

/// Splits mixed children into per-paragraph content: `<p>` elements
/// contribute their inner runs, any other element becomes a one-span
/// paragraph, and bare text becomes its own paragraph. Whitespace between
/// paragraphs is formatting, not content.
fn paragraphs(children: &[Node]) -> Vec<Item> {
    let mut out = Vec::new();
    for node in children {
        match node {
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Text(t) => out.push(Item::Paragraph(vec![crate::value::Inline::Text(
                t.clone(),
            )])),
            Node::Element(el) if el.tag == "p" => {
                out.push(Item::Paragraph(inlines_from_nodes(&el.children)));
            }
            Node::Element(_) => out.push(Item::Paragraph(inlines_from_nodes(
                std::slice::from_ref(node),
            ))),
        }
    }
    out
}
