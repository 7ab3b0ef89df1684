//! Schema-driven rendering of attribute records into markup.
//!
//! A version's render rule is a fixed template tree with attribute values
//! spliced in, the structural inverse of its extraction schema. Rendering is
//! pure and fails fast: writing visibly wrong markup into storage is worse
//! than a loud local error, so a record that does not fit the template is a
//! [`RenderError`], never a best-effort guess.

use std::collections::{BTreeMap, HashSet};

use crate::markup::{Element, Node};
use crate::schema::{AttributeDefinition, Extraction, SchemaError};
use crate::value::{AttributeRecord, Item, Value};

/// A markup attribute in a template: fixed text or a bound record value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrTemplate {
    Literal(String),
    Bind { attribute: String },
}

/// One node of a render template.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Element {
        tag: String,
        attrs: Vec<(String, AttrTemplate)>,
        children: Vec<Template>,
    },
    /// Fixed text content.
    Text(String),
    /// The named attribute's content, inlined: a string becomes a text node,
    /// rich text becomes its spans, an array of paragraphs becomes `<p>`
    /// elements.
    Slot { attribute: String },
    /// Repeats `body` once per group of the named query attribute; bindings
    /// inside `body` resolve against the group's record.
    Each {
        attribute: String,
        body: Vec<Template>,
    },
}

/// Shorthand for an element template with no attributes or children yet.
pub fn el(tag: &str) -> Template {
    Template::Element {
        tag: tag.to_string(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Template {
    pub fn slot(attribute: &str) -> Template {
        Template::Slot {
            attribute: attribute.to_string(),
        }
    }

    pub fn text(content: &str) -> Template {
        Template::Text(content.to_string())
    }

    pub fn each(attribute: &str, body: Vec<Template>) -> Template {
        Template::Each {
            attribute: attribute.to_string(),
            body,
        }
    }

    /// Adds a fixed attribute. No effect on non-element templates.
    pub fn attr(mut self, name: &str, value: &str) -> Template {
        if let Template::Element { attrs, .. } = &mut self {
            attrs.push((name.to_string(), AttrTemplate::Literal(value.to_string())));
        }
        self
    }

    /// Adds an attribute bound to a record value. No effect on non-element
    /// templates.
    pub fn bind(mut self, name: &str, attribute: &str) -> Template {
        if let Template::Element { attrs, .. } = &mut self {
            attrs.push((
                name.to_string(),
                AttrTemplate::Bind {
                    attribute: attribute.to_string(),
                },
            ));
        }
        self
    }

    /// Appends a child template. No effect on non-element templates.
    pub fn child(mut self, template: Template) -> Template {
        if let Template::Element { children, .. } = &mut self {
            children.push(template);
        }
        self
    }
}

/// Rendering failures. Only records that do not fit the template produce
/// these; a well-typed record for the template's schema always renders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("record is missing attribute `{0}`")]
    MissingAttribute(String),
    #[error("attribute `{attribute}`: expected {expected}, found {found}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Renders a record into a markup fragment using the given template.
pub fn render(templates: &[Template], record: &AttributeRecord) -> Result<Vec<Node>, RenderError> {
    let mut out = Vec::new();
    for t in templates {
        render_into(t, record, &mut out)?;
    }
    Ok(out)
}

fn render_into(
    template: &Template,
    record: &AttributeRecord,
    out: &mut Vec<Node>,
) -> Result<(), RenderError> {
    match template {
        Template::Text(t) => out.push(Node::Text(t.clone())),
        Template::Element {
            tag,
            attrs,
            children,
        } => {
            let mut attr_map = BTreeMap::new();
            for (name, value) in attrs {
                let rendered = match value {
                    AttrTemplate::Literal(s) => s.clone(),
                    AttrTemplate::Bind { attribute } => {
                        attr_string(attribute, lookup(record, attribute)?)?
                    }
                };
                attr_map.insert(name.clone(), rendered);
            }
            let mut child_nodes = Vec::new();
            for c in children {
                render_into(c, record, &mut child_nodes)?;
            }
            out.push(Node::Element(Element {
                tag: tag.to_ascii_lowercase(),
                attrs: attr_map,
                children: child_nodes,
            }));
        }
        Template::Slot { attribute } => {
            slot_nodes(attribute, lookup(record, attribute)?, out)?;
        }
        Template::Each { attribute, body } => {
            let value = lookup(record, attribute)?;
            for group in groups(attribute, value)? {
                for t in body {
                    render_into(t, group, out)?;
                }
            }
        }
    }
    Ok(())
}

fn lookup<'a>(record: &'a AttributeRecord, attribute: &str) -> Result<&'a Value, RenderError> {
    record
        .get(attribute)
        .ok_or_else(|| RenderError::MissingAttribute(attribute.to_string()))
}

/// Flat string form of a value bound into a markup attribute.
fn attr_string(attribute: &str, value: &Value) -> Result<String, RenderError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        other => Err(RenderError::TypeMismatch {
            attribute: attribute.to_string(),
            expected: "string, number or boolean",
            found: kind(other),
        }),
    }
}

fn slot_nodes(attribute: &str, value: &Value, out: &mut Vec<Node>) -> Result<(), RenderError> {
    match value {
        Value::String(s) => {
            if !s.is_empty() {
                out.push(Node::Text(s.clone()));
            }
        }
        Value::Number(n) => out.push(Node::Text(n.to_string())),
        Value::Boolean(b) => out.push(Node::Text(b.to_string())),
        Value::RichText(runs) => out.extend(runs.iter().map(|r| r.to_node())),
        Value::Array(items) => {
            for item in items {
                match item {
                    Item::Paragraph(runs) => {
                        let mut p = Element::new("p");
                        p.children.extend(runs.iter().map(|r| r.to_node()));
                        out.push(Node::Element(p));
                    }
                    Item::Group(_) => {
                        return Err(RenderError::TypeMismatch {
                            attribute: attribute.to_string(),
                            expected: "paragraph items",
                            found: "group items",
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn groups<'a>(attribute: &str, value: &'a Value) -> Result<Vec<&'a AttributeRecord>, RenderError> {
    let items = match value {
        Value::Array(items) => items,
        // `[]` deserializes as empty rich text; treat it as the empty group
        // sequence it was meant to be.
        Value::RichText(runs) if runs.is_empty() => return Ok(Vec::new()),
        other => {
            return Err(RenderError::TypeMismatch {
                attribute: attribute.to_string(),
                expected: "group items",
                found: kind(other),
            });
        }
    };
    items
        .iter()
        .map(|item| match item {
            Item::Group(record) => Ok(record),
            Item::Paragraph(_) => Err(RenderError::TypeMismatch {
                attribute: attribute.to_string(),
                expected: "group items",
                found: "paragraph items",
            }),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Boolean(_) => "boolean",
        Value::RichText(_) => "rich text",
        Value::Array(_) => "array",
    }
}

/// Checks that every binding in a template refers to a declared attribute,
/// and that `Each` repeats a query. Part of registration-time validation so
/// that a schema/template mismatch cannot surface mid-save.
pub fn validate_template(
    templates: &[Template],
    schema: &[AttributeDefinition],
) -> Result<(), SchemaError> {
    let names: HashSet<&str> = schema.iter().map(|d| d.name.as_str()).collect();
    for t in templates {
        match t {
            Template::Text(_) => {}
            Template::Element {
                attrs, children, ..
            } => {
                for (_, value) in attrs {
                    if let AttrTemplate::Bind { attribute } = value
                        && !names.contains(attribute.as_str())
                    {
                        return Err(SchemaError::UnknownTemplateAttribute(attribute.clone()));
                    }
                }
                validate_template(children, schema)?;
            }
            Template::Slot { attribute } => {
                if !names.contains(attribute.as_str()) {
                    return Err(SchemaError::UnknownTemplateAttribute(attribute.clone()));
                }
            }
            Template::Each { attribute, body } => {
                let def = schema.iter().find(|d| d.name == *attribute).ok_or_else(|| {
                    SchemaError::UnknownTemplateAttribute(attribute.clone())
                })?;
                let Extraction::FromQuery { sub_fields, .. } = &def.extraction else {
                    return Err(SchemaError::RepeatNotQuery(attribute.clone()));
                };
                validate_template(body, sub_fields)?;
            }
        }
    }
    Ok(())
}
