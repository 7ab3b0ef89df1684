//! Declarative attribute schemas.
//!
//! A schema describes how each of a block's typed attributes maps to and
//! from markup. It is pure data, validated once at registration time; the
//! extractor and renderer both work off the same declarations, which is what
//! makes the round-trip property checkable per version.

mod validate;

pub use validate::{SchemaError, validate_schema};

use serde::Serialize;

use crate::value::{Value, ValueType};

/// Where an attribute's value comes from in the markup, and where the
/// renderer puts it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "source")]
pub enum Extraction {
    /// A named markup attribute on the first element matching `selector`.
    FromAttribute { selector: String, attribute: String },
    /// The rendered inner content of the first element matching `selector`.
    FromChildren { selector: String },
    /// Every element matching `selector`, each yielding a nested record
    /// built from `sub_fields`. Used for repeating groups.
    FromQuery {
        selector: String,
        sub_fields: Vec<AttributeDefinition>,
    },
    /// Not read from markup at all; the value is always the default.
    Constant,
}

/// One schema entry: a named, typed attribute and its extraction rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDefinition {
    pub name: String,
    pub value_type: ValueType,
    pub extraction: Extraction,
    /// Used when extraction yields nothing. `None` falls back to the value
    /// type's empty value.
    pub default: Option<Value>,
}

impl AttributeDefinition {
    pub fn from_attribute(
        name: &str,
        value_type: ValueType,
        selector: &str,
        attribute: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            extraction: Extraction::FromAttribute {
                selector: selector.to_string(),
                attribute: attribute.to_string(),
            },
            default: None,
        }
    }

    pub fn from_children(name: &str, value_type: ValueType, selector: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            extraction: Extraction::FromChildren {
                selector: selector.to_string(),
            },
            default: None,
        }
    }

    /// A repeating-group attribute. Queries always have the `Array` type.
    pub fn query(name: &str, selector: &str, sub_fields: Vec<AttributeDefinition>) -> Self {
        Self {
            name: name.to_string(),
            value_type: ValueType::Array,
            extraction: Extraction::FromQuery {
                selector: selector.to_string(),
                sub_fields,
            },
            default: None,
        }
    }

    pub fn constant(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            extraction: Extraction::Constant,
            default: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The value this attribute takes when nothing was extracted.
    pub fn default_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.value_type.empty_value())
    }
}
