use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::markup::Selector;
use crate::value::ValueType;

use super::{AttributeDefinition, Extraction};

static ATTRIBUTE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// How deep query extractions may nest: a query's sub-fields may contain one
/// further level of query, and no more.
const MAX_QUERY_DEPTH: usize = 2;

/// What can be wrong with a block declaration. All of these reject
/// registration; none can occur at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("version chain is empty")]
    EmptyChain,
    #[error("invalid attribute name `{0}`")]
    InvalidAttributeName(String),
    #[error("duplicate attribute `{0}`")]
    DuplicateAttribute(String),
    #[error("attribute `{0}`: selector is empty")]
    EmptySelector(String),
    #[error("attribute `{attribute}`: unsupported selector `{selector}`")]
    BadSelector { attribute: String, selector: String },
    #[error("attribute `{0}`: queries nest more than one level deep")]
    QueryTooDeep(String),
    #[error("attribute `{attribute}`: default does not fit declared type {expected}")]
    DefaultTypeMismatch {
        attribute: String,
        expected: ValueType,
    },
    #[error("attribute `{attribute}`: {value_type} cannot be read from a markup attribute")]
    UnsourceableType {
        attribute: String,
        value_type: ValueType,
    },
    #[error("attribute `{0}`: query extraction requires the array type")]
    QueryNotArray(String),
    #[error("template references undeclared attribute `{0}`")]
    UnknownTemplateAttribute(String),
    #[error("template repeats attribute `{0}`, which is not a query")]
    RepeatNotQuery(String),
    #[error("shape selector `{0}` is unsupported")]
    BadShapeSelector(String),
}

/// Validates a schema declaration. Pure and synchronous; called once per
/// version at registration.
pub fn validate_schema(schema: &[AttributeDefinition]) -> Result<(), SchemaError> {
    validate_fields(schema, 0)
}

fn validate_fields(schema: &[AttributeDefinition], query_depth: usize) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for def in schema {
        if !ATTRIBUTE_NAME.is_match(&def.name) {
            return Err(SchemaError::InvalidAttributeName(def.name.clone()));
        }
        if !seen.insert(def.name.as_str()) {
            return Err(SchemaError::DuplicateAttribute(def.name.clone()));
        }
        if let Some(default) = &def.default
            && !default.conforms_to(def.value_type)
        {
            return Err(SchemaError::DefaultTypeMismatch {
                attribute: def.name.clone(),
                expected: def.value_type,
            });
        }
        validate_extraction(def, query_depth)?;
    }
    Ok(())
}

fn validate_extraction(def: &AttributeDefinition, query_depth: usize) -> Result<(), SchemaError> {
    let selector = match &def.extraction {
        Extraction::Constant => return Ok(()),
        Extraction::FromAttribute { selector, .. } => {
            // Markup attributes are flat strings; structured types have no
            // representation there.
            if matches!(def.value_type, ValueType::RichText | ValueType::Array) {
                return Err(SchemaError::UnsourceableType {
                    attribute: def.name.clone(),
                    value_type: def.value_type,
                });
            }
            selector
        }
        Extraction::FromChildren { selector } => selector,
        Extraction::FromQuery {
            selector,
            sub_fields,
        } => {
            if def.value_type != ValueType::Array {
                return Err(SchemaError::QueryNotArray(def.name.clone()));
            }
            if query_depth + 1 > MAX_QUERY_DEPTH {
                return Err(SchemaError::QueryTooDeep(def.name.clone()));
            }
            validate_fields(sub_fields, query_depth + 1)?;
            selector
        }
    };

    if selector.trim().is_empty() {
        return Err(SchemaError::EmptySelector(def.name.clone()));
    }
    if Selector::parse(selector).is_none() {
        return Err(SchemaError::BadSelector {
            attribute: def.name.clone(),
            selector: selector.clone(),
        });
    }
    Ok(())
}
