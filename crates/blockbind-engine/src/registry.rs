//! The block registry: the one surface the surrounding editor touches.
//!
//! Populated once at startup, read-only thereafter. All lookup methods take
//! `&self`, so a populated registry is freely shareable across threads
//! without locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::markup::{parse_fragment, write_fragment};
use crate::render::RenderError;
use crate::schema::SchemaError;
use crate::value::AttributeRecord;
use crate::version::VersionChain;

/// Block names carry a namespace prefix, `namespace/block-name`.
static BLOCK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*/[a-z][a-z0-9-]*$").unwrap());

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("block `{0}` is already registered")]
    DuplicateName(String),
    #[error("unknown block `{0}`")]
    UnknownBlock(String),
    #[error("invalid block name `{0}` (expected `namespace/block-name`)")]
    InvalidName(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A resolved load: the complete record plus how it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub record: AttributeRecord,
    /// Chain index that accepted the markup; 0 is the current version.
    pub version: usize,
    /// True when no version's shape matched and the content was read
    /// best-effort with the oldest schema.
    pub degraded: bool,
}

/// Name → version chain table for every registered block.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    blocks: HashMap<String, VersionChain>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a block under its unique name.
    ///
    /// Chain validation has already happened in [`VersionChain::new`], so
    /// the only failures left here are naming ones.
    pub fn register(&mut self, name: &str, chain: VersionChain) -> Result<(), RegistryError> {
        if !BLOCK_NAME.is_match(name) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.blocks.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.blocks.insert(name.to_string(), chain);
        Ok(())
    }

    pub fn chain(&self, name: &str) -> Result<&VersionChain, RegistryError> {
        self.blocks
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBlock(name.to_string()))
    }

    /// Registered block names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parses persisted markup and resolves it against the block's chain.
    pub fn load_attributes(&self, name: &str, markup: &str) -> Result<Loaded, RegistryError> {
        let chain = self.chain(name)?;
        let nodes = parse_fragment(markup);
        let resolved = chain.resolve(&nodes);
        Ok(Loaded {
            record: resolved.record,
            version: resolved.version,
            degraded: resolved.degraded,
        })
    }

    /// Renders a record with the block's current version. The record must be
    /// complete for the current schema; legacy records are upgraded first
    /// via `chain.default_record().merged(..)` by the caller.
    pub fn save_markup(&self, name: &str, record: &AttributeRecord) -> Result<String, RegistryError> {
        let chain = self.chain(name)?;
        let nodes = chain.render_current(record)?;
        Ok(write_fragment(&nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Template, el};
    use crate::schema::AttributeDefinition;
    use crate::value::{Value, ValueType};
    use pretty_assertions::assert_eq;

    fn heading_chain() -> VersionChain {
        VersionChain::single(
            vec![AttributeDefinition::from_children(
                "title",
                ValueType::String,
                "h3",
            )],
            vec![el("div")
                .attr("class", "fancy-heading")
                .child(el("h3").child(Template::slot("title")))],
        )
        .unwrap()
    }

    #[test]
    fn register_then_load_and_save() {
        let mut registry = BlockRegistry::new();
        registry.register("cgb/fancy-heading", heading_chain()).unwrap();

        let loaded = registry
            .load_attributes("cgb/fancy-heading", r#"<div class="fancy-heading"><h3>Hi</h3></div>"#)
            .unwrap();
        assert_eq!(loaded.version, 0);
        assert!(!loaded.degraded);
        assert_eq!(loaded.record.get("title"), Some(&Value::String("Hi".into())));

        let saved = registry
            .save_markup("cgb/fancy-heading", &loaded.record)
            .unwrap();
        assert_eq!(saved, r#"<div class="fancy-heading"><h3>Hi</h3></div>"#);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = BlockRegistry::new();
        registry.register("cgb/fancy-heading", heading_chain()).unwrap();
        assert_eq!(
            registry.register("cgb/fancy-heading", heading_chain()),
            Err(RegistryError::DuplicateName("cgb/fancy-heading".into()))
        );
    }

    #[test]
    fn unknown_block_is_an_error() {
        let registry = BlockRegistry::new();
        assert_eq!(
            registry.load_attributes("cgb/nope", "<p></p>"),
            Err(RegistryError::UnknownBlock("cgb/nope".into()))
        );
    }

    #[test]
    fn block_names_require_a_namespace() {
        let mut registry = BlockRegistry::new();
        for bad in ["fancy-heading", "CGB/fancy", "cgb/", "/x", "a b/c"] {
            assert_eq!(
                registry.register(bad, heading_chain()),
                Err(RegistryError::InvalidName(bad.into())),
                "name {bad:?}"
            );
        }
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = BlockRegistry::new();
        registry.register("cgb/b", heading_chain()).unwrap();
        registry.register("cgb/a", heading_chain()).unwrap();
        assert_eq!(registry.names(), vec!["cgb/a", "cgb/b"]);
    }
}
