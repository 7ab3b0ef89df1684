//! The built-in block library.
//!
//! Each module declares one block: its attribute schema, its render
//! template, and (where the markup shape has changed over time) the version
//! chain that keeps older persisted markup readable. Editing UI is not here;
//! these are pure declarations over the engine.

pub mod before_and_after;
pub mod fancy_heading;
pub mod feature;
pub mod features_list;
pub mod pdf_download;
pub mod section;
pub mod team_member;
pub mod text_and_image;

use blockbind_engine::{BlockRegistry, RegistryError};

/// Builds a registry holding every built-in block. Called once at startup;
/// the result is read-only.
pub fn builtin_registry() -> Result<BlockRegistry, RegistryError> {
    let mut registry = BlockRegistry::new();
    registry.register(before_and_after::NAME, before_and_after::chain()?)?;
    registry.register(fancy_heading::NAME, fancy_heading::chain()?)?;
    registry.register(feature::NAME, feature::chain()?)?;
    registry.register(features_list::NAME, features_list::chain()?)?;
    registry.register(pdf_download::NAME, pdf_download::chain()?)?;
    registry.register(section::NAME, section::chain()?)?;
    registry.register(team_member::NAME, team_member::chain()?)?;
    registry.register(text_and_image::NAME, text_and_image::chain()?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtin_blocks_register() {
        let registry = builtin_registry().unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "cgb/block-before-and-after",
                "cgb/block-fancy-heading",
                "cgb/block-feature",
                "cgb/block-features-list",
                "cgb/block-pdf-download",
                "cgb/block-section",
                "cgb/block-team-member",
                "cgb/block-text-and-image",
            ]
        );
    }

    #[test]
    fn every_block_round_trips_its_default_record() {
        let registry = builtin_registry().unwrap();
        for name in registry.names() {
            let chain = registry.chain(name).unwrap();
            let defaults = chain.default_record();
            let saved = registry.save_markup(name, &defaults).unwrap();
            let loaded = registry.load_attributes(name, &saved).unwrap();
            assert_eq!(loaded.version, 0, "block {name}");
            assert!(!loaded.degraded, "block {name}");
            assert_eq!(loaded.record, defaults, "block {name}");
        }
    }
}
