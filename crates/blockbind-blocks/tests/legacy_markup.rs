//! Reading legacy and damaged markup through the built-in registry.

use blockbind_blocks::{builtin_registry, feature};
use blockbind_engine::Value;
use pretty_assertions::assert_eq;

#[test]
fn legacy_feature_markup_loads_without_degradation() {
    let registry = builtin_registry().unwrap();
    let legacy = r#"<div class="feature"><figure><img src="/img/old.png" /></figure><h3>Old card</h3></div>"#;

    let loaded = registry.load_attributes(feature::NAME, legacy).unwrap();
    assert_eq!(loaded.version, 1);
    assert!(!loaded.degraded);
    assert_eq!(loaded.record.get("title"), Some(&Value::String("Old card".into())));
    assert_eq!(loaded.record.get("imgUrl"), Some(&Value::String("/img/old.png".into())));
}

#[test]
fn unrecognizable_markup_degrades_instead_of_dropping_content() {
    let registry = builtin_registry().unwrap();
    // No `.feature` root and no `figure`: matches no version's shape.
    let mangled = "<p><h3>Still here</h3></p>";

    let loaded = registry.load_attributes(feature::NAME, mangled).unwrap();
    assert!(loaded.degraded);
    assert_eq!(loaded.record.get("title"), Some(&Value::String("Still here".into())));
}

#[test]
fn degraded_content_can_be_rewritten_to_the_current_shape() {
    let registry = builtin_registry().unwrap();
    let loaded = registry
        .load_attributes(feature::NAME, "<h3>Rescued</h3>")
        .unwrap();
    assert!(loaded.degraded);

    let chain = registry.chain(feature::NAME).unwrap();
    let upgraded = chain.default_record().merged(&loaded.record);
    let saved = registry.save_markup(feature::NAME, &upgraded).unwrap();

    let reloaded = registry.load_attributes(feature::NAME, &saved).unwrap();
    assert_eq!(reloaded.version, 0);
    assert!(!reloaded.degraded);
    assert_eq!(reloaded.record.get("title"), Some(&Value::String("Rescued".into())));
}
