//! A single feature card: image, title, description, call-to-action link.
//!
//! This block has shipped two markup shapes. The original save wrapped the
//! image in a `<figure>`; the current one renders it bare. The version chain
//! keeps both readable, with the wrapper element as the structural marker.

use blockbind_engine::render::{Template, el};
use blockbind_engine::{
    AttributeDefinition, SchemaError, Shape, Value, ValueType, VersionChain, VersionEntry,
};

pub const NAME: &str = "cgb/block-feature";

fn schema() -> Vec<AttributeDefinition> {
    vec![
        AttributeDefinition::from_children("title", ValueType::String, "h3"),
        AttributeDefinition::from_children(
            "description",
            ValueType::Array,
            ".feature__description",
        ),
        AttributeDefinition::from_attribute("imgUrl", ValueType::String, "img", "src"),
        AttributeDefinition::from_attribute("imgAlt", ValueType::String, "img", "alt"),
        AttributeDefinition::constant("imgId", ValueType::Number),
        AttributeDefinition::from_attribute(
            "circularImg",
            ValueType::Boolean,
            ".feature",
            "data-circular-img",
        )
        .with_default(Value::Boolean(false)),
        AttributeDefinition::from_attribute("link", ValueType::String, "a", "href")
            .with_default(Value::String("/contact".into())),
        AttributeDefinition::from_children("buttonText", ValueType::String, "a")
            .with_default(Value::String("Find out more".into())),
        AttributeDefinition::from_attribute(
            "blockAlignment",
            ValueType::String,
            ".feature",
            "data-align",
        )
        .with_default(Value::String("center".into())),
    ]
}

fn body() -> Vec<Template> {
    vec![
        el("h3").child(Template::slot("title")),
        el("div")
            .attr("class", "feature__description")
            .child(Template::slot("description")),
        el("a").bind("href", "link").child(Template::slot("buttonText")),
    ]
}

fn root() -> Template {
    el("div")
        .attr("class", "feature")
        .bind("data-align", "blockAlignment")
        .bind("data-circular-img", "circularImg")
}

pub fn chain() -> Result<VersionChain, SchemaError> {
    let img = el("img").bind("src", "imgUrl").bind("alt", "imgAlt");

    let mut current_root = root().child(img.clone());
    for t in body() {
        current_root = current_root.child(t);
    }
    let current = VersionEntry::new(
        schema(),
        vec![current_root],
        Shape::any().expect(".feature").reject("figure"),
    );

    let mut legacy_root = root().child(el("figure").child(img));
    for t in body() {
        legacy_root = legacy_root.child(t);
    }
    let legacy = VersionEntry::new(schema(), vec![legacy_root], Shape::any().expect("figure"));

    VersionChain::new(vec![current, legacy])
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockbind_engine::{parse_fragment, write_fragment};
    use pretty_assertions::assert_eq;

    fn sample_record() -> blockbind_engine::AttributeRecord {
        let chain = chain().unwrap();
        let mut record = chain.default_record();
        record.set("title", Value::String("Fast".into()));
        record.set("imgUrl", Value::String("/img/fast.png".into()));
        record.set("imgAlt", Value::String("a rocket".into()));
        record
    }

    #[test]
    fn current_markup_resolves_to_version_zero() {
        let chain = chain().unwrap();
        let saved = write_fragment(&chain.render_current(&sample_record()).unwrap());
        assert!(!saved.contains("<figure>"));

        let resolved = chain.resolve(&parse_fragment(&saved));
        assert_eq!((resolved.version, resolved.degraded), (0, false));
        assert_eq!(resolved.record, sample_record());
    }

    #[test]
    fn figure_wrapped_markup_resolves_to_the_legacy_version() {
        let chain = chain().unwrap();
        let legacy_markup = concat!(
            r#"<div class="feature" data-align="center" data-circular-img="false">"#,
            r#"<figure><img alt="a rocket" src="/img/fast.png" /></figure>"#,
            r#"<h3>Fast</h3><div class="feature__description"></div>"#,
            r#"<a href="/contact">Find out more</a></div>"#,
        );

        let resolved = chain.resolve(&parse_fragment(legacy_markup));
        assert_eq!((resolved.version, resolved.degraded), (1, false));
        assert_eq!(resolved.record, sample_record());
    }

    #[test]
    fn resaving_legacy_content_upgrades_the_shape() {
        let chain = chain().unwrap();
        let legacy_markup =
            r#"<div class="feature"><figure><img src="/img/fast.png" /></figure></div>"#;
        let resolved = chain.resolve(&parse_fragment(legacy_markup));
        assert_eq!(resolved.version, 1);

        // Explicit upgrade step: defaults under the resolved record.
        let upgraded = chain.default_record().merged(&resolved.record);
        let saved = write_fragment(&chain.render_current(&upgraded).unwrap());
        assert!(!saved.contains("<figure>"));
        assert!(saved.contains(r#"src="/img/fast.png""#));
    }
}
