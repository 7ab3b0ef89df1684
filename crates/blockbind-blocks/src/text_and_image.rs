//! A two-column layout block: prose on one side, an image on the other.

use blockbind_engine::render::{Template, el};
use blockbind_engine::{AttributeDefinition, SchemaError, Value, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-text-and-image";

pub fn chain() -> Result<VersionChain, SchemaError> {
    let schema = vec![
        AttributeDefinition::from_children("message", ValueType::Array, ".message-body"),
        AttributeDefinition::from_attribute("imgUrl", ValueType::String, "img", "src"),
        AttributeDefinition::from_attribute("imgAlt", ValueType::String, "img", "alt"),
        AttributeDefinition::constant("imgId", ValueType::Number),
        AttributeDefinition::from_attribute(
            "textFirstAlignment",
            ValueType::Boolean,
            ".text-and-image",
            "data-text-first",
        )
        .with_default(Value::Boolean(false)),
        AttributeDefinition::from_attribute(
            "columnWidth",
            ValueType::Number,
            ".message-body",
            "data-column-width",
        )
        .with_default(Value::Number(50.0)),
    ];

    let template = vec![
        el("div")
            .attr("class", "text-and-image")
            .bind("data-text-first", "textFirstAlignment")
            .child(
                el("div")
                    .attr("class", "message-body")
                    .bind("data-column-width", "columnWidth")
                    .child(Template::slot("message")),
            )
            .child(
                el("div")
                    .attr("class", "image-wrapper")
                    .child(el("img").bind("src", "imgUrl").bind("alt", "imgAlt")),
            ),
    ];

    VersionChain::single(schema, template)
}
