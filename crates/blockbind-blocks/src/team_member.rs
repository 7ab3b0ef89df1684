//! A block featuring one team member: portrait, name, description.

use blockbind_engine::render::{Template, el};
use blockbind_engine::{AttributeDefinition, SchemaError, Value, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-team-member";

pub fn chain() -> Result<VersionChain, SchemaError> {
    let schema = vec![
        AttributeDefinition::from_children("title", ValueType::String, "h3"),
        AttributeDefinition::from_children(
            "description",
            ValueType::Array,
            ".team-member__description",
        ),
        AttributeDefinition::from_attribute("imgUrl", ValueType::String, "img", "src"),
        AttributeDefinition::from_attribute("imgAlt", ValueType::String, "img", "alt"),
        // Media library id; lives in the editor session only, never in markup.
        AttributeDefinition::constant("imgId", ValueType::Number),
        AttributeDefinition::from_attribute(
            "textFirstAlignment",
            ValueType::Boolean,
            ".team-member",
            "data-text-first",
        )
        .with_default(Value::Boolean(false)),
    ];

    let template = vec![
        el("div")
            .attr("class", "team-member")
            .bind("data-text-first", "textFirstAlignment")
            .child(
                el("div")
                    .attr("class", "team-member__img")
                    .child(
                        el("img")
                            .attr("class", "image--circle")
                            .bind("src", "imgUrl")
                            .bind("alt", "imgAlt"),
                    ),
            )
            .child(
                el("div")
                    .attr("class", "team-member__content")
                    .child(
                        el("h3")
                            .attr("class", "team-member__title")
                            .child(Template::slot("title")),
                    )
                    .child(
                        el("div")
                            .attr("class", "team-member__description")
                            .child(Template::slot("description")),
                    ),
            ),
    ];

    VersionChain::single(schema, template)
}
