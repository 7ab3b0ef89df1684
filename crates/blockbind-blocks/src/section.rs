//! A layout section wrapper. All of its attributes are spacing and color
//! settings on the root element; content inside the section belongs to other
//! blocks.

use blockbind_engine::render::el;
use blockbind_engine::{AttributeDefinition, SchemaError, Value, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-section";

fn numeric(name: &str, attr: &str, default: f64) -> AttributeDefinition {
    AttributeDefinition::from_attribute(name, ValueType::Number, ".section", attr)
        .with_default(Value::Number(default))
}

pub fn chain() -> Result<VersionChain, SchemaError> {
    let schema = vec![
        numeric("verticalPadding", "data-vertical-padding", 1.0),
        numeric("horizontalPadding", "data-horizontal-padding", 0.0),
        numeric("topMargin", "data-top-margin", 0.0),
        numeric("bottomMargin", "data-bottom-margin", 1.0),
        numeric("maxWidth", "data-max-width", 100.0),
        AttributeDefinition::from_attribute(
            "sectionBackgroundColor",
            ValueType::String,
            ".section",
            "data-background-color",
        )
        .with_default(Value::String("transparent".into())),
        AttributeDefinition::from_attribute("alignment", ValueType::String, ".section", "data-align"),
        AttributeDefinition::from_attribute("id", ValueType::String, ".section", "id"),
    ];

    let template = vec![
        el("div")
            .attr("class", "section")
            .bind("data-vertical-padding", "verticalPadding")
            .bind("data-horizontal-padding", "horizontalPadding")
            .bind("data-top-margin", "topMargin")
            .bind("data-bottom-margin", "bottomMargin")
            .bind("data-max-width", "maxWidth")
            .bind("data-background-color", "sectionBackgroundColor")
            .bind("data-align", "alignment")
            .bind("id", "id"),
    ];

    VersionChain::single(schema, template)
}
