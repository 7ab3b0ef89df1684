//! A before/after image comparison block: two images behind a slider.

use blockbind_engine::render::el;
use blockbind_engine::{AttributeDefinition, SchemaError, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-before-and-after";

pub fn chain() -> Result<VersionChain, SchemaError> {
    let schema = vec![
        // Each side carries its own class; a bare `img` selector would read
        // the before image for both sides.
        AttributeDefinition::from_attribute(
            "beforeImgUrl",
            ValueType::String,
            "img.be__before",
            "src",
        ),
        AttributeDefinition::from_attribute(
            "beforeImgAlt",
            ValueType::String,
            "img.be__before",
            "alt",
        ),
        AttributeDefinition::constant("beforeImgId", ValueType::Number),
        AttributeDefinition::from_attribute(
            "afterImgUrl",
            ValueType::String,
            "img.be__after",
            "src",
        ),
        AttributeDefinition::from_attribute(
            "afterImgAlt",
            ValueType::String,
            "img.be__after",
            "alt",
        ),
        AttributeDefinition::constant("afterImgId", ValueType::Number),
    ];

    let template = vec![
        el("div").attr("class", "before-and-after").child(
            el("div").attr("class", "be__container").child(
                el("div")
                    .attr("class", "be__comparison")
                    .child(
                        el("figure")
                            .attr("class", "be__figure")
                            .child(
                                el("img")
                                    .attr("class", "be__before")
                                    .bind("src", "beforeImgUrl")
                                    .bind("alt", "beforeImgAlt"),
                            )
                            .child(
                                el("img")
                                    .attr("class", "be__after")
                                    .bind("src", "afterImgUrl")
                                    .bind("alt", "afterImgAlt"),
                            ),
                    )
                    .child(
                        el("input")
                            .attr("class", "be__slider")
                            .attr("type", "range")
                            .attr("min", "0")
                            .attr("max", "100")
                            .attr("value", "50"),
                    ),
            ),
        ),
    ];

    VersionChain::single(schema, template)
}
