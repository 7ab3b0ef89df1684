//! A list of feature cards as one repeating group.
//!
//! The repeating group is a query extraction: every `.feature` element
//! yields one nested record, and the template repeats the card body per
//! group on save.

use blockbind_engine::render::{Template, el};
use blockbind_engine::{AttributeDefinition, SchemaError, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-features-list";

pub fn chain() -> Result<VersionChain, SchemaError> {
    let schema = vec![
        AttributeDefinition::from_children("heading", ValueType::String, "h2"),
        AttributeDefinition::query(
            "features",
            ".feature",
            vec![
                AttributeDefinition::from_children("title", ValueType::String, "h3"),
                AttributeDefinition::from_children(
                    "description",
                    ValueType::RichText,
                    ".feature__description",
                ),
                AttributeDefinition::from_attribute("imgUrl", ValueType::String, "img", "src"),
                AttributeDefinition::from_attribute("imgAlt", ValueType::String, "img", "alt"),
            ],
        ),
    ];

    let template = vec![
        el("div")
            .attr("class", "features-list")
            .child(el("h2").child(Template::slot("heading")))
            .child(Template::each(
                "features",
                vec![
                    el("div")
                        .attr("class", "feature")
                        .child(el("img").bind("src", "imgUrl").bind("alt", "imgAlt"))
                        .child(el("h3").child(Template::slot("title")))
                        .child(
                            el("div")
                                .attr("class", "feature__description")
                                .child(Template::slot("description")),
                        ),
                ],
            )),
    ];

    VersionChain::single(schema, template)
}
