//! A heading with the product's fancy styling. The simplest block: one
//! attribute, one element.

use blockbind_engine::render::{Template, el};
use blockbind_engine::{AttributeDefinition, SchemaError, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-fancy-heading";

pub fn chain() -> Result<VersionChain, SchemaError> {
    VersionChain::single(
        vec![AttributeDefinition::from_children(
            "title",
            ValueType::String,
            "h3",
        )],
        vec![
            el("div")
                .attr("class", "fancy-heading")
                .child(el("h3").child(Template::slot("title"))),
        ],
    )
}
