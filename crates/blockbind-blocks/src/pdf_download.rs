//! A PDF download link with a title and short description.
//!
//! The original stored the URL outside the markup; here it lives on the link
//! element itself so the whole block round-trips.

use blockbind_engine::render::{Template, el};
use blockbind_engine::{AttributeDefinition, SchemaError, ValueType, VersionChain};

pub const NAME: &str = "cgb/block-pdf-download";

pub fn chain() -> Result<VersionChain, SchemaError> {
    let schema = vec![
        AttributeDefinition::from_children("title", ValueType::String, "h3"),
        AttributeDefinition::from_children(
            "description",
            ValueType::Array,
            ".pdf-download__description",
        ),
        AttributeDefinition::from_attribute(
            "url",
            ValueType::String,
            "a.pdf-download__link",
            "href",
        ),
    ];

    let template = vec![
        el("div")
            .attr("class", "pdf-download")
            .child(
                el("a")
                    .attr("class", "pdf-download__link")
                    .bind("href", "url")
                    .child(el("h3").child(Template::slot("title"))),
            )
            .child(
                el("div")
                    .attr("class", "pdf-download__description")
                    .child(Template::slot("description")),
            ),
    ];

    VersionChain::single(schema, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockbind_engine::{Value, parse_fragment, write_fragment};
    use pretty_assertions::assert_eq;

    #[test]
    fn url_is_read_from_the_link_element() {
        let chain = chain().unwrap();
        let mut record = chain.default_record();
        record.set("title", Value::String("Annual report".into()));
        record.set("url", Value::String("/files/report.pdf".into()));

        let saved = write_fragment(&chain.render_current(&record).unwrap());
        let resolved = chain.resolve(&parse_fragment(&saved));
        assert_eq!(resolved.record.get("url"), Some(&Value::String("/files/report.pdf".into())));
        assert_eq!(resolved.record, record);
    }
}
