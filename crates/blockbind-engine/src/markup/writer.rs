use super::parser::is_void;
use super::{Element, Node};

/// Serializes a node list back into markup text.
///
/// Deterministic: attributes come out in sorted order (the `BTreeMap`
/// ordering), text and attribute values are entity-escaped, void elements
/// are written self-closing. Writing never fails; any tree the renderer can
/// build has exactly one textual form.
pub fn write_fragment(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        write_node(n, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&html_escape::encode_text(t)),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    if is_void(&el.tag) {
        out.push_str(" />");
        return;
    }
    out.push('>');
    for c in &el.children {
        write_node(c, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}
