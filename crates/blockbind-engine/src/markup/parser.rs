use std::collections::BTreeMap;

use super::cursor::Cursor;
use super::{Element, Node};

/// Elements that never take children and are written self-closing.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Deepest tree the parser will build. Consumers walk parsed trees
/// recursively, so depth must stay bounded no matter what the input does.
const MAX_DEPTH: usize = 512;

/// Parses a markup fragment into a node list.
///
/// Total over arbitrary input: legacy content is expected to be malformed in
/// places, so nothing here is an error. Unclosed elements are closed at end
/// of input, stray close tags are ignored, a `<` that does not open a tag is
/// literal text, comments and doctype declarations are skipped, entities are
/// decoded, and elements opened past the nesting bound become leaf children
/// of the deepest open element instead of nesting further.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let mut cur = Cursor::new(input);
    let mut builder = TreeBuilder::default();

    while !cur.eof() {
        let text = cur.eat_while(|b| b != b'<');
        if !text.is_empty() {
            builder.push_text(&html_escape::decode_html_entities(text));
        }
        if cur.eof() {
            break;
        }

        if cur.starts_with(b"<!--") {
            cur.bump_n(4);
            cur.eat_until_past(b"-->");
        } else if cur.starts_with(b"<!") || cur.starts_with(b"<?") {
            cur.eat_until_past(b">");
        } else if cur.starts_with(b"</") {
            cur.bump_n(2);
            let name = tag_name(&mut cur);
            cur.eat_until_past(b">");
            builder.close(&name);
        } else if is_tag_start(&cur) {
            cur.bump(); // <
            let name = tag_name(&mut cur);
            let (attrs, self_closed) = parse_attrs(&mut cur);
            let el = Element {
                tag: name.clone(),
                attrs,
                children: Vec::new(),
            };
            if self_closed || is_void(&name) {
                builder.push_node(Node::Element(el));
            } else {
                builder.open(el);
            }
        } else {
            // A `<` that opens nothing is literal text.
            cur.bump();
            builder.push_text("<");
        }
    }

    builder.finish()
}

fn is_tag_start(cur: &Cursor<'_>) -> bool {
    let mut probe = cur.clone();
    probe.bump();
    matches!(probe.peek(), Some(b) if b.is_ascii_alphabetic())
}

fn tag_name(cur: &mut Cursor<'_>) -> String {
    cur.eat_while(|b| b.is_ascii_alphanumeric() || b == b'-')
        .to_ascii_lowercase()
}

/// Parses the attribute list of an open tag, up to and including `>`.
///
/// Returns the attribute map and whether the tag was self-closed with `/>`.
/// On a duplicated attribute the first occurrence wins. An unterminated tag
/// at end of input keeps whatever was parsed so far.
fn parse_attrs(cur: &mut Cursor<'_>) -> (BTreeMap<String, String>, bool) {
    let mut attrs = BTreeMap::new();

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => return (attrs, false),
            Some(b'>') => {
                cur.bump();
                return (attrs, false);
            }
            Some(b'/') => {
                cur.bump();
                if cur.peek() == Some(b'>') {
                    cur.bump();
                    return (attrs, true);
                }
                continue;
            }
            Some(_) => {}
        }

        let name = cur
            .eat_while(|b| !b.is_ascii_whitespace() && b != b'=' && b != b'>' && b != b'/')
            .to_ascii_lowercase();
        if name.is_empty() {
            cur.bump();
            continue;
        }

        cur.skip_whitespace();
        let value = if cur.peek() == Some(b'=') {
            cur.bump();
            cur.skip_whitespace();
            attr_value(cur)
        } else {
            // Bare attribute (`<input disabled>`)
            String::new()
        };
        attrs.entry(name).or_insert(value);
    }
}

fn attr_value(cur: &mut Cursor<'_>) -> String {
    let raw = match cur.peek() {
        Some(q @ (b'"' | b'\'')) => {
            cur.bump();
            let v = cur.eat_while(|b| b != q);
            cur.bump(); // closing quote (no-op at EOF)
            v
        }
        _ => cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'>'),
    };
    html_escape::decode_html_entities(raw).into_owned()
}

/// Assembles the tree from open/close/text events.
///
/// Open elements form a stack; closing a tag pops everything above its
/// nearest matching open element, and `finish` force-closes whatever is
/// still open at end of input.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    roots: Vec<Node>,
}

impl TreeBuilder {
    fn push_text(&mut self, text: &str) {
        let siblings = self.siblings();
        // Merge runs split by entities or ignored tags.
        if let Some(Node::Text(prev)) = siblings.last_mut() {
            prev.push_str(text);
        } else {
            siblings.push(Node::Text(text.to_string()));
        }
    }

    fn push_node(&mut self, node: Node) {
        self.siblings().push(node);
    }

    fn siblings(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        }
    }

    fn open(&mut self, el: Element) {
        if self.stack.len() == MAX_DEPTH {
            // Flattened: the element becomes a leaf, its contents become
            // siblings, and its close tag is a stray close.
            self.push_node(Node::Element(el));
        } else {
            self.stack.push(el);
        }
    }

    fn close(&mut self, tag: &str) {
        let Some(depth) = self.stack.iter().rposition(|el| el.tag == tag) else {
            return; // stray close tag
        };
        while self.stack.len() > depth {
            let Some(el) = self.stack.pop() else { break };
            self.push_node(Node::Element(el));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(el) = self.stack.pop() {
            self.push_node(Node::Element(el));
        }
        self.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element(nodes: &[Node]) -> &Element {
        match &nodes[0] {
            Node::Element(el) => el,
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn parse_nested_elements() {
        let nodes = parse_fragment(r#"<a href="/x"><h3>Hi</h3></a>"#);
        let a = first_element(&nodes);
        assert_eq!(a.tag, "a");
        assert_eq!(a.attrs.get("href").map(String::as_str), Some("/x"));
        let h3 = first_element(&a.children);
        assert_eq!(h3.tag, "h3");
        assert_eq!(h3.children, vec![Node::Text("Hi".into())]);
    }

    #[test]
    fn void_element_takes_no_children() {
        let nodes = parse_fragment(r#"<img src="/a.png">after"#);
        assert_eq!(nodes.len(), 2);
        let img = first_element(&nodes);
        assert!(img.children.is_empty());
        assert_eq!(nodes[1], Node::Text("after".into()));
    }

    #[test]
    fn unclosed_element_closes_at_eof() {
        let nodes = parse_fragment("<div><p>text");
        let div = first_element(&nodes);
        let p = first_element(&div.children);
        assert_eq!(p.children, vec![Node::Text("text".into())]);
    }

    #[test]
    fn stray_close_tag_is_ignored() {
        let nodes = parse_fragment("</div>text");
        assert_eq!(nodes, vec![Node::Text("text".into())]);
    }

    #[test]
    fn close_tag_pops_intermediate_elements() {
        let nodes = parse_fragment("<div><span>x</div>y");
        let div = first_element(&nodes);
        let span = first_element(&div.children);
        assert_eq!(span.tag, "span");
        assert_eq!(nodes[1], Node::Text("y".into()));
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let nodes = parse_fragment("1 < 2");
        assert_eq!(nodes, vec![Node::Text("1 < 2".into())]);
    }

    #[test]
    fn comments_and_doctype_are_skipped() {
        let nodes = parse_fragment("<!-- note --><!DOCTYPE html>text");
        assert_eq!(nodes, vec![Node::Text("text".into())]);
    }

    #[test]
    fn entities_are_decoded() {
        let nodes = parse_fragment(r#"<p title="a &amp; b">x &lt; y</p>"#);
        let p = first_element(&nodes);
        assert_eq!(p.attrs.get("title").map(String::as_str), Some("a & b"));
        assert_eq!(p.children, vec![Node::Text("x < y".into())]);
    }

    #[test]
    fn tag_names_are_lowercased() {
        let nodes = parse_fragment("<DIV CLASS='x'></DIV>");
        let div = first_element(&nodes);
        assert_eq!(div.tag, "div");
        assert_eq!(div.attrs.get("class").map(String::as_str), Some("x"));
    }

    #[test]
    fn duplicate_attribute_first_wins() {
        let nodes = parse_fragment(r#"<div id="a" id="b"></div>"#);
        let div = first_element(&nodes);
        assert_eq!(div.attrs.get("id").map(String::as_str), Some("a"));
    }

    #[test]
    fn empty_input_is_empty_fragment() {
        assert!(parse_fragment("").is_empty());
    }

    #[test]
    fn nesting_beyond_the_bound_flattens() {
        let input = format!("{}deep", "<div>".repeat(MAX_DEPTH + 10));
        let nodes = parse_fragment(&input);

        // Measure depth without recursing.
        let mut max = 0;
        let mut work: Vec<(&Node, usize)> = nodes.iter().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = work.pop() {
            max = max.max(depth);
            if let Node::Element(el) = node {
                work.extend(el.children.iter().map(|c| (c, depth + 1)));
            }
        }
        assert_eq!(max, MAX_DEPTH + 1);
        assert_eq!(super::super::text_content(&nodes), "deep");
    }
}
