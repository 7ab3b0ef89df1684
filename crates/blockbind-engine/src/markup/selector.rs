use super::{Element, Node};

/// A compiled selector: a tag name, a class, or both (`h3`, `.intro`,
/// `div.intro`).
///
/// This is the whole selector grammar the attribute model supports.
/// Matching is by tag name and class-attribute membership only; descendant
/// combinators, ids and attribute tests are deliberately out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    class: Option<String>,
}

impl Selector {
    /// Parses a selector string, returning `None` if it falls outside the
    /// supported grammar. Schema validation reports that as a
    /// [`SchemaError`](crate::schema::SchemaError); extraction treats an
    /// unparseable selector as matching nothing.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let (tag_part, class_part) = match input.split_once('.') {
            Some((t, c)) => (t, Some(c)),
            None => (input, None),
        };

        let tag = match tag_part {
            "" => None,
            t if t.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') => {
                Some(t.to_ascii_lowercase())
            }
            _ => return None,
        };
        let class = match class_part {
            None => None,
            Some("") => return None,
            Some(c) if c.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') => {
                Some(c.to_string())
            }
            Some(_) => return None,
        };

        Some(Self { tag, class })
    }

    pub fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag
            && el.tag != *tag
        {
            return false;
        }
        if let Some(class) = &self.class
            && !el.classes().any(|c| c == class)
        {
            return false;
        }
        true
    }
}

/// First element matching `selector`, in document order (depth-first,
/// parents before children).
pub fn find_first<'a>(nodes: &'a [Node], selector: &Selector) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if selector.matches(el) {
                return Some(el);
            }
            if let Some(found) = find_first(&el.children, selector) {
                return Some(found);
            }
        }
    }
    None
}

/// All elements matching `selector`, in document order. Matching elements
/// nested inside other matches are included; query extraction relies on the
/// ordering, not on disjointness.
pub fn find_all<'a>(nodes: &'a [Node], selector: &Selector) -> Vec<&'a Element> {
    let mut out = Vec::new();
    collect_matches(nodes, selector, &mut out);
    out
}

fn collect_matches<'a>(nodes: &'a [Node], selector: &Selector, out: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if selector.matches(el) {
                out.push(el);
            }
            collect_matches(&el.children, selector, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_fragment;
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("h3", true)]
    #[case(".feature__description", true)]
    #[case("div.message-body", true)]
    #[case("H3", true)]
    #[case("", false)]
    #[case(".", false)]
    #[case("div.", false)]
    #[case("div > p", false)]
    #[case("#id", false)]
    #[case("a[href]", false)]
    fn selector_grammar(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Selector::parse(input).is_some(), ok, "selector {input:?}");
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        let nodes = parse_fragment("<H3>x</H3>");
        let sel = Selector::parse("h3").unwrap();
        assert!(find_first(&nodes, &sel).is_some());
    }

    #[test]
    fn class_match_requires_membership() {
        let nodes = parse_fragment(r#"<div class="intro lead">x</div>"#);
        assert!(find_first(&nodes, &Selector::parse(".lead").unwrap()).is_some());
        assert!(find_first(&nodes, &Selector::parse(".lea").unwrap()).is_none());
    }

    #[test]
    fn first_match_is_document_order() {
        let nodes = parse_fragment("<div><p>a</p></div><p>b</p>");
        let sel = Selector::parse("p").unwrap();
        let first = find_first(&nodes, &sel).unwrap();
        assert_eq!(first.children, vec![Node::Text("a".into())]);
    }

    #[test]
    fn find_all_returns_every_match_in_order() {
        let nodes = parse_fragment("<ul><li>1</li><li>2</li></ul><li>3</li>");
        let sel = Selector::parse("li").unwrap();
        let texts: Vec<String> = find_all(&nodes, &sel)
            .iter()
            .map(|el| super::super::text_content(&el.children))
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn tag_and_class_must_both_match() {
        let nodes = parse_fragment(r#"<span class="x">a</span><div class="x">b</div>"#);
        let sel = Selector::parse("div.x").unwrap();
        let el = find_first(&nodes, &sel).unwrap();
        assert_eq!(el.tag, "div");
    }
}
