//! DOM subtree serialization back to markup strings.
//!
//! Section extraction works on serialized strings rather than live DOM
//! handles, so the asset rewriter can operate on plain text. Comments and
//! doctype nodes are dropped here: the generated PHP templates carry their
//! own doctype, and source comments must not leak into theme files.

use std::fmt::Write;

use super::{Dom, NodeData, NodeId};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is emitted raw (no entity escaping).
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize a node (including its own tags) to an HTML string.
pub fn serialize(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, false, &mut out);
    out
}

/// Serialize the children of a node (inner HTML) to an HTML string.
pub fn serialize_children(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    let raw = dom.tag(id).is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
    for &child in dom.children(id) {
        write_node(dom, child, raw, &mut out);
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, raw_text: bool, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for &child in &node.children {
                write_node(dom, child, false, out);
            }
        }
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                let attr_name = match &attr.name.prefix {
                    Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                    None => attr.name.local.to_string(),
                };
                let _ = write!(out, " {}=\"{}\"", attr_name, escape_attr(&attr.value));
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for &child in &node.children {
                write_node(dom, child, raw, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeData::Comment(_) | NodeData::Doctype { .. } => {}
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_serialize_element() {
        let dom = parse_html(r#"<body><p class="intro">Hello</p></body>"#);
        let p = dom.find("p").unwrap();
        assert_eq!(serialize(&dom, p), r#"<p class="intro">Hello</p>"#);
    }

    #[test]
    fn test_serialize_children_inner_html() {
        let dom = parse_html("<body><div><em>a</em>b</div></body>");
        let div = dom.find("div").unwrap();
        assert_eq!(serialize_children(&dom, div), "<em>a</em>b");
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let dom = parse_html(r#"<body><img src="x.png"><br></body>"#);
        let body = dom.find("body").unwrap();
        let html = serialize_children(&dom, body);
        assert!(html.contains(r#"<img src="x.png">"#));
        assert!(html.contains("<br>"));
        assert!(!html.contains("</img>"));
        assert!(!html.contains("</br>"));
    }

    #[test]
    fn test_comments_are_dropped() {
        let dom = parse_html("<body><div><!-- secret -->visible</div></body>");
        let div = dom.find("div").unwrap();
        let html = serialize(&dom, div);
        assert!(!html.contains("secret"));
        assert!(html.contains("visible"));
    }

    #[test]
    fn test_text_is_escaped() {
        let dom = parse_html("<body><p>a &lt; b &amp; c</p></body>");
        let p = dom.find("p").unwrap();
        assert_eq!(serialize(&dom, p), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_script_content_is_raw() {
        let dom = parse_html("<head><script>if (a < b && c) { go(); }</script></head>");
        let script = dom.find("script").unwrap();
        let html = serialize(&dom, script);
        assert!(html.contains("a < b && c"));
        assert!(!html.contains("&lt;"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let dom = parse_html(r#"<body><a href="x?a=1&amp;b=2" title='say "hi"'>l</a></body>"#);
        let a = dom.find("a").unwrap();
        let html = serialize(&dom, a);
        assert!(html.contains("x?a=1&amp;b=2"));
        assert!(html.contains("&quot;hi&quot;"));
    }
}
