//! Lenient HTML parsing into an arena-allocated DOM.
//!
//! html5ever parses the source document with browser-grade error recovery,
//! so malformed markup degrades instead of failing the run. All nodes live
//! in a single contiguous vector; parent/child links are indices into it.
//! The tree is read-only after parsing: section extraction serializes
//! subtrees back to markup strings and never mutates the DOM.

mod serialize;
mod sink;

pub use serialize::{serialize, serialize_children};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::QualName;

use sink::DomSink;

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document root, always allocated first.
    pub const DOCUMENT: NodeId = NodeId(0);
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attr {
    pub name: QualName,
    pub value: String,
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Document type declaration.
    Doctype { name: String },
    /// Element with name and attributes.
    Element { name: QualName, attrs: Vec<Attr> },
    /// Text content.
    Text(String),
    /// Comment. Kept in the tree but dropped during serialization so it
    /// never leaks into generated PHP files.
    Comment(String),
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena-based DOM tree.
pub struct Dom {
    nodes: Vec<Node>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create an empty DOM containing only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Number of nodes in the arena (including the document root).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The document root always exists
        false
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Allocate a new detached node.
    pub(crate) fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Append text to `parent`, merging with a trailing text node.
    ///
    /// html5ever delivers character data in chunks; merging keeps each run
    /// of text as a single node so serialization reproduces it verbatim.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(&last) = self.get(parent).and_then(|n| n.children.last())
            && let Some(Node {
                data: NodeData::Text(existing),
                ..
            }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }
        let id = self.alloc(NodeData::Text(text.to_string()));
        self.append(parent, id);
    }

    /// Insert `child` immediately before `sibling`.
    pub(crate) fn insert_before(&mut self, sibling: NodeId, child: NodeId) {
        let Some(parent) = self.get(sibling).and_then(|n| n.parent) else {
            return;
        };
        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            let pos = node
                .children
                .iter()
                .position(|&c| c == sibling)
                .unwrap_or(node.children.len());
            node.children.insert(pos, child);
        }
    }

    /// Remove a node from its parent, leaving it detached in the arena.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Local tag name if the node is an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Element { name, .. } => Some(name.local.as_ref()),
            _ => None,
        }
    }

    /// Attribute value on an element, by local name.
    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Text content if the node is a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// First element with the given tag name, searching the whole document
    /// in depth-first order.
    pub fn find(&self, tag_name: &str) -> Option<NodeId> {
        self.find_in(NodeId::DOCUMENT, tag_name)
    }

    /// First element with the given tag name among the descendants of
    /// `root` (excluding `root` itself), in document order.
    pub fn find_in(&self, root: NodeId, tag_name: &str) -> Option<NodeId> {
        self.descendants(root)
            .find(|&id| self.tag(id) == Some(tag_name))
    }

    /// Depth-first iterator over the descendants of `root`, excluding
    /// `root` itself.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).to_vec();
        stack.reverse();
        Descendants { dom: self, stack }
    }
}

/// Iterator produced by [`Dom::descendants`].
pub struct Descendants<'a> {
    dom: &'a Dom,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.dom.children(id);
        for &child in children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Parse an HTML document leniently into a [`Dom`].
///
/// Parse errors are ignored, matching browser behavior: whatever structure
/// can be recovered is returned. html5ever synthesizes `<html>`, `<head>`
/// and `<body>` when they are missing from the source.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><p>Hello</p></body></html>");

        // document + html + head + body + p + text
        assert!(dom.len() > 3);

        let p = dom.find("p").expect("should find p");
        assert_eq!(dom.tag(p), Some("p"));

        let text = dom.children(p).first().copied().expect("p has a child");
        assert_eq!(dom.text(text), Some("Hello"));
    }

    #[test]
    fn test_attributes() {
        let dom = parse_html(r#"<img src="images/logo.png" alt="Logo">"#);

        let img = dom.find("img").expect("should find img");
        assert_eq!(dom.attr(img, "src"), Some("images/logo.png"));
        assert_eq!(dom.attr(img, "alt"), Some("Logo"));
        assert_eq!(dom.attr(img, "href"), None);
    }

    #[test]
    fn test_synthesized_structure() {
        // A bare fragment still gets html/head/body
        let dom = parse_html("<p>loose</p>");
        assert!(dom.find("html").is_some());
        assert!(dom.find("head").is_some());
        let body = dom.find("body").unwrap();
        assert!(dom.find_in(body, "p").is_some());
    }

    #[test]
    fn test_find_in_scopes_to_subtree() {
        let dom = parse_html("<head><title>t</title></head><body><p>x</p></body>");
        let head = dom.find("head").unwrap();
        assert!(dom.find_in(head, "title").is_some());
        assert!(dom.find_in(head, "p").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let dom = parse_html("<body><header id=\"a\"></header><header id=\"b\"></header></body>");
        let header = dom.find("header").unwrap();
        assert_eq!(dom.attr(header, "id"), Some("a"));
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let dom = parse_html("<div><p>unclosed<div><span>deep");
        assert!(dom.find("span").is_some());
    }

    #[test]
    fn test_text_chunks_are_merged() {
        let dom = parse_html("<p>a&amp;b</p>");
        let p = dom.find("p").unwrap();
        assert_eq!(dom.children(p).len(), 1);
        let text = dom.children(p)[0];
        assert_eq!(dom.text(text), Some("a&b"));
    }
}
