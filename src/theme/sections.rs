//! Landmark section extraction.
//!
//! Locates head metadata, header markup, main content, and footer markup by
//! structural convention. When a landmark is absent the corresponding
//! section degrades to empty content with a warning; nothing here is fatal.

use crate::dom::{self, Dom, NodeData, NodeId};
use crate::theme::assets::{self, AssetMap};

/// The four extracted sections, as serialized markup strings.
///
/// This is a plain record, not a live handle into the parsed document:
/// asset-path rewriting produces a new record without re-querying the DOM.
#[derive(Debug, Clone, Default)]
pub struct ThemeSections {
    /// Inner markup of `<head>` (everything between the head tags).
    pub head: String,
    /// The first `<header>` element, or the first element child of `<body>`
    /// when no header landmark exists.
    pub header: String,
    /// The first `<main>` element, or the remaining body content when no
    /// main landmark exists.
    pub main: String,
    /// The first `<footer>` element, or empty.
    pub footer: String,
    /// True when `main` came from a real `<main>` element (emitted as-is)
    /// rather than the loose-body fallback (wrapped by the index template).
    pub main_is_landmark: bool,
}

impl ThemeSections {
    /// Produce a new record with every copied asset reference rewritten to
    /// its theme-relative location.
    pub fn rewrite_assets(&self, map: &AssetMap) -> ThemeSections {
        ThemeSections {
            head: assets::rewrite_paths(&self.head, map),
            header: assets::rewrite_paths(&self.header, map),
            main: assets::rewrite_paths(&self.main, map),
            footer: assets::rewrite_paths(&self.footer, map),
            main_is_landmark: self.main_is_landmark,
        }
    }
}

/// Extract the four landmark sections from a parsed document.
///
/// Where multiple elements match a landmark, the first in document order is
/// authoritative.
pub fn extract(dom: &Dom) -> ThemeSections {
    let head = match dom.find("head") {
        Some(id) => dom::serialize_children(dom, id),
        None => String::new(),
    };
    if head.trim().is_empty() {
        tracing::warn!("no <head> content found; header.php will carry only boilerplate");
    }

    let Some(body) = dom.find("body") else {
        // No body at all: fall back to the whole document as main content
        tracing::warn!("document has no <body>; emitting entire document as main content");
        return ThemeSections {
            head,
            main: dom::serialize(dom, NodeId::DOCUMENT),
            ..Default::default()
        };
    };

    let header_landmark = dom.find_in(body, "header");
    let footer_landmark = dom.find_in(body, "footer");
    let main_landmark = dom.find_in(body, "main");

    let mut header_fallback = None;
    let header = match header_landmark {
        Some(id) => dom::serialize(dom, id),
        None => {
            // Take the first element child of body as the header candidate,
            // but never promote another landmark into the header slot
            header_fallback = dom
                .children(body)
                .iter()
                .copied()
                .find(|&c| matches!(dom.tag(c), Some(t) if t != "main" && t != "footer"));
            match header_fallback {
                Some(id) => {
                    tracing::warn!("no <header> landmark; using first body element");
                    dom::serialize(dom, id)
                }
                None => {
                    tracing::warn!("no <header> landmark found; header section is empty");
                    String::new()
                }
            }
        }
    };

    let (main, main_is_landmark) = match main_landmark {
        Some(id) => (dom::serialize(dom, id), true),
        None => {
            tracing::warn!("no <main> landmark; collecting remaining body content");
            (collect_loose_body(dom, body, header_fallback), false)
        }
    };

    let footer = match footer_landmark {
        Some(id) => dom::serialize(dom, id),
        None => {
            tracing::warn!("no <footer> landmark found; footer section is empty");
            String::new()
        }
    };

    ThemeSections {
        head,
        header,
        main,
        footer,
        main_is_landmark,
    }
}

/// Concatenate body children that are not header/footer landmarks, skipping
/// comments, whitespace-only text, and the element already promoted to the
/// header section.
fn collect_loose_body(dom: &Dom, body: NodeId, header_fallback: Option<NodeId>) -> String {
    let mut parts = Vec::new();

    for &child in dom.children(body) {
        if Some(child) == header_fallback {
            continue;
        }
        match dom.get(child).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => {
                if matches!(name.local.as_ref(), "header" | "footer") {
                    continue;
                }
                parts.push(dom::serialize(dom, child));
            }
            Some(NodeData::Text(text)) => {
                if !text.trim().is_empty() {
                    parts.push(dom::serialize(dom, child));
                }
            }
            _ => {}
        }
    }

    parts.join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_extract_all_landmarks() {
        let dom = parse_html(
            r#"<html>
            <head><title>Site</title></head>
            <body>
                <header><nav>menu</nav></header>
                <main><h1>Welcome</h1></main>
                <footer><p>bye</p></footer>
            </body>
            </html>"#,
        );
        let sections = extract(&dom);

        assert!(sections.head.contains("<title>Site</title>"));
        assert!(sections.header.starts_with("<header>"));
        assert!(sections.header.contains("<nav>menu</nav>"));
        assert!(sections.main.contains("<h1>Welcome</h1>"));
        assert!(sections.main_is_landmark);
        assert!(sections.footer.contains("<p>bye</p>"));
    }

    #[test]
    fn test_missing_footer_degrades_to_empty() {
        let dom = parse_html("<body><header>h</header><main>m</main></body>");
        let sections = extract(&dom);
        assert_eq!(sections.footer, "");
        assert!(sections.main.contains('m'));
    }

    #[test]
    fn test_header_falls_back_to_first_body_element() {
        let dom = parse_html("<body><nav>top menu</nav><main>m</main></body>");
        let sections = extract(&dom);
        assert_eq!(sections.header, "<nav>top menu</nav>");
    }

    #[test]
    fn test_main_falls_back_to_loose_body_content() {
        let dom = parse_html(
            "<body><header>h</header><section>one</section><!-- note --><section>two</section><footer>f</footer></body>",
        );
        let sections = extract(&dom);
        assert!(!sections.main_is_landmark);
        assert_eq!(
            sections.main,
            "<section>one</section><section>two</section>"
        );
    }

    #[test]
    fn test_loose_body_excludes_header_fallback() {
        // No <header>: the first element doubles as the header and must not
        // be duplicated into the main fallback.
        let dom = parse_html("<body><nav>menu</nav><section>content</section></body>");
        let sections = extract(&dom);
        assert_eq!(sections.header, "<nav>menu</nav>");
        assert_eq!(sections.main, "<section>content</section>");
    }

    #[test]
    fn test_first_landmark_wins() {
        let dom = parse_html(
            "<body><header id=\"top\">a</header><header id=\"second\">b</header></body>",
        );
        let sections = extract(&dom);
        assert!(sections.header.contains("id=\"top\""));
        assert!(!sections.header.contains("second"));
    }

    #[test]
    fn test_rewrite_assets_preserves_record_shape() {
        let dom = parse_html(r#"<body><main><img src="images/a.png"></main></body>"#);
        let sections = extract(&dom);
        let rewritten = sections.rewrite_assets(&AssetMap::default());
        assert_eq!(rewritten.main, sections.main);
        assert_eq!(rewritten.main_is_landmark, sections.main_is_landmark);
    }
}
