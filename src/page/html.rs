// src/page/html.rs
// =============================================================================
// This module turns an HTML page into a flat list of events.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser)
// - Never fails: broken markup is repaired the way a browser would
//
// Instead of handing callbacks to the parser, we walk the finished DOM in
// document order and emit one PageEvent per element or text node. The crawl
// code then handles every event in a single `match`.
//
// Rust concepts:
// - Enums with data: Each variant carries what that event needs
// - Tree traversal: `descendants()` visits nodes in document order
// =============================================================================

use scraper::{Html, Node};
use std::collections::HashMap;

// Elements that never have children (<br>, <img>, <frame>, ...)
// They are reported as SimpleTag instead of StartTag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "frame", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

// Text inside these elements is code, not page text
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// One thing the parser found in a page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// An opening tag such as `<a href="...">`.
    StartTag {
        name: String,
        attributes: HashMap<String, String>,
    },
    /// A tag without content such as `<frame src="...">`.
    SimpleTag {
        name: String,
        attributes: HashMap<String, String>,
    },
    /// A run of page text.
    Text(String),
}

// Parses an HTML document into events
//
// Parameters:
//   html: the full page source
//
// Returns: Vec<PageEvent> in document order; tag and attribute
// names are lower-case
//
// Example:
//   "<p>0x1F <a href='/x'>go</a></p>" ->
//     StartTag(html), StartTag(head), StartTag(body), StartTag(p),
//     Text("0x1F "), StartTag(a, href=/x), Text("go")
pub fn parse_events(html: &str) -> Vec<PageEvent> {
    let document = Html::parse_document(html);
    let mut events = Vec::new();

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(element) => {
                let name = element.name().to_string();
                let attributes = element
                    .attrs()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect();

                if VOID_ELEMENTS.contains(&name.as_str()) {
                    events.push(PageEvent::SimpleTag { name, attributes });
                } else {
                    events.push(PageEvent::StartTag { name, attributes });
                }
            }
            Node::Text(text) => {
                let in_raw_text = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.name()));

                if !in_raw_text {
                    events.push(PageEvent::Text(String::from(&**text)));
                }
            }
            // Comments, doctypes and the document root carry nothing we need
            _ => {}
        }
    }

    events
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why build a Vec instead of handling nodes directly?
//    - scraper's Html type is not Send (it can't cross threads)
//    - Plain Strings and HashMaps can be handed to any thread
//    - The crawl code can also be tested with hand-written events
//
// 2. What does node.value() return?
//    - A reference to scraper's Node enum
//    - Node::Element for tags, Node::Text for text, and a few others
//
// 3. What is is_some_and?
//    - Option::is_some_and(f) is true only if the Option is Some
//      AND the closure returns true for the value inside
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_names(events: &[PageEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|event| match event {
                PageEvent::StartTag { name, .. } | PageEvent::SimpleTag { name, .. } => {
                    Some(name.as_str())
                }
                PageEvent::Text(_) => None,
            })
            .collect()
    }

    fn texts(events: &[PageEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_anchor_with_href() {
        let events = parse_events(r#"<a href="/docs">Docs</a>"#);
        let anchor = events
            .iter()
            .find(|event| matches!(event, PageEvent::StartTag { name, .. } if name == "a"))
            .unwrap();

        match anchor {
            PageEvent::StartTag { attributes, .. } => {
                assert_eq!(attributes.get("href").map(String::as_str), Some("/docs"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_events_in_document_order() {
        let events = parse_events("<p>0x1F <a href='/x'>go</a> -></p>");
        assert_eq!(tag_names(&events), vec!["html", "head", "body", "p", "a"]);
        assert_eq!(texts(&events), vec!["0x1F ", "go", " ->"]);
    }

    #[test]
    fn test_frame_is_a_simple_tag() {
        let events = parse_events(
            r#"<html><frameset><frame src="left.html"><frame src="right.html"></frameset></html>"#,
        );
        let frames: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                PageEvent::SimpleTag { name, attributes } if name == "frame" => {
                    attributes.get("src").map(String::as_str)
                }
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec!["left.html", "right.html"]);
    }

    #[test]
    fn test_uppercase_tags_are_lowercased() {
        let events = parse_events(r#"<A HREF="/up">Up</A>"#);
        assert!(events.iter().any(|event| matches!(
            event,
            PageEvent::StartTag { name, attributes } if name == "a" && attributes.contains_key("href")
        )));
    }

    #[test]
    fn test_script_and_style_text_is_skipped() {
        let events = parse_events(
            "<head><style>a { color: red }</style><script>x => 0x1</script></head><body>0xAB</body>",
        );
        assert_eq!(texts(&events), vec!["0xAB"]);
    }

    #[test]
    fn test_empty_document() {
        let events = parse_events("");
        assert!(texts(&events).is_empty());
    }
}
