// src/crawl/extract.rs
// =============================================================================
// Handles the events of one fetched page.
//
// For every event:
// - <a href> and <frame src> links are resolved against the page URL and
//   admitted to the frontier at depth + 1 (only if the page itself is within
//   the depth limit)
// - text is split into words and the countable ones go into the frequency
//   table
//
// A link that can't be resolved is logged as a warning and skipped. Links
// without a hierarchical path (mailto:, javascript:, data:) and links that
// are already known are skipped silently.
// =============================================================================

use std::collections::HashMap;
use tracing::{debug, trace, warn};
use url::Url;

use super::frontier::{Frontier, FrontierEntry};
use crate::page::{parse_events, PageEvent};
use crate::words::FrequencyTable;

// What one page contributed to the crawl
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageScan {
    pub links_admitted: usize,
    pub tokens_counted: usize,
}

pub struct LinkExtractor<'a> {
    page: &'a FrontierEntry,
    max_depth: usize,
    frontier: &'a Frontier,
    table: &'a FrequencyTable,
    scan: PageScan,
}

impl<'a> LinkExtractor<'a> {
    pub fn new(
        page: &'a FrontierEntry,
        max_depth: usize,
        frontier: &'a Frontier,
        table: &'a FrequencyTable,
    ) -> Self {
        Self {
            page,
            max_depth,
            frontier,
            table,
            scan: PageScan::default(),
        }
    }

    pub fn handle(&mut self, event: &PageEvent) {
        match event {
            PageEvent::StartTag { name, attributes } | PageEvent::SimpleTag { name, attributes } => {
                trace!(tag = %name, ?attributes, "tag");
                self.handle_tag(name, attributes);
            }
            PageEvent::Text(text) => {
                trace!(?text, "text");
                self.scan.tokens_counted += self.table.merge_text(text);
            }
        }
    }

    pub fn finish(self) -> PageScan {
        self.scan
    }

    fn handle_tag(&mut self, name: &str, attributes: &HashMap<String, String>) {
        if self.page.depth > self.max_depth {
            return;
        }

        let link = match name {
            "a" => attributes.get("href"),
            "frame" => attributes.get("src"),
            _ => None,
        };
        let Some(link) = link else {
            return;
        };

        let url = match resolve_link(&self.page.url, link) {
            Ok(url) => url,
            Err(error) => {
                warn!(page = %self.page.url, %link, %error, "malformed link");
                return;
            }
        };

        if url.cannot_be_a_base() {
            return;
        }

        if self.frontier.try_admit(url.clone(), self.page.depth + 1) {
            debug!(depth = self.page.depth + 1, "adding {}", url);
            self.scan.links_admitted += 1;
        }
    }
}

// Resolves a (possibly relative) link against the page it was found on
//
// The fragment is kept, so "/doc#intro" and "/doc#usage" are separate entries.
//
// Examples:
//   base = "https://example.com/a/page.html"
//   "other.html"          -> "https://example.com/a/other.html"
//   "../up#top"           -> "https://example.com/up#top"
//   "https://rust-lang.org" -> "https://rust-lang.org/"
pub fn resolve_link(base: &Url, link: &str) -> Result<Url, url::ParseError> {
    base.join(link)
}

// Parses one page and feeds every event through a LinkExtractor
pub fn extract_page(
    page: &FrontierEntry,
    html: &str,
    max_depth: usize,
    frontier: &Frontier,
    table: &FrequencyTable,
) -> PageScan {
    let mut extractor = LinkExtractor::new(page, max_depth, frontier, table);
    for event in parse_events(html) {
        extractor.handle(&event);
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, depth: usize) -> FrontierEntry {
        FrontierEntry {
            url: Url::parse(url).unwrap(),
            depth,
        }
    }

    fn anchor(href: &str) -> PageEvent {
        PageEvent::StartTag {
            name: "a".to_string(),
            attributes: HashMap::from([("href".to_string(), href.to_string())]),
        }
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.com/a/page.html").unwrap();
        assert_eq!(
            resolve_link(&base, "other.html").unwrap().as_str(),
            "https://example.com/a/other.html"
        );
        assert_eq!(
            resolve_link(&base, "../up#top").unwrap().as_str(),
            "https://example.com/up#top"
        );
    }

    #[test]
    fn test_resolve_malformed_link() {
        let base = Url::parse("https://example.com/").unwrap();
        assert!(resolve_link(&base, "http://[::1").is_err());
    }

    #[test]
    fn test_duplicate_link_is_admitted_once() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let seed = entry("https://example.com/", 0);
        assert!(frontier.try_admit(seed.url.clone(), 0));

        let mut extractor = LinkExtractor::new(&seed, 2, &frontier, &table);
        extractor.handle(&anchor("https://other.org/x"));
        extractor.handle(&anchor("https://example.com/docs"));
        // Resolves to the seed, which is already known
        extractor.handle(&anchor("/"));

        assert_eq!(extractor.finish().links_admitted, 2);
    }

    #[test]
    fn test_fragment_variants_are_separate_pages() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let page = entry("http://x.test/", 0);
        frontier.try_admit(page.url.clone(), 0);

        let mut extractor = LinkExtractor::new(&page, 2, &frontier, &table);
        extractor.handle(&anchor("#top"));
        extractor.handle(&anchor("doc#a"));
        extractor.handle(&anchor("doc#b"));
        // Same fragment again is a duplicate
        extractor.handle(&anchor("doc#a"));

        assert_eq!(extractor.finish().links_admitted, 3);
    }

    #[test]
    fn test_opaque_and_malformed_links_are_skipped() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let page = entry("https://example.com/", 0);

        let mut extractor = LinkExtractor::new(&page, 2, &frontier, &table);
        extractor.handle(&anchor("mailto:someone@example.com"));
        extractor.handle(&anchor("javascript:void(0)"));
        extractor.handle(&anchor("http://[::1"));
        extractor.handle(&anchor("ok.html"));

        assert_eq!(extractor.finish().links_admitted, 1);
    }

    #[test]
    fn test_frame_src_is_followed_and_other_tags_are_not() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let page = entry("https://example.com/", 0);

        let mut extractor = LinkExtractor::new(&page, 2, &frontier, &table);
        extractor.handle(&PageEvent::SimpleTag {
            name: "frame".to_string(),
            attributes: HashMap::from([("src".to_string(), "menu.html".to_string())]),
        });
        extractor.handle(&PageEvent::SimpleTag {
            name: "img".to_string(),
            attributes: HashMap::from([("src".to_string(), "logo.png".to_string())]),
        });
        extractor.handle(&PageEvent::StartTag {
            name: "a".to_string(),
            attributes: HashMap::from([("name".to_string(), "anchor".to_string())]),
        });

        assert_eq!(extractor.finish().links_admitted, 1);
    }

    #[tokio::test]
    async fn test_children_get_parent_depth_plus_one() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let page = entry("https://example.com/", 1);

        let mut extractor = LinkExtractor::new(&page, 1, &frontier, &table);
        extractor.handle(&anchor("child.html"));

        let claim = frontier.take().await.unwrap();
        assert_eq!(claim.entry().depth, 2);
    }

    #[test]
    fn test_pages_past_max_depth_only_count_words() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let page = entry("https://example.com/deep", 3);

        let mut extractor = LinkExtractor::new(&page, 2, &frontier, &table);
        extractor.handle(&anchor("next.html"));
        extractor.handle(&PageEvent::Text("0x10 -> 0X10".to_string()));

        let scan = extractor.finish();
        assert_eq!(scan.links_admitted, 0);
        assert_eq!(scan.tokens_counted, 3);
        assert_eq!(table.snapshot().get("0x10"), Some(&2));
    }

    #[test]
    fn test_extract_page_from_html() {
        let frontier = Frontier::new();
        let table = FrequencyTable::new();
        let page = entry("https://example.com/index.html", 0);
        frontier.try_admit(page.url.clone(), 0);

        let html = r#"
            <html><body>
              <p>Registers 0xFF, 0x10 and 0XFF => done</p>
              <a href="https://example.com/a.html">A</a>
              <a href="https://example.com/b.html">B</a>
              <a href="index.html#top">Home</a>
            </body></html>
        "#;
        let scan = extract_page(&page, html, 2, &frontier, &table);

        // index.html#top is not the same entry as index.html
        assert_eq!(scan.links_admitted, 3);
        assert_eq!(scan.tokens_counted, 4);

        let counts = table.snapshot();
        assert_eq!(counts.get("0xff"), Some(&2));
        assert_eq!(counts.get("0x10"), Some(&1));
        assert_eq!(counts.get("=>"), Some(&1));
    }
}
