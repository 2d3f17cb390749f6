// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - A shared frontier that admits every URL at most once
// - Depth-limited link following (<a href> and <frame src>)
// - A pool of concurrent workers that agree when the crawl is done
// - An overall timeout that turns a slow crawl into a partial result
//
// Submodules:
// - frontier: The deduplicating work queue and the "are we done?" protocol
// - extract: Turns one page's events into new links and counted words
// - scheduler: The worker pool, timeout and crawl summary
// =============================================================================

mod extract;
mod frontier;
mod scheduler;

use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use scheduler::{CrawlSummary, Crawler};

// How a crawl should behave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Links are followed from pages whose depth is at most this
    pub max_depth: usize,
    /// Number of pages processed at the same time
    pub workers: usize,
    /// Upper bound for the whole crawl
    pub timeout: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            workers: default_workers(),
            timeout: Duration::from_secs(300),
        }
    }
}

// One worker per CPU core, or 1 if we can't tell
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

// Problems with the seed URL; these stop the program before crawling
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("seed URL '{0}' has no hierarchical path and cannot be crawled")]
    OpaqueSeed(String),
}

// Parses and validates the seed URL
//
// A '/' is always appended, so the seed is treated as a directory and
// relative links on it resolve below it.
//
// Examples:
//   "https://example.com"       -> Ok("https://example.com/")
//   "https://example.com/docs"  -> Ok("https://example.com/docs/")
//   "example.com"               -> Err(InvalidSeed) (no scheme)
//   "mailto:me@example.com"     -> Err(OpaqueSeed)
pub fn parse_seed(raw: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(&format!("{raw}/")).map_err(|source| CrawlError::InvalidSeed {
        url: raw.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(CrawlError::OpaqueSeed(raw.to_string()));
    }

    Ok(url)
}
