// src/page/mod.rs
// =============================================================================
// This module covers a single page: getting it and reading it.
//
// Submodules:
// - fetch: Downloads page text through the Transport trait
// - html: Parses page text into PageEvents (tags and text)
//
// The crawl engine only sees the re-exported items below, so it does not
// care whether pages come from the network or from a test fixture.
// =============================================================================

mod fetch;
mod html;

pub use fetch::{FetchError, HttpTransport, Transport};
pub use html::{parse_events, PageEvent};
