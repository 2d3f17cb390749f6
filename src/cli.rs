// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   hexcrawl <SEED_URL> [MAX_DEPTH] [DEBUG_LEVEL] [--limit N] [--workers N]
//            [--timeout-secs N] [--json]
//
// clap rejects a missing seed URL or a non-numeric depth/debug level with a
// usage message on stderr and a non-zero exit code, before we crawl anything.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::time::Duration;

use crate::crawl::{default_workers, CrawlConfig};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// Fields without #[arg(long)] are positional arguments, in order
#[derive(Parser, Debug)]
#[command(
    name = "hexcrawl",
    version,
    about = "Crawl a website and count hex-like numbers and symbol runs",
    long_about = "hexcrawl follows links from a seed page up to a maximum depth and counts \
                  tokens such as 0x1F or -> in the page text. The most frequent tokens are \
                  printed as `token;count` lines."
)]
pub struct Cli {
    /// Website URL to start crawling from (e.g., https://example.com)
    pub seed_url: String,

    /// Follow links found on pages up to this depth (the seed is depth 0)
    #[arg(default_value_t = 2)]
    pub max_depth: usize,

    /// Diagnostics on stderr: 0 = warnings, 1 = progress, 2 = every parser event
    #[arg(default_value_t = 0)]
    pub debug_level: u8,

    /// Number of tokens to report
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Pages processed at the same time (default: number of CPU cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Stop crawling after this many seconds and report what was counted
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,

    /// Output results in JSON format instead of `token;count` lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            workers: self.workers.unwrap_or_else(default_workers).max(1),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
