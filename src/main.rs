// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging on stderr
// 3. Crawl from the seed URL, counting tokens along the way
// 4. Print the most frequent tokens to stdout
// 5. Exit with proper code (0 = success, 2 = error before crawling)
//
// Rust concepts used:
// - async/await: Because many pages are fetched concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Arc<dyn Trait>: Sharing one transport between all workers
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier, workers, link extraction
mod page; // src/page/ - fetching and parsing single pages
mod telemetry; // src/telemetry.rs - logging setup
mod words; // src/words/ - token classification, counting, ranking

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use std::sync::Arc;
use tracing::info;

use cli::Cli;
use crawl::Crawler;
use page::HttpTransport;
use words::RankedToken;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Prints usage and exits by itself if the arguments are wrong
    let cli = Cli::parse();
    telemetry::init(cli.debug_level);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
//
// Only seed validation and client setup can fail; everything that goes
// wrong during the crawl is handled per page.
async fn run(cli: Cli) -> Result<()> {
    let seed = crawl::parse_seed(&cli.seed_url)?;
    let transport = HttpTransport::new().context("failed to create HTTP client")?;

    let crawler = Crawler::new(cli.crawl_config(), Arc::new(transport));
    let summary = crawler.run(seed).await;

    info!(
        pages_visited = summary.pages_visited,
        pages_failed = summary.pages_failed,
        links_admitted = summary.links_admitted,
        tokens_counted = summary.tokens_counted,
        timed_out = summary.timed_out,
        "crawl finished"
    );

    let report = words::top_n(&summary.counts, cli.limit);
    print_report(&report, cli.json)
}

// Prints the report either as `token;count` lines or JSON
fn print_report(report: &[RankedToken], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        for entry in report {
            println!("{};{}", entry.token, entry.count);
        }
    }
    Ok(())
}
