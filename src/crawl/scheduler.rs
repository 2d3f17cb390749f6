// src/crawl/scheduler.rs
// =============================================================================
// Runs the crawl with a pool of concurrent workers.
//
// How it works:
// 1. The seed URL is admitted to the frontier at depth 0
// 2. N workers are spawned; each one loops:
//      take a page -> fetch it -> parse it -> admit its links / count words
// 3. A worker whose take() returns None exits; take() only returns None
//    once the queue is empty and no other worker is busy
// 4. The whole crawl is capped by a timeout; when it fires, the workers
//    are abandoned and whatever was counted so far is the result
//
// A page that can't be fetched or parsed is skipped. It never stops the
// other workers or the crawl.
//
// Rust concepts:
// - Arc: Shared ownership of the crawl state between tasks
// - JoinSet: A group of spawned tasks we can wait on or abort together
// - spawn_blocking: Running CPU-heavy parsing off the async threads
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};
use url::Url;

use super::extract::extract_page;
use super::frontier::{Frontier, FrontierEntry};
use super::CrawlConfig;
use crate::page::Transport;
use crate::words::FrequencyTable;

// The result of one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub pages_visited: usize,
    pub pages_failed: usize,
    pub links_admitted: usize,
    pub tokens_counted: usize,
    pub timed_out: bool,
    pub counts: HashMap<String, u64>,
}

// Everything the workers share for one run
#[derive(Debug, Default)]
struct CrawlState {
    frontier: Frontier,
    table: FrequencyTable,
    pages_visited: AtomicUsize,
    pages_failed: AtomicUsize,
    links_admitted: AtomicUsize,
    tokens_counted: AtomicUsize,
}

pub struct Crawler {
    config: CrawlConfig,
    transport: Arc<dyn Transport>,
}

impl Crawler {
    pub fn new(config: CrawlConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    // Crawls from `seed` until there is no work left or the timeout hits
    //
    // Never fails: page errors are logged and skipped, a timeout just
    // marks the summary as partial.
    pub async fn run(&self, seed: Url) -> CrawlSummary {
        let state = Arc::new(CrawlState::default());
        state.frontier.try_admit(seed, 0);

        let workers = self.config.workers.max(1);
        info!(
            workers,
            max_depth = self.config.max_depth,
            timeout = ?self.config.timeout,
            "starting crawl"
        );

        let mut pool = JoinSet::new();
        for id in 0..workers {
            pool.spawn(worker(
                id,
                Arc::clone(&state),
                Arc::clone(&self.transport),
                self.config.max_depth,
            ));
        }

        let drained = tokio::time::timeout(self.config.timeout, async {
            while let Some(result) = pool.join_next().await {
                if let Err(error) = result {
                    warn!(%error, "crawl worker stopped unexpectedly");
                }
            }
        })
        .await;

        let timed_out = drained.is_err();
        if timed_out {
            warn!(
                timeout = ?self.config.timeout,
                "crawl timed out, reporting partial results"
            );
            state.frontier.close();
            pool.abort_all();
        }

        CrawlSummary {
            pages_visited: state.pages_visited.load(Ordering::Relaxed),
            pages_failed: state.pages_failed.load(Ordering::Relaxed),
            links_admitted: state.links_admitted.load(Ordering::Relaxed),
            tokens_counted: state.tokens_counted.load(Ordering::Relaxed),
            timed_out,
            counts: state.table.snapshot(),
        }
    }
}

async fn worker(
    id: usize,
    state: Arc<CrawlState>,
    transport: Arc<dyn Transport>,
    max_depth: usize,
) {
    while let Some(claim) = state.frontier.take().await {
        visit(&state, transport.as_ref(), claim.entry(), max_depth).await;
    }
    trace!(worker = id, "no work left");
}

// Fetches and processes a single page
async fn visit(
    state: &Arc<CrawlState>,
    transport: &dyn Transport,
    page: &FrontierEntry,
    max_depth: usize,
) {
    debug!(depth = page.depth, "analyzing {}", page.url);

    let html = match transport.fetch(&page.url).await {
        Ok(html) => html,
        Err(error) => {
            debug!(url = %page.url, %error, "error processing page");
            state.pages_failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    let scan_state = Arc::clone(state);
    let scan_page = page.clone();
    let scanned = tokio::task::spawn_blocking(move || {
        extract_page(
            &scan_page,
            &html,
            max_depth,
            &scan_state.frontier,
            &scan_state.table,
        )
    })
    .await;

    match scanned {
        Ok(scan) => {
            state.pages_visited.fetch_add(1, Ordering::Relaxed);
            state
                .links_admitted
                .fetch_add(scan.links_admitted, Ordering::Relaxed);
            state
                .tokens_counted
                .fetch_add(scan.tokens_counted, Ordering::Relaxed);
        }
        Err(error) => {
            debug!(url = %page.url, %error, "error parsing page");
            state.pages_failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}
