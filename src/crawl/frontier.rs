// src/crawl/frontier.rs
// =============================================================================
// The frontier: the shared work queue of pages still to crawl.
//
// How it works:
// 1. A link is "admitted" once: it goes into the seen-set AND the queue
//    inside one lock, so two workers finding the same link can't both add it
// 2. Workers call take() to get the next page; while they work on it they
//    hold a Claim, which counts them as "active"
// 3. When the queue is empty and nobody is active, nobody can add more
//    work, so the crawl is finished and every waiting worker is released
//
// The queue, the seen-set and the active counter share one Mutex, which is
// what makes step 1 and the "finished?" check in step 3 atomic.
//
// Rust concepts:
// - Mutex: Only one thread at a time can touch the data inside
// - Notify: Lets async tasks sleep until someone wakes them
// - Drop (RAII): Code that runs automatically when a value goes away
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use url::Url;

// A page waiting to be crawled
//
// depth: 0 for the seed, parent depth + 1 for every discovered link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: usize,
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    seen: HashSet<Url>,
    // Workers currently holding a Claim
    active: usize,
    finished: bool,
}

#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    wakeup: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // Admits a URL if it has never been seen before
    //
    // Parameters:
    //   url: absolute URL to crawl
    //   depth: depth to record; callers enforce the depth limit
    //
    // Returns: true if the URL was added, false if it was already known
    pub fn try_admit(&self, url: Url, depth: usize) -> bool {
        let mut state = self.lock();
        if !state.seen.insert(url.clone()) {
            return false;
        }
        state.queue.push_back(FrontierEntry { url, depth });
        drop(state);

        self.wakeup.notify_waiters();
        true
    }

    // Waits for the next page to crawl
    //
    // Returns:
    //   Some(claim) - a page to crawl; the worker counts as active until the
    //                 claim is dropped
    //   None        - the crawl is over (nothing queued, nobody active)
    pub async fn take(&self) -> Option<Claim<'_>> {
        loop {
            // Register for wakeups before looking at the queue, so an
            // admission between the check and the await is not missed
            let wakeup = self.wakeup.notified();

            {
                let mut state = self.lock();
                if state.finished {
                    return None;
                }

                if let Some(entry) = state.queue.pop_front() {
                    state.active += 1;
                    return Some(Claim {
                        frontier: self,
                        entry,
                    });
                }

                if state.active == 0 {
                    state.finished = true;
                    drop(state);
                    self.wakeup.notify_waiters();
                    return None;
                }
            }

            // Queue is empty but some worker is still busy and may add links
            wakeup.await;
        }
    }

    // Stops the crawl early: every current and future take() returns None
    pub fn close(&self) {
        self.lock().finished = true;
        self.wakeup.notify_waiters();
    }

    // Called when a Claim is dropped
    fn release(&self) {
        let mut state = self.lock();
        state.active = state.active.saturating_sub(1);

        if state.active == 0 && state.queue.is_empty() {
            state.finished = true;
            drop(state);
            self.wakeup.notify_waiters();
        }
    }

    // Each operation leaves the state consistent before it can panic,
    // so a poisoned lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Proof that a worker is busy with one page
//
// Dropping it (normally, on early return, or during a panic) marks the
// worker idle again and may finish the crawl.
#[derive(Debug)]
pub struct Claim<'a> {
    frontier: &'a Frontier,
    entry: FrontierEntry,
}

impl Claim<'_> {
    pub fn entry(&self) -> &FrontierEntry {
        &self.entry
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.frontier.release();
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one Mutex instead of a concurrent queue plus a concurrent set?
//    - "Is it new? Then add it" must happen as one step
//    - With two separate structures another thread could slip in between
//
// 2. Why is the lock never held across .await?
//    - std::sync::MutexGuard must not be kept while a task is suspended
//    - Every lock here lives inside a block that ends before the await
//
// 3. What is notify_waiters?
//    - Wakes every task waiting on notified()
//    - A Notified future counts as waiting from the moment it is created,
//      even before it is first polled
//
// 4. Why a Claim type instead of a "done()" method?
//    - Forgetting to call done() would hang the crawl forever
//    - Drop runs automatically, even if the page visit panics
// -----------------------------------------------------------------------------
