//! Shared crawl state: frontier, visited set and outstanding job count
//!
//! The three live behind one mutex so that every check-and-update is atomic
//! with respect to the others. Workers report completion through
//! [`CrawlFrontier::complete`], which wakes the coordinator.

use crate::url::without_fragment;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;
use url::Url;

/// What the coordinator should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Fetch this URL; it has been marked visited and counted as outstanding
    Dispatch(Url),

    /// The frontier is empty but fetches are in flight
    Wait,

    /// The frontier is empty and nothing is in flight
    Done,
}

#[derive(Debug, Default)]
struct FrontierState {
    /// URLs discovered but not yet examined; duplicates are tolerated
    pending: Vec<Url>,

    /// URLs already dispatched; never shrinks
    visited: HashSet<Url>,

    /// Fetches dispatched and not yet completed
    outstanding: usize,
}

/// Frontier, visited set and outstanding count as one unit
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    state: Mutex<FrontierState>,
    changed: Notify,
}

impl CrawlFrontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed: Url) -> Self {
        let frontier = Self::default();
        frontier.lock().pending.push(without_fragment(&seed));
        frontier
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // Every mutation is a single step, so a poisoned state is still consistent
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Takes the next unvisited URL, or reports whether to wait or stop
    ///
    /// Already-visited URLs are discarded. A returned `Dispatch` has been
    /// added to the visited set and counted as outstanding in the same
    /// critical section.
    pub fn next_step(&self) -> NextStep {
        let mut state = self.lock();

        while let Some(url) = state.pending.pop() {
            if state.visited.insert(url.clone()) {
                state.outstanding += 1;
                return NextStep::Dispatch(url);
            }
        }

        if state.outstanding == 0 {
            NextStep::Done
        } else {
            NextStep::Wait
        }
    }

    /// Merges a finished fetch's links and releases its outstanding slot
    pub fn complete(&self, links: Vec<Url>) {
        {
            let mut state = self.lock();
            state
                .pending
                .extend(links.iter().map(without_fragment));
            state.outstanding = state.outstanding.saturating_sub(1);
        }
        self.changed.notify_one();
    }

    /// Waits until a worker completes
    ///
    /// A completion that happens between [`next_step`](Self::next_step)
    /// returning `Wait` and this call is not lost: `Notify` keeps the permit.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    /// Number of URLs marked visited so far
    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }

    /// Number of fetches currently in flight
    pub fn outstanding(&self) -> usize {
        self.lock().outstanding
    }

    /// Number of URLs waiting in the frontier, duplicates included
    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }
}

/// One dispatched fetch's claim on the outstanding count
///
/// Dropping it without calling [`finish`](Self::finish), as happens when the
/// worker task panics, still releases the slot with no links.
#[derive(Debug)]
pub struct InFlightFetch {
    frontier: Arc<CrawlFrontier>,
    finished: bool,
}

impl InFlightFetch {
    /// Takes responsibility for one slot already counted by `next_step`
    pub fn new(frontier: Arc<CrawlFrontier>) -> Self {
        Self {
            frontier,
            finished: false,
        }
    }

    /// Merges the fetch's links and releases the slot
    pub fn finish(mut self, links: Vec<Url>) {
        self.finished = true;
        self.frontier.complete(links);
    }
}

impl Drop for InFlightFetch {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Fetch task ended without completing; releasing its slot");
            self.frontier.complete(Vec::new());
        }
    }
}
