//! Single-slot debounced execution.
//!
//! A [`Debouncer`] holds at most one pending task. Scheduling a new task aborts
//! the pending one, so only the most recent request within the quiet period
//! runs. Tasks are spawned on the current tokio runtime.

use crate::search::{DEFAULT_LIMIT, SearchResults};
use crate::state::SiteState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Duration;

/// Quiet period used when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Owned handle to at most one delayed task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` after the configured delay, superseding any pending task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_after(self.delay, task);
    }

    /// Schedules `task` after `delay`, superseding any pending task.
    pub fn schedule_after<F>(&self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.slot();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        *pending = Some(handle.abort_handle());
    }

    /// Drops the pending task without running it.
    ///
    /// Returns `true` if a task was still waiting.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a scheduled task has not yet completed.
    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|h| !h.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Query evaluator behind a debouncer, as used by a live search box.
#[derive(Debug)]
pub struct DebouncedSearch {
    state: Arc<SiteState>,
    debouncer: Debouncer,
    limit: usize,
}

impl DebouncedSearch {
    pub fn new(state: Arc<SiteState>, delay: Duration) -> Self {
        Self {
            state,
            debouncer: Debouncer::new(delay),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Overrides the per-kind result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Runs the search once the quiet period elapses and hands the results to
    /// `callback`. A later call replaces this one if it arrives first.
    pub fn search_with_debounce<F>(&self, query: impl Into<String>, callback: F)
    where
        F: FnOnce(SearchResults) + Send + 'static,
    {
        let query = query.into();
        let state = Arc::clone(&self.state);
        let limit = self.limit;
        tracing::trace!("Debouncing search for {:?}", query);
        self.debouncer.schedule(move || {
            callback(state.search(&query, limit));
        });
    }

    /// Feeds `query` one character at a time, `interval` apart, as a user
    /// typing into the search box.
    ///
    /// Waits for every scheduled search to finish or be superseded and returns
    /// the prefix and results of the longest prefix that ran.
    pub async fn replay_typing(
        &self,
        query: &str,
        interval: Duration,
    ) -> Option<(String, SearchResults)> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut typed = String::new();
        for c in query.chars() {
            typed.push(c);
            let tx = tx.clone();
            let prefix = typed.clone();
            self.search_with_debounce(typed.clone(), move |results| {
                let _ = tx.send((prefix, results));
            });
            tokio::time::sleep(interval).await;
        }
        drop(tx);

        // Searches for earlier prefixes can still land when the window is tiny
        let mut latest: Option<(String, SearchResults)> = None;
        while let Some((prefix, results)) = rx.recv().await {
            if latest
                .as_ref()
                .is_none_or(|(longest, _)| prefix.len() >= longest.len())
            {
                latest = Some((prefix, results));
            }
        }
        latest
    }

    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
