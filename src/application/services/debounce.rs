//! Debounced search-as-you-type
//!
//! Each keystroke submits the current query. A submission waits out the quiet
//! period and then runs the search once, unless a newer submission cancels it first.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Owns at most one pending delayed search.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `search(query)` after the quiet period, cancelling any pending one.
    ///
    /// The handle resolves to `None` when the submission was superseded or
    /// cancelled before the delay elapsed.
    pub fn submit<F, Fut, T>(&mut self, query: impl Into<String>, search: F) -> JoinHandle<Option<T>>
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let delay = self.delay;
        let query = query.into();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("debounce: superseded query {:?}", query);
                    None
                }
                _ = tokio::time::sleep(delay) => Some(search(query).await),
            }
        })
    }

    /// Cancel the pending submission, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
