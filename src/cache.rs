//! In-memory content cache shared by page loads and hover prefetches.
//!
//! Entries are keyed by the requested path (not the content location),
//! never expire and are never evicted. Each key owns a once-cell so that
//! concurrent fetches for the same path collapse into a single request.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<String>>;

/// Cloneable handle to the process-wide content cache.
#[derive(Clone, Default)]
pub struct ContentCache {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a completed entry exists for `path`.
    ///
    /// A fetch that is still in flight does not count.
    pub fn has(&self, path: &str) -> bool {
        self.slots
            .lock()
            .get(path)
            .is_some_and(|slot| slot.initialized())
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.slots
            .lock()
            .get(path)
            .and_then(|slot| slot.get().cloned())
    }

    /// Store `content` under `path`, replacing any previous entry.
    ///
    /// Callers already awaiting an in-flight fetch for `path` still receive
    /// that fetch's result; later readers see `content`.
    pub fn set(&self, path: impl Into<String>, content: impl Into<String>) {
        let slot = Arc::new(OnceCell::new_with(Some(content.into())));
        self.slots.lock().insert(path.into(), slot);
    }

    /// Return the cached body for `path`, running `fetch` on a miss.
    ///
    /// Only one `fetch` runs per key at a time: concurrent callers wait on
    /// the first one. If it fails, the error goes to that caller, nothing is
    /// stored, and the next waiter runs its own `fetch`.
    pub async fn get_or_fetch<F, Fut, E>(&self, path: &str, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(path.to_string()).or_default())
        };

        slot.get_or_try_init(fetch).await.cloned()
    }

    /// Keys of completed entries, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}
