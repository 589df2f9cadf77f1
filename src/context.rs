//! Navigation context shared by the loader, navigator and input handlers.
//!
//! Created once at startup. The cache is the only mutable shared resource
//! besides the collaborators themselves.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::ContentCache;
use crate::dom::{ContentSource, Document, History};
use crate::error::FetchError;
use crate::progress::ProgressIndicator;
use crate::routes::{Route, RouteTable};

pub struct NavContext {
    pub routes: RouteTable,
    pub cache: ContentCache,
    pub source: Arc<dyn ContentSource>,
    pub document: Arc<dyn Document>,
    pub history: Arc<dyn History>,
    pub progress: ProgressIndicator,
    /// Target of the most recent link click.
    last_path: Mutex<String>,
}

impl NavContext {
    pub fn new(
        routes: RouteTable,
        source: Arc<dyn ContentSource>,
        document: Arc<dyn Document>,
        history: Arc<dyn History>,
        progress: ProgressIndicator,
    ) -> Self {
        let last_path = Mutex::new(history.current());
        Self {
            routes,
            cache: ContentCache::new(),
            source,
            document,
            history,
            progress,
            last_path,
        }
    }

    pub fn last_path(&self) -> String {
        self.last_path.lock().clone()
    }

    pub(crate) fn set_last_path(&self, path: &str) {
        *self.last_path.lock() = path.to_string();
    }

    /// Body for `path`, from the cache or fetched from `route`'s location.
    ///
    /// The entry is keyed by `path` even when `route` is the fallback.
    pub async fn fetch_cached(&self, path: &str, route: &Route) -> Result<String, FetchError> {
        let source = Arc::clone(&self.source);
        let location = route.content_location.clone();
        self.cache
            .get_or_fetch(path, || async move { source.fetch_text(&location).await })
            .await
    }
}
