//! Page loader: resolves a path to content and swaps it into the document.

use std::sync::Arc;

use crate::context::NavContext;
use crate::error::NavError;
use crate::routes::Route;

#[derive(Clone)]
pub struct PageLoader {
    ctx: Arc<NavContext>,
}

impl PageLoader {
    pub fn new(ctx: Arc<NavContext>) -> Self {
        Self { ctx }
    }

    /// Load `path` and apply it to the document.
    ///
    /// Unknown paths render the default route but are cached under their
    /// own key.
    pub async fn load(&self, path: &str) -> Result<(), NavError> {
        let (route, html) = self.resolve_content(path).await?;
        self.apply(route, &html);
        Ok(())
    }

    /// Resolve the route for `path` and its body without touching the document.
    pub async fn resolve_content(&self, path: &str) -> Result<(&Route, String), NavError> {
        let route = self.ctx.routes.resolve(path);

        if let Some(html) = self.ctx.cache.get(path) {
            tracing::debug!(path, "cache hit");
            return Ok((route, html));
        }

        let html = self
            .ctx
            .fetch_cached(path, route)
            .await
            .map_err(|source| NavError::Fetch {
                path: path.to_string(),
                source,
            })?;

        Ok((route, html))
    }

    /// Replace the content surface and set `route`'s theme marker.
    pub fn apply(&self, route: &Route, html: &str) {
        self.ctx.document.set_content(html);
        self.ctx.document.set_theme(route.theme);
    }
}
