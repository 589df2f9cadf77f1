//! Input handlers: link clicks, history traversal and hover prefetch.
//!
//! Handlers never await the work they trigger. Navigations and prefetches
//! are spawned onto the tokio runtime and their join handle is returned
//! to the caller, so `dispatch` must run inside a runtime.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::context::NavContext;
use crate::dom::Element;
use crate::error::NavError;
use crate::navigator::{NavOutcome, Navigator};

/// A DOM event delivered to the navigation layer.
#[derive(Debug, Clone)]
pub enum Event {
    Click { target: Element },
    /// Back/forward. Carries no payload; the location is read from history.
    PopState,
    MouseOver { target: Element },
}

/// What a handler did with an event.
#[derive(Debug, Default)]
pub struct Dispatch {
    /// The browser's default action should be suppressed.
    pub default_prevented: bool,
    /// Spawned navigation, if any.
    pub navigation: Option<JoinHandle<Result<NavOutcome, NavError>>>,
    /// Spawned hover prefetch, if any. Its failures are dropped.
    pub prefetch: Option<JoinHandle<()>>,
}

impl Dispatch {
    fn ignored() -> Self {
        Self::default()
    }

    /// Wait for the spawned work and report the navigation outcome.
    ///
    /// Returns `Ok(None)` when the event started no navigation.
    pub async fn settle(self) -> Result<Option<NavOutcome>, NavError> {
        if let Some(prefetch) = self.prefetch {
            if let Err(err) = prefetch.await {
                tracing::warn!(error = %err, "prefetch task aborted");
            }
        }

        match self.navigation {
            Some(navigation) => Ok(Some(navigation.await??)),
            None => Ok(None),
        }
    }
}

#[derive(Clone)]
pub struct InputHandlers {
    navigator: Arc<Navigator>,
}

impl InputHandlers {
    pub fn new(navigator: Arc<Navigator>) -> Self {
        Self { navigator }
    }

    fn ctx(&self) -> &Arc<NavContext> {
        self.navigator.context()
    }

    pub fn dispatch(&self, event: Event) -> Dispatch {
        match event {
            Event::Click { target } => self.on_click(&target),
            Event::PopState => {
                let path = self.ctx().history.current();
                let navigator = Arc::clone(&self.navigator);
                Dispatch {
                    navigation: Some(tokio::spawn(async move {
                        navigator.navigate_from_history(&path).await
                    })),
                    ..Dispatch::ignored()
                }
            }
            Event::MouseOver { target } => Dispatch {
                prefetch: self.on_hover(&target),
                ..Dispatch::ignored()
            },
        }
    }

    fn on_click(&self, target: &Element) -> Dispatch {
        let Some(link) = target.closest_link() else {
            return Dispatch::ignored();
        };
        let Some(path) = link.href() else {
            // No href: nothing to navigate to, let the browser handle it.
            return Dispatch::ignored();
        };

        self.ctx().set_last_path(path);
        let navigator = Arc::clone(&self.navigator);
        let path = path.to_string();
        Dispatch {
            default_prevented: true,
            navigation: Some(tokio::spawn(async move { navigator.navigate(&path).await })),
            prefetch: None,
        }
    }

    fn on_hover(&self, target: &Element) -> Option<JoinHandle<()>> {
        let path = target.closest_link()?.href()?.to_string();
        let ctx = Arc::clone(self.ctx());

        let route = ctx.routes.get(&path)?.clone();
        if ctx.cache.has(&path) {
            return None;
        }

        Some(tokio::spawn(async move {
            match ctx.fetch_cached(&path, &route).await {
                Ok(_) => tracing::debug!(path = %path, "prefetched"),
                Err(err) => tracing::debug!(path = %path, error = %err, "prefetch dropped"),
            }
        }))
    }
}
