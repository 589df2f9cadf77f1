//! Navigation orchestration.
//!
//! A navigation drives the progress indicator, runs the page load inside
//! the selected transition strategy, and records the new location in
//! history once the content is on screen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::TransitionConfig;
use crate::context::NavContext;
use crate::dom::{CrossfadeTransition, ViewTransition};
use crate::error::NavError;
use crate::loader::PageLoader;

/// How content swaps are presented. Chosen once at startup.
#[derive(Clone)]
pub enum TransitionStrategy {
    /// Swap content directly.
    Immediate,
    /// Swap content inside an animated transition.
    Animated(Arc<dyn ViewTransition>),
}

impl TransitionStrategy {
    pub fn from_config(config: &TransitionConfig) -> Self {
        if config.animated {
            TransitionStrategy::Animated(Arc::new(CrossfadeTransition::new(config.settle())))
        } else {
            TransitionStrategy::Immediate
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, TransitionStrategy::Animated(_))
    }
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavOutcome {
    /// Path is not a registered route; nothing happened.
    Ignored,
    /// Content swapped in and history updated.
    Completed,
    /// A newer navigation started while this one was loading; its result
    /// was discarded.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryUpdate {
    Push,
    Keep,
}

pub struct Navigator {
    ctx: Arc<NavContext>,
    loader: PageLoader,
    strategy: TransitionStrategy,
    generation: AtomicU64,
}

impl Navigator {
    pub fn new(ctx: Arc<NavContext>, strategy: TransitionStrategy) -> Self {
        let loader = PageLoader::new(Arc::clone(&ctx));
        Self {
            ctx,
            loader,
            strategy,
            generation: AtomicU64::new(0),
        }
    }

    pub fn context(&self) -> &Arc<NavContext> {
        &self.ctx
    }

    pub fn loader(&self) -> &PageLoader {
        &self.loader
    }

    pub fn strategy(&self) -> &TransitionStrategy {
        &self.strategy
    }

    /// Render the current history location without touching history or
    /// the progress indicator.
    pub async fn boot(&self) -> Result<(), NavError> {
        let path = self.ctx.history.current();
        tracing::debug!(path = %path, "initial page load");
        self.loader.load(&path).await
    }

    /// Navigate to `path`.
    ///
    /// Unknown paths are ignored. The progress indicator is finished on
    /// every exit path, unless a newer navigation has taken it over.
    pub async fn navigate(&self, path: &str) -> Result<NavOutcome, NavError> {
        self.run(path, HistoryUpdate::Push).await
    }

    /// Navigate to a location history has already moved to (back/forward).
    ///
    /// Replays the full sequence but leaves history untouched, so the
    /// forward entries survive.
    pub async fn navigate_from_history(&self, path: &str) -> Result<NavOutcome, NavError> {
        self.run(path, HistoryUpdate::Keep).await
    }

    async fn run(&self, path: &str, history: HistoryUpdate) -> Result<NavOutcome, NavError> {
        let Some(route) = self.ctx.routes.get(path) else {
            tracing::debug!(path, "ignoring navigation to unregistered route");
            return Ok(NavOutcome::Ignored);
        };

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let span = tracing::info_span!("navigate", nav_id = %Uuid::new_v4(), path);

        async move {
            self.ctx.progress.start();
            let _progress = scopeguard::guard(&self.ctx.progress, |progress| {
                if self.is_current(ticket) {
                    progress.finish();
                }
            });

            let result = match &self.strategy {
                TransitionStrategy::Immediate => self.swap(path, ticket, history).await,
                TransitionStrategy::Animated(transition) => {
                    // Theme goes on first so the transition can pick it up.
                    self.ctx.document.set_theme(route.theme);

                    let mut outcome = NavOutcome::Completed;
                    let settled = transition
                        .run(Box::pin(async {
                            outcome = self.swap(path, ticket, history).await?;
                            Ok::<(), NavError>(())
                        }))
                        .await;
                    settled.map(|()| outcome)
                }
            };

            match &result {
                Ok(outcome) => tracing::info!(?outcome, "navigation finished"),
                Err(err) => tracing::warn!(error = %err, "navigation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn swap(
        &self,
        path: &str,
        ticket: u64,
        history: HistoryUpdate,
    ) -> Result<NavOutcome, NavError> {
        let (route, html) = self.loader.resolve_content(path).await?;

        if !self.is_current(ticket) {
            tracing::debug!(path, "discarding superseded navigation");
            return Ok(NavOutcome::Superseded);
        }

        self.loader.apply(route, &html);
        if history == HistoryUpdate::Push {
            self.ctx.history.push(path);
        }
        Ok(NavOutcome::Completed)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}
