//! Headless browsing session.
//!
//! Wires the navigation context to in-memory document, history and progress
//! bar implementations and replays scripted user steps against it.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::context::NavContext;
use crate::dom::{
    ContentSource, Element, HeadlessDocument, History, HttpContentSource, MemoryHistory,
};
use crate::error::{FetchError, NavError};
use crate::input::{Event, InputHandlers};
use crate::navigator::{NavOutcome, Navigator, TransitionStrategy};
use crate::progress::{HeadlessProgressBar, Phase, ProgressIndicator};
use crate::routes::{RouteError, DEFAULT_ROUTE};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Nav(#[from] NavError),
}

/// A scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Click(String),
    Hover(String),
    Back,
    Forward,
    Wait(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid step '{input}': expected click:<path>, hover:<path>, back, forward or wait:<ms>")]
pub struct StepParseError {
    input: String,
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StepParseError {
            input: s.to_string(),
        };

        match s.split_once(':') {
            Some(("click", path)) if !path.is_empty() => Ok(Step::Click(path.to_string())),
            Some(("hover", path)) if !path.is_empty() => Ok(Step::Hover(path.to_string())),
            Some(("wait", ms)) => ms
                .parse::<u64>()
                .map(|ms| Step::Wait(Duration::from_millis(ms)))
                .map_err(|_| invalid()),
            None if s == "back" => Ok(Step::Back),
            None if s == "forward" => Ok(Step::Forward),
            _ => Err(invalid()),
        }
    }
}

/// Observable state of a session.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub location: String,
    pub content: String,
    pub theme: String,
    pub progress: Phase,
    pub history: Vec<String>,
    pub cached: Vec<String>,
    pub last_path: String,
}

pub struct Session {
    document: Arc<HeadlessDocument>,
    history: Arc<MemoryHistory>,
    progress_bar: Arc<HeadlessProgressBar>,
    navigator: Arc<Navigator>,
    input: InputHandlers,
}

impl Session {
    /// Session fetching over HTTP from the configured site.
    pub fn from_config(config: &Config, start: &str) -> Result<Self, SessionError> {
        let source = HttpContentSource::new(config.site.base_url.clone(), config.fetch.timeout())?;
        Self::with_source(config, Arc::new(source), start)
    }

    pub fn with_source(
        config: &Config,
        source: Arc<dyn ContentSource>,
        start: &str,
    ) -> Result<Self, SessionError> {
        let routes = config.route_table()?;
        let document = Arc::new(HeadlessDocument::new());
        let history = Arc::new(MemoryHistory::new(start));
        let progress_bar = Arc::new(HeadlessProgressBar::new());
        let progress = ProgressIndicator::new(progress_bar.clone(), config.progress.reset_delay());

        let ctx = Arc::new(NavContext::new(
            routes,
            source,
            document.clone(),
            history.clone(),
            progress,
        ));
        let strategy = TransitionStrategy::from_config(&config.transitions);
        let navigator = Arc::new(Navigator::new(ctx, strategy));
        let input = InputHandlers::new(Arc::clone(&navigator));

        Ok(Self {
            document,
            history,
            progress_bar,
            navigator,
            input,
        })
    }

    /// Session at the default route.
    pub fn at_home(config: &Config, source: Arc<dyn ContentSource>) -> Result<Self, SessionError> {
        Self::with_source(config, source, DEFAULT_ROUTE)
    }

    pub fn document(&self) -> &HeadlessDocument {
        &self.document
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    pub fn progress_bar(&self) -> &HeadlessProgressBar {
        &self.progress_bar
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn input(&self) -> &InputHandlers {
        &self.input
    }

    /// Render the starting location.
    pub async fn boot(&self) -> Result<(), SessionError> {
        self.navigator.boot().await?;
        Ok(())
    }

    /// Perform one step and wait for the work it triggers.
    ///
    /// Returns the outcome of the navigation the step started, if any.
    pub async fn run(&self, step: &Step) -> Result<Option<NavOutcome>, SessionError> {
        tracing::debug!(?step, "running step");
        let dispatch = match step {
            Step::Click(path) => {
                let target = Element::app_link(path.clone());
                self.input.dispatch(Event::Click { target })
            }
            Step::Hover(path) => {
                let target = Element::app_link(path.clone());
                self.input.dispatch(Event::MouseOver { target })
            }
            Step::Back => {
                if !self.history.back() {
                    return Ok(None);
                }
                self.input.dispatch(Event::PopState)
            }
            Step::Forward => {
                if !self.history.forward() {
                    return Ok(None);
                }
                self.input.dispatch(Event::PopState)
            }
            Step::Wait(duration) => {
                tokio::time::sleep(*duration).await;
                return Ok(None);
            }
        };

        Ok(dispatch.settle().await?)
    }

    pub fn snapshot(&self) -> Snapshot {
        let ctx = self.navigator.context();
        Snapshot {
            location: self.history.current(),
            content: self.document.content(),
            theme: self.document.theme_class(),
            progress: ctx.progress.phase(),
            history: self.history.entries(),
            cached: ctx.cache.keys(),
            last_path: ctx.last_path(),
        }
    }
}
