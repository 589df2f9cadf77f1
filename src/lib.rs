//! Headless single-page-application navigation engine.
//!
//! Intercepts in-app link clicks, swaps page content without a reload,
//! drives a progress indicator and prefetches linked pages on hover.

pub mod cache;
pub mod config;
pub mod context;
pub mod dom;
pub mod error;
pub mod input;
pub mod loader;
pub mod logging;
pub mod navigator;
pub mod progress;
pub mod routes;
pub mod serve;
pub mod session;

pub use cache::ContentCache;
pub use context::NavContext;
pub use error::{FetchError, NavError};
pub use input::{Dispatch, Event, InputHandlers};
pub use loader::PageLoader;
pub use navigator::{NavOutcome, Navigator, TransitionStrategy};
pub use progress::{Phase, ProgressIndicator};
pub use routes::{Route, RouteTable, Theme};
pub use session::{Session, Snapshot, Step};
