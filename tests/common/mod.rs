//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_site;

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use spanav::config::Config;
use spanav::dom::ContentSource;
use spanav::{FetchError, Session};

pub const HOME: &str = "/pages/home.html";
pub const PHOTO: &str = "/pages/photo.html";
pub const ABOUT: &str = "/pages/about.html";

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Content source that records every fetch and can delay or omit pages.
#[derive(Default)]
pub struct CountingSource {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    fetches: Mutex<Vec<String>>,
}

impl CountingSource {
    /// The built-in home, photo and about pages.
    pub fn site() -> Self {
        Self::default()
            .with_page(HOME, "<div>Home</div>")
            .with_page(PHOTO, "<div>Photo</div>")
            .with_page(ABOUT, "<div>About</div>")
    }

    pub fn with_page(mut self, location: &str, body: &str) -> Self {
        self.pages.insert(location.to_string(), body.to_string());
        self
    }

    pub fn without_page(mut self, location: &str) -> Self {
        self.pages.remove(location);
        self
    }

    pub fn with_delay(mut self, location: &str, delay: Duration) -> Self {
        self.delays.insert(location.to_string(), delay);
        self
    }

    pub fn fetches_of(&self, location: &str) -> usize {
        self.fetches.lock().iter().filter(|l| *l == location).count()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().len()
    }
}

#[async_trait]
impl ContentSource for CountingSource {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        self.fetches.lock().push(location.to_string());
        if let Some(delay) = self.delays.get(location) {
            tokio::time::sleep(*delay).await;
        }
        self.pages
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                location: location.to_string(),
            })
    }
}

/// Config with animated transitions switched off.
pub fn immediate_config() -> Config {
    let mut config = Config::default();
    config.transitions.animated = false;
    config
}

/// Config with animated transitions settling after `settle_ms`.
pub fn animated_config(settle_ms: u64) -> Config {
    let mut config = Config::default();
    config.transitions.animated = true;
    config.transitions.settle_ms = settle_ms;
    config
}

/// Booted session at `/` over `source`.
pub async fn booted_session(config: &Config, source: Arc<CountingSource>) -> Session {
    let session = Session::at_home(config, source).expect("Failed to build session");
    session.boot().await.expect("Failed to boot session");
    session
}
