use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routes::{builtin_routes, Route, RouteError, RouteTable};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub transitions: TransitionConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub serve: ServeConfig,
    /// Route table. Defaults to the home, photo and about pages.
    #[serde(default = "builtin_routes")]
    pub routes: Vec<Route>,
}

/// Where route content is fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL content locations are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Delay before a completed progress bar resets to idle (default: 500).
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

/// Animated transition capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Whether animated transitions are available (default: true).
    #[serde(default = "default_animated")]
    pub animated: bool,
    /// Time for an animation to settle after the swap (default: 250).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Static content server used by `spanav serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Bind address (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Directory holding the page files.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_reset_delay_ms() -> u64 {
    500
}

fn default_animated() -> bool {
    true
}

fn default_settle_ms() -> u64 {
    250
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("public")
}

impl Config {
    pub fn route_table(&self) -> Result<RouteTable, RouteError> {
        RouteTable::new(self.routes.iter().cloned())
    }
}

impl ProgressConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl TransitionConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            progress: ProgressConfig::default(),
            transitions: TransitionConfig::default(),
            fetch: FetchConfig::default(),
            serve: ServeConfig::default(),
            routes: builtin_routes(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            animated: default_animated(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            root: default_root(),
        }
    }
}
