//! Static route table.
//!
//! Maps an in-app path to the location its content is fetched from and
//! the transition theme applied while it is swapped in. The table is built
//! once at startup and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key of the route every unknown path falls back to.
pub const DEFAULT_ROUTE: &str = "/";

/// Visual transition style applied to the document root during a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Fade,
    Slide,
    Zoom,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Fade => "fade",
            Theme::Slide => "slide",
            Theme::Zoom => "zoom",
        }
    }

    /// Class placed on the document root, e.g. `transition-slide`.
    pub fn marker(self) -> String {
        format!("transition-{}", self.name())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// In-app path, e.g. `/photo`.
    pub key: String,
    /// Where the page body is fetched from, e.g. `/pages/photo.html`.
    #[serde(rename = "content")]
    pub content_location: String,
    pub theme: Theme,
}

impl Route {
    pub fn new(key: impl Into<String>, content_location: impl Into<String>, theme: Theme) -> Self {
        Self {
            key: key.into(),
            content_location: content_location.into(),
            theme,
        }
    }
}

/// Errors raised while building a route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route table has no default '/' route")]
    MissingDefault,

    #[error("Route '{key}' is registered more than once")]
    Duplicate { key: String },
}

/// Immutable path -> route mapping with a guaranteed default route.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
}

impl RouteTable {
    /// Build a table, rejecting duplicates and a missing default route.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouteError> {
        let mut map = HashMap::new();
        for route in routes {
            if map.contains_key(&route.key) {
                return Err(RouteError::Duplicate { key: route.key });
            }
            map.insert(route.key.clone(), route);
        }

        if !map.contains_key(DEFAULT_ROUTE) {
            return Err(RouteError::MissingDefault);
        }

        Ok(Self { routes: map })
    }

    /// The home, photo and about pages.
    pub fn builtin() -> Self {
        let mut routes = HashMap::new();
        for route in builtin_routes() {
            routes.insert(route.key.clone(), route);
        }
        Self { routes }
    }

    /// Resolve a path, falling back to the default route for unknown paths.
    pub fn resolve(&self, path: &str) -> &Route {
        match self.routes.get(path) {
            Some(route) => route,
            None => &self.routes[DEFAULT_ROUTE],
        }
    }

    /// Exact lookup without fallback.
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.get(path)
    }

    /// All routes, sorted by key.
    pub fn routes(&self) -> Vec<&Route> {
        let mut routes: Vec<&Route> = self.routes.values().collect();
        routes.sort_by(|a, b| a.key.cmp(&b.key));
        routes
    }

}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn builtin_routes() -> Vec<Route> {
    vec![
        Route::new("/", "/pages/home.html", Theme::Fade),
        Route::new("/photo", "/pages/photo.html", Theme::Slide),
        Route::new("/about", "/pages/about.html", Theme::Zoom),
    ]
}
