//! Mock content server for HTTP tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A page the mock serves.
#[derive(Debug, Clone)]
pub struct MockPage {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl MockPage {
    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<String>>>,
    pages: Arc<Mutex<HashMap<String, MockPage>>>,
}

/// Mock site server for testing.
pub struct MockSite {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockSite {
    /// Start a new mock site with no pages.
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            pages: Arc::new(Mutex::new(HashMap::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Start a mock site serving the built-in pages.
    pub async fn with_builtin_pages() -> Self {
        let site = Self::start().await;
        site.add_page(super::HOME, MockPage::html("<div>Home</div>")).await;
        site.add_page(super::PHOTO, MockPage::html("<div>Photo</div>")).await;
        site.add_page(super::ABOUT, MockPage::html("<div>About</div>")).await;
        site
    }

    pub async fn add_page(&self, path: &str, page: MockPage) {
        self.state.pages.lock().await.insert(path.to_string(), page);
    }

    /// Paths of all captured requests, in arrival order.
    pub async fn requested_paths(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockSite {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().to_string();
    state.requests.lock().await.push(path.clone());

    let page = state.pages.lock().await.get(&path).cloned();
    let Some(page) = page else {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::empty())
            .unwrap();
    };

    if page.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(page.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(page.status).unwrap())
        .header("content-type", "text/html")
        .body(Body::from(page.body))
        .unwrap()
}
