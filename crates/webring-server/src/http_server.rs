//! HTTP Server for the Webring
//!
//! This module provides the HTTP server implementation using axum. It turns
//! navigator decisions into `302 Found` redirects and serves the index page
//! and static resources.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use webring_common::error::{Result, WebringError};
use webring_navigator::{Direction, NavigationRequest};

use crate::context::WebringContext;

/// HTTP server for the webring.
///
/// Routes:
/// - `GET /` - index page
/// - `GET /next`, `GET /previous` - neighbour redirects
/// - `GET /im-feeling-lucky` - random redirect
/// - `GET /static/*` - files from the static directory, when configured
/// - `GET /__health` - liveness of this service
pub struct HttpServer {
    context: Arc<WebringContext>,
    static_dir: Option<PathBuf>,
}

impl HttpServer {
    /// Creates a new HTTP server.
    ///
    /// # Arguments
    /// * `context` - Shared, immutable webring context
    pub fn new(context: Arc<WebringContext>) -> Self {
        Self {
            context,
            static_dir: None,
        }
    }

    /// Serves files from `dir` under `/static/`.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Builds the axum router.
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route("/", get(index))
            .route("/next", get(next))
            .route("/previous", get(previous))
            .route("/im-feeling-lucky", get(feeling_lucky))
            .route("/__health", get(health_check));

        if let Some(dir) = &self.static_dir {
            app = app.nest_service("/static", ServeDir::new(dir));
        }

        app.layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.context))
    }

    /// Runs the HTTP server.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "0.0.0.0:8080")
    ///
    /// # Returns
    /// - `Ok(())` - Server ran successfully
    /// - `Err(WebringError)` - Server failed to start or run
    pub async fn run(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| WebringError::Transport(format!("Failed to bind to {}: {}", addr, e)))?;

        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener
            .local_addr()
            .map_err(|e| WebringError::Transport(format!("Failed to get local addr: {}", e)))?;
        info!(
            "Webring listening on {} ({} members, {} resolution)",
            local,
            self.context.registry().len(),
            self.context.resolver_name()
        );

        axum::serve(listener, self.router())
            .await
            .map_err(|e| WebringError::Transport(format!("Server error: {}", e)))
    }
}

async fn index(State(ctx): State<Arc<WebringContext>>) -> Html<String> {
    Html(ctx.render_index())
}

async fn next(
    State(ctx): State<Arc<WebringContext>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    redirect(&ctx, Direction::Next, &headers, query.as_deref())
}

async fn previous(
    State(ctx): State<Arc<WebringContext>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    redirect(&ctx, Direction::Previous, &headers, query.as_deref())
}

async fn feeling_lucky(State(ctx): State<Arc<WebringContext>>) -> Response {
    redirect(&ctx, Direction::Random, &HeaderMap::new(), None)
}

/// Handles health check GET requests.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn redirect(
    ctx: &WebringContext,
    direction: Direction,
    headers: &HeaderMap,
    query: Option<&str>,
) -> Response {
    // A referer that is not valid UTF-8 counts as missing.
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    let request = NavigationRequest::new(referer, query);

    let (position, member) = ctx.destination(direction, &request);
    match position {
        Some(position) => debug!("{} from position {} -> {}", direction, position, member.url),
        None => debug!("{} (unresolved) -> {}", direction, member.url),
    }

    (StatusCode::FOUND, [(header::LOCATION, member.url.clone())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
