//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route tree from configuration
//! - Create Axum Router with a single fallback handler
//! - Wire up middleware (tracing)
//! - Dispatch requests to the routing engine and render the outcome

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, RouterConfig};
use crate::http::request::Request as RouteRequest;
use crate::http::response::{MatchSummary, NullResponse};
use crate::observability::metrics;
use crate::routing::{Dispatcher, MethodNegotiator, RouteList};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_size: usize,
}

/// HTTP server fronting the route tree.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        let tree = RouteList::from_config(&config)
            .map_err(|e| ConfigError::Validation(vec![e]))?;
        let dispatcher = Dispatcher::new(Arc::new(tree), MethodNegotiator::default());

        let state = AppState {
            dispatcher: Arc::new(dispatcher),
            max_body_size: config.listener.max_body_size,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(route_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum application, for embedding or in-process testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Converts the request, routes it and renders the outcome.
async fn route_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();

    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => {
            metrics::record_request(&method, 413);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let request = match RouteRequest::from_parts(&parts, &body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting malformed request");
            metrics::record_request(&method, 400);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.dispatcher.dispatch(&request) {
        Ok(matched) => {
            tracing::debug!(
                route = %matched.route.name(),
                action = %matched.action,
                method = %matched.method,
                "Route matched"
            );
            metrics::record_request(&method, 200);
            if parts.method == Method::HEAD {
                NullResponse.into_response()
            } else {
                MatchSummary::from(&matched).into_response()
            }
        }
        Err(err) => {
            tracing::debug!(
                path = %request.path(),
                method = %method,
                error = %err,
                "Routing failed"
            );
            metrics::record_request(&method, err.status().as_u16());
            err.into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
