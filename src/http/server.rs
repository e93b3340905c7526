//! HTTP server setup and relay dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the landing and relay handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener, serve with graceful shutdown
//! - Run the relay pipeline and catch its errors exactly once

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::landing::landing_handler;
use crate::relay::headers::filter_request_headers;
use crate::relay::policy::apply_response_policy;
use crate::relay::target::resolve_target;
use crate::relay::{classify, InboundContext, RelayError, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    /// Host used for rewrites when the inbound request carries no Host
    /// header.
    pub fallback_host: String,
}

/// HTTP server for the forwarding relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = AppState {
            upstream: UpstreamClient::new(&config.upstream),
            fallback_host: config.listener.bind_address.clone(),
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(landing_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main relay handler.
///
/// Runs the pipeline and converts any propagated error into the uniform
/// JSON envelope. This is the single catch point for the whole pipeline.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match relay(state, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "Relay pipeline failed");
            err.into_response()
        }
    }
}

/// The pipeline: resolve → filter → fetch → classify → inject policy.
async fn relay(state: AppState, request: Request<Body>) -> Result<Response, RelayError> {
    let (parts, body) = request.into_parts();

    let inbound = InboundContext::from_headers(&parts.headers, &state.fallback_host);
    let target = resolve_target(&inbound.scheme, parts.uri.path(), parts.uri.query())?;

    tracing::debug!(
        method = %parts.method,
        target = %target,
        "Forwarding request"
    );

    let outbound_headers = filter_request_headers(&parts.headers);
    let upstream_response = state
        .upstream
        .send(parts.method, target.clone(), outbound_headers, body)
        .await?;

    tracing::debug!(
        status = %upstream_response.status(),
        target = %target,
        "Upstream responded"
    );

    let relayed = classify(upstream_response, &inbound, &target).await?;

    let mut response = relayed.into_response();
    apply_response_policy(response.headers_mut());
    Ok(response)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
