//! Shared fixtures for integration testing.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use http_relay::{HttpServer, RelayConfig};

/// Serve the given router on an ephemeral port and return its address.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start a relay with default configuration on an ephemeral port.
pub async fn spawn_relay() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(RelayConfig::default());
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    addr
}

/// Client that observes redirects instead of following them, mirroring how
/// the relay itself talks upstream.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
