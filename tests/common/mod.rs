//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use external_data::{HttpServer, ServiceConfig, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Config whose data directory is read from `env_var`.
///
/// Every test uses its own variable so tests can run in parallel.
pub fn config_for(env_var: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.data_source.env_var = env_var.to_string();
    config
}

/// Point `env_var` at `dir` and build an in-process router.
pub fn router_for(env_var: &str, dir: &Path) -> Router {
    std::env::set_var(env_var, dir);
    HttpServer::new(config_for(env_var)).router()
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// Send a GET through the router and decode the JSON body.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

/// Start a real server on an ephemeral port.
pub async fn start_server(config: ServiceConfig, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}
