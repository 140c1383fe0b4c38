//! # stow: a small upload gateway for object storage
//!
//! `stow` accepts HTTP-triggered upload events, derives a storage key from
//! the payload's content type plus a UTC timestamp and a short random
//! identifier, enforces a size ceiling, and writes the payload to an S3
//! bucket with attached metadata. Every invocation is an independent,
//! stateless request→response transform: there is no queue, no cache, and no
//! state retained between requests.
//!
//! ## Request flow
//!
//! A client posts an upload event to `/v1/uploads`. The event carries the
//! payload as a string (base64-encoded for binary content) and the original
//! request headers. The handler resolves the destination bucket from
//! configuration, decodes the payload, classifies its content type against a
//! fixed extension table, and performs a single `put_object` call against the
//! configured store. Failures of any kind convert into a JSON error body with
//! a matching status code; nothing escapes as a raw error.
//!
//! The store itself sits behind the [`storage::ObjectStore`] trait and is
//! injected into [`AppState`], so the handler runs against
//! [`storage::MemoryStore`] in tests and [`storage::S3Store`] in production.
//!
//! ## Scaffolding
//!
//! The binary also ships a `scaffold` subcommand (see [`scaffold`]) that
//! writes a boilerplate file into a list of directories, for seeding
//! infrastructure module layouts.
//!
//! ## Quick start
//!
//! ```no_run
//! use clap::Parser;
//! use stow::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = stow::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     stow::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await
//! }
//! ```

pub mod api;
pub mod config;
pub mod errors;
mod openapi;
pub mod scaffold;
pub mod storage;
pub mod telemetry;
pub mod upload;

pub use config::Config;

use crate::storage::{ObjectStore, S3Store};
use axum::extract::DefaultBodyLimit;
use axum::{
    Json, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ObjectStore>,
}

/// Create the CORS layer.
///
/// Every response carries a wildcard Access-Control-Allow-Origin so browser
/// clients can call the API directly.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    // Transport limit sits above the decoded-payload ceiling: base64 inflates
    // the wire size by 4/3 and the event adds JSON framing around it. The cap
    // in the upload path is what produces the JSON 413, not this limit.
    let body_limit = state.config.upload.max_payload_bytes * 2;

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route(
            "/v1/uploads",
            post(api::handlers::uploads::handle_upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api-docs/openapi.json", get(|| async { Json(openapi::ApiDoc::openapi()) }))
        .with_state(state);

    router.layer(create_cors_layer()).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// Main application struct owning the router and configuration.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] builds the S3 client from the ambient
///    AWS configuration; [`Application::new_with_store`] takes any
///    [`ObjectStore`] instead
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create an application wired to the real S3 backend.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(S3Store::from_env().await);
        Self::new_with_store(config, store)
    }

    /// Create an application with an injected object store.
    ///
    /// Used by tests and anything that needs to run without live AWS
    /// credentials.
    pub fn new_with_store(config: Config, store: Arc<dyn ObjectStore>) -> anyhow::Result<Self> {
        let state = AppState {
            config: config.clone(),
            store,
        };
        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Upload gateway listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
