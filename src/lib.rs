//! Paste storage and retrieval service: HTTP wiring and shared state.
//!
//! The write path validates multi-file submissions, throttles per client
//! address, and persists each paste as one JSON file under a random
//! 128-bit id. The read path resolves cache-first, then disk, and turns
//! the stored record into an HTML page (or the raw JSON with `?raw=true`).

/// Bounded, time-expiring cache in front of the store.
pub mod cache;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants (ports, windows, allow-lists).
pub mod constants;
/// Application error types and HTTP mapping.
pub mod error;
/// HTTP handlers for upload and view.
pub mod handlers;
/// Paste record models.
pub mod models;
/// Record-to-HTML render pipeline.
pub mod render;
/// Durable file-per-paste storage.
pub mod store;
/// View-page template handling.
pub mod template;
/// Per-address write throttling.
pub mod throttle;

pub use cache::PasteCache;
pub use config::Config;
pub use error::AppError;
pub use store::PasteStore;
pub use template::ViewTemplate;
pub use throttle::WriteThrottle;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
///
/// The cache and throttle are explicitly constructed and injected here
/// rather than living in module-level statics, so tests can wire their own
/// instances.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PasteStore>,
    pub cache: Arc<PasteCache>,
    pub throttle: Arc<WriteThrottle>,
    pub template: Arc<ViewTemplate>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state with default cache and throttle.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `store`: Open paste store.
    ///
    /// # Returns
    /// A new [`AppState`].
    pub fn new(config: Config, store: PasteStore) -> Self {
        Self::with_components(
            config,
            store,
            Arc::new(PasteCache::default()),
            Arc::new(WriteThrottle::default()),
        )
    }

    /// Construct shared application state with pre-built cache and
    /// throttle, for tests that need to observe or tune them.
    pub fn with_components(
        config: Config,
        store: PasteStore,
        cache: Arc<PasteCache>,
        throttle: Arc<WriteThrottle>,
    ) -> Self {
        let template = Arc::new(ViewTemplate::load(&config.template_path));
        Self {
            store: Arc::new(store),
            cache,
            throttle,
            template,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/paste/view/:paste", get(handlers::paste::view_paste))
        .route("/paste/paste/upload", post(handlers::paste::upload_paste))
        .with_state(state.clone())
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(state.config.max_upload_size))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}

/// Resolve the listener address from the `BIND` env override.
///
/// # Returns
/// The parsed override, or loopback on the configured port when the
/// override is missing or invalid.
pub fn resolve_bind_address(config: &Config) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    }
}

/// Run the Axum server with graceful shutdown support.
///
/// The connect-info make-service exposes the peer address to the upload
/// handler's throttle.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await
}
