//! Paste service entrypoint.

use pasteviewer::{config::Config, resolve_bind_address, serve_router, store::PasteStore, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pasteviewer=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Failing to create the paste directory aborts startup; every other
    // storage failure stays per-request.
    let store = PasteStore::open(&config.paste_dir)?;
    let state = AppState::new(config.clone(), store);

    let bind_addr = resolve_bind_address(&config);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("paste service running at http://{}", bind_addr);

    serve_router(listener, state, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
