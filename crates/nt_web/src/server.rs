use nt_core::Result;
use nt_storage::{ArticleStore, FileCategorySource, FileSource};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::{create_app, AppState, ServerConfig};

/// Loads the catalog and serves the API until SIGINT/SIGTERM.
///
/// A catalog that fails to load is not fatal: the server starts empty and a
/// later refresh can fill it.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let store = Arc::new(ArticleStore::new(
        Arc::new(FileSource::new(&config.data_file)),
        config.mode,
    ));
    if let Err(e) = store.load().await {
        warn!("⚠️ Starting with an empty catalog: {}", e);
    }

    let categories = Arc::new(FileCategorySource::new(&config.categories_file));
    let mut state = AppState::new(store, categories);
    if let Some(key) = &config.api_key {
        state = state.with_api_key(key.clone());
    }
    let app = create_app(state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("🚀 Server is running on {} ({} catalog)", listener.local_addr()?, config.mode);
    if config.api_key.is_some() {
        info!("🔐 /api routes require an API key");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
