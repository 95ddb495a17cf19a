//! HTTP server lifecycle: connect, bind, serve until a shutdown signal, then close the pool.

use crate::config::Config;
use crate::routes::app;
use crate::state::AppState;
use crate::store::Store;
use tokio::net::TcpListener;

/// Run the service until Ctrl+C or SIGTERM. The pool is closed after in-flight requests drain.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::connect(&config.database).await?;
    if config.database.init_schema {
        store.ensure_schema().await?;
    }

    let router = app(AppState::new(store.clone()), &config.server);
    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    tracing::info!("server started at {}", listener.local_addr()?);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    store.close().await;
    served?;
    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
