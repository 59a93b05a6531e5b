// Process lifecycle: connect, migrate, serve, drain

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::auth::PgUserStore;
use crate::config::{Config, ConfigError};
use crate::{create_router, db, AppState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the API until Ctrl-C or SIGTERM, then close the database pool
pub async fn serve(config: Config) -> Result<(), ServerError> {
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let store = Arc::new(PgUserStore::new(pool.clone()));
    let state = AppState::from_config(&config, store);
    if config.jwt_expiry_seconds.is_none() {
        tracing::warn!("JWT_EXPIRY_SECONDS not set; issued tokens never expire");
    }

    let app = create_router(state, config.client_dir.as_deref());

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "Member Area API is running on http://{}",
        listener.local_addr()?
    );
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db::close_pool(&pool).await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
