//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, guest store setup, and Axum server lifecycle.

use crate::application::services::{AuthService, ShortenerService};
use crate::config::Config;
use crate::infrastructure::cache::{GuestStore, MemoryGuestStore, RedisGuestStore};
use crate::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis guest store (or in-memory fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the database is unreachable, migrations fail, or
/// the listener cannot bind. An unreachable database is fatal by design:
/// the service must not come up half-functional.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn GuestStore> = if let Some(redis_url) = &config.redis_url {
        match RedisGuestStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Guest store enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory store.", e);
                Arc::new(MemoryGuestStore::new())
            }
        }
    } else {
        tracing::info!("Guest store: in-memory (Redis not configured)");
        Arc::new(MemoryGuestStore::new())
    };

    let pool = Arc::new(pool);
    let url_repository = Arc::new(PgUrlRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let shortener = Arc::new(ShortenerService::new(
        url_repository,
        cache.clone(),
        Duration::from_secs(config.guest_ttl_seconds),
    ));
    let auth = Arc::new(AuthService::new(
        user_repository,
        &config.jwt_secret,
        Duration::from_secs(24 * 60 * 60),
    ));

    let state = AppState {
        db: pool,
        cache,
        shortener,
        auth,
    };

    let app = app_router(state, config.rate_limit_per_second, config.rate_limit_burst);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
