//! Database connection and pool management
//!
//! This module provides database connection pooling with proper
//! configuration for production use including health checks and
//! connection timeouts.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

/// Pool tuning knobs not exposed through application config
pub struct PoolSettings {
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,      // 10 minutes
            max_lifetime_secs: 1800,     // 30 minutes
        }
    }
}

/// Create a PostgreSQL connection pool with production-ready settings
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    create_pool_with_settings(config, &PoolSettings::default()).await
}

/// Create a PostgreSQL connection pool with custom pool settings
pub async fn create_pool_with_settings(
    config: &DatabaseConfig,
    settings: &PoolSettings,
) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(settings.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(settings.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_with(config.connect_options())
        .await
        .with_context(|| {
            format!(
                "connect to database {} at {}:{}",
                config.name, config.host, config.port
            )
        })?;

    info!(
        host = %config.host,
        database = %config.name,
        max = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
