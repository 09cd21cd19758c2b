//! Configuration management for the credential service
//!
//! Configuration is loaded hierarchically:
//! 1. Default values for non-secret settings (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: AUTH__)
//!
//! The JWT signing secret and the database password have no defaults.
//! Loading fails when either is missing or blank, or when the token
//! lifetime is not positive.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::env;

/// Token lifetime: 24 hours
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub name: String,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub token_expiry_secs: i64,
}

impl DatabaseConfig {
    /// Build sqlx connect options from the individual connection parameters
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(self.password.expose_secret())
            .database(&self.name)
            .application_name("auth-service")
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with AUTH__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let builder = Self::with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., AUTH__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("AUTH").separator("__"));

        Self::from_builder(builder)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.username", "postgres")?
            .set_default("database.name", "credential_service")?
            .set_default("database.max_connections", 10)?
            .set_default("jwt.token_expiry_secs", DEFAULT_TOKEN_EXPIRY_SECS)?)
    }

    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config: Self = builder
            .build()?
            .try_deserialize()
            .context("invalid configuration (are AUTH__JWT__SECRET and AUTH__DATABASE__PASSWORD set?)")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that hold in every environment
    fn validate(&self) -> Result<()> {
        if self.jwt.secret.expose_secret().trim().is_empty() {
            anyhow::bail!("jwt.secret must not be empty (set AUTH__JWT__SECRET)");
        }
        if self.database.password.expose_secret().trim().is_empty() {
            anyhow::bail!("database.password must not be empty (set AUTH__DATABASE__PASSWORD)");
        }
        if self.jwt.token_expiry_secs <= 0 {
            anyhow::bail!(
                "jwt.token_expiry_secs must be positive, got {}",
                self.jwt.token_expiry_secs
            );
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
