/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * and opens the optional PostgreSQL database.
 *
 * # Configuration Sources
 *
 * | Variable | Default |
 * |---|---|
 * | `SERVER_PORT` | 3000 |
 * | `DATABASE_URL` | unset, in-memory store |
 * | `JWT_SECRET` | required |
 * | `UPLOAD_ROOT` | `.` |
 * | `BCRYPT_COST` | 12 |
 * | `MAX_UPLOAD_BYTES` | 10 MiB |
 * | `BROADCAST_CAPACITY` | 1000 |
 *
 * `.env` is loaded by the binary before this runs.
 */
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 1000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration of the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// PostgreSQL URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Directory that holds `images/`
    pub upload_root: PathBuf,
    pub bcrypt_cost: u32,
    pub max_upload_bytes: usize,
    pub broadcast_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            port: parse_or(var("SERVER_PORT"), "SERVER_PORT", DEFAULT_PORT)?,
            database_url: var("DATABASE_URL"),
            jwt_secret,
            upload_root: var("UPLOAD_ROOT").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            bcrypt_cost: parse_or(var("BCRYPT_COST"), "BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
            max_upload_bytes: parse_or(var("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            broadcast_capacity: parse_or(var("BROADCAST_CAPACITY"), "BROADCAST_CAPACITY", DEFAULT_BROADCAST_CAPACITY)?,
        })
    }

    /// In-memory configuration rooted at `upload_root`, with a cheap bcrypt cost
    pub fn for_tests(upload_root: impl AsRef<Path>) -> Self {
        Self {
            port: 0,
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            upload_root: upload_root.as_ref().to_path_buf(),
            bcrypt_cost: 4, // bcrypt::MIN_COST (private in bcrypt 0.17)
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            broadcast_capacity: 64,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// Connect to PostgreSQL and run migrations
///
/// Unlike an unset `DATABASE_URL`, a configured database that cannot be
/// reached or migrated stops startup.
pub async fn load_database(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        sqlx::Error::from(e)
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
