//! Configuration module for the member list backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Rows per table page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Delay before the route progress bar is hidden after a route settles.
pub const DEFAULT_PROGRESS_STOP_DELAY_MS: u64 = 250;

/// Idle time after which a mounted view may be evicted.
pub const DEFAULT_VIEW_IDLE_TTL_SECS: u64 = 30 * 60;

/// Upper bound on simultaneously mounted views.
pub const DEFAULT_MAX_VIEWS: usize = 1000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the bundled member dataset (JSON)
    pub data_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Rows per page in the member table
    pub page_size: usize,
    /// How long the progress bar lingers after navigation settles
    pub progress_stop_delay: Duration,
    /// Views untouched for this long are dropped on the next mount
    pub view_idle_ttl: Duration,
    /// Mounting past this many views evicts the least recently used one
    pub max_views: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_path = env::var("SOCIOS_DATA_PATH")
            .unwrap_or_else(|_| "./data/members.json".to_string())
            .into();

        let bind_addr = env::var("SOCIOS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Validation(format!("Invalid SOCIOS_BIND_ADDR: {}", e)))?;

        let log_level = env::var("SOCIOS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("SOCIOS_LOG_FORMAT")
            .map(|format| format.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let page_size = match env::var("SOCIOS_PAGE_SIZE") {
            Ok(raw) => parse_positive("SOCIOS_PAGE_SIZE", &raw)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let stop_delay_ms = match env::var("SOCIOS_PROGRESS_STOP_DELAY_MS") {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                AppError::Validation(format!("Invalid SOCIOS_PROGRESS_STOP_DELAY_MS: {}", e))
            })?,
            Err(_) => DEFAULT_PROGRESS_STOP_DELAY_MS,
        };

        let view_idle_ttl_secs = match env::var("SOCIOS_VIEW_IDLE_TTL_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                AppError::Validation(format!("Invalid SOCIOS_VIEW_IDLE_TTL_SECS: {}", e))
            })?,
            Err(_) => DEFAULT_VIEW_IDLE_TTL_SECS,
        };

        let max_views = match env::var("SOCIOS_MAX_VIEWS") {
            Ok(raw) => parse_positive("SOCIOS_MAX_VIEWS", &raw)?,
            Err(_) => DEFAULT_MAX_VIEWS,
        };

        Ok(Self {
            data_path,
            bind_addr,
            log_level,
            log_json,
            page_size,
            progress_stop_delay: Duration::from_millis(stop_delay_ms),
            view_idle_ttl: Duration::from_secs(view_idle_ttl_secs),
            max_views,
        })
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(AppError::Validation(format!(
            "{} must be greater than zero",
            name
        ))),
        Ok(value) => Ok(value),
        Err(e) => Err(AppError::Validation(format!("Invalid {}: {}", name, e))),
    }
}
