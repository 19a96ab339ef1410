//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Storage
//!
//! ```bash
//! export DATA_DIR="./data"        # file-backed store; omit for in-memory
//! export STORAGE_KEY="urlData"    # key holding the link collection
//! ```
//!
//! ## Remote log sink
//!
//! ```bash
//! export LOG_SINK_URL="http://20.244.56.144/evaluation-service/logs"
//! export LOG_SINK_TOKEN="..."     # optional, sent as a Bearer token
//! export LOG_SINK_STACK="backend" # frontend | backend
//! ```
//!
//! When `LOG_SINK_URL` is not set, events are written to the local log instead.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Prefix for generated short URLs (default: `http://localhost:3000`)
//! - `DEFAULT_VALIDITY_MINUTES` - Validity when a request omits one (default: 30)
//! - `LOG_QUEUE_CAPACITY` - Pending sink event buffer (default: 1000, min: 10)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

use crate::domain::log_event::Stack;
use crate::domain::repositories::DEFAULT_STORAGE_KEY;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    /// Directory for the file-backed store. `None` keeps links in memory.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub default_validity_minutes: u32,
    pub log_sink_url: Option<String>,
    pub log_sink_token: Option<String>,
    pub log_sink_stack: String,
    pub log_queue_capacity: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let data_dir = non_empty_var("DATA_DIR").map(PathBuf::from);
        let storage_key =
            non_empty_var("STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        let default_validity_minutes = match non_empty_var("DEFAULT_VALIDITY_MINUTES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DEFAULT_VALIDITY_MINUTES is not a number: '{v}'"))?,
            None => 30,
        };

        let log_sink_url = non_empty_var("LOG_SINK_URL");
        let log_sink_token = non_empty_var("LOG_SINK_TOKEN");
        let log_sink_stack =
            env::var("LOG_SINK_STACK").unwrap_or_else(|_| "backend".to_string());

        let log_queue_capacity = env::var("LOG_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1_000);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            base_url,
            data_dir,
            storage_key,
            default_validity_minutes,
            log_sink_url,
            log_sink_token,
            log_sink_stack,
            log_queue_capacity,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `base_url` or `log_sink_url` is not an http(s) URL
    /// - `storage_key` contains characters other than letters, digits, `-`, `_`
    /// - `default_validity_minutes` is zero
    /// - `log_sink_stack` is not `frontend` or `backend`
    /// - `log_queue_capacity` is outside 10..=100000
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        validate_http_url("BASE_URL", &self.base_url)?;

        if let Some(ref sink_url) = self.log_sink_url {
            validate_http_url("LOG_SINK_URL", sink_url)?;
        }

        if self.storage_key.is_empty()
            || !self
                .storage_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!(
                "STORAGE_KEY may only contain letters, digits, '-' and '_', got '{}'",
                self.storage_key
            );
        }

        if self.default_validity_minutes == 0 {
            anyhow::bail!("DEFAULT_VALIDITY_MINUTES must be greater than 0");
        }

        self.sink_stack()?;

        if self.log_queue_capacity < 10 {
            anyhow::bail!(
                "LOG_QUEUE_CAPACITY must be at least 10, got {}",
                self.log_queue_capacity
            );
        }

        if self.log_queue_capacity > 100_000 {
            anyhow::bail!(
                "LOG_QUEUE_CAPACITY is too large (max: 100000), got {}",
                self.log_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Parsed value of `LOG_SINK_STACK`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `frontend` or `backend`.
    pub fn sink_stack(&self) -> Result<Stack> {
        self.log_sink_stack
            .parse()
            .map_err(|e| anyhow::anyhow!("LOG_SINK_STACK is invalid: {e}"))
    }

    /// Returns whether events are forwarded to a remote sink.
    pub fn is_remote_sink_enabled(&self) -> bool {
        self.log_sink_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);

        match self.data_dir {
            Some(ref dir) => tracing::info!("  Storage: file ({})", dir.display()),
            None => tracing::info!("  Storage: memory"),
        }
        tracing::info!("  Storage key: {}", self.storage_key);
        tracing::info!(
            "  Default validity: {} minutes",
            self.default_validity_minutes
        );

        if let Some(ref sink_url) = self.log_sink_url {
            tracing::info!(
                "  Log sink: {} (token: {})",
                sink_url,
                mask_secret(self.log_sink_token.as_deref())
            );
        } else {
            tracing::info!("  Log sink: local");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Log queue capacity: {}", self.log_queue_capacity);
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{name} must start with 'http://' or 'https://', got '{value}'");
    }
    Ok(())
}

/// Masks a secret for logging, keeping only its last four characters.
fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        None => "none".to_string(),
        Some(s) if s.chars().count() <= 4 => "***".to_string(),
        Some(s) => {
            let tail: String = s
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("***{tail}")
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
