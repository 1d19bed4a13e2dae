//! Configuration module for the elysium-cache binary.
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot file to load into the caches.
    pub snapshot_path: PathBuf,

    /// Initial capacity for every cache.
    /// Optional - per-kind defaults are used if not set.
    pub cache_capacity: Option<usize>,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Expects `.env` to have been loaded by the caller already.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `SNAPSHOT_PATH` is missing or
    /// `CACHE_CAPACITY` is not a number.
    pub fn from_env() -> Result<Self> {
        let snapshot_path = env::var("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .map_err(|_| Error::Config("SNAPSHOT_PATH must be set".to_string()))?;

        let cache_capacity = match env::var("CACHE_CAPACITY") {
            Ok(raw) => Some(raw.trim().parse::<usize>().map_err(|e| {
                Error::Config(format!("CACHE_CAPACITY must be a number: {}", e))
            })?),
            Err(_) => None,
        };

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };

        Ok(Self {
            snapshot_path,
            cache_capacity,
            log_format,
        })
    }
}
