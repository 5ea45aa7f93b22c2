//! Configuration handling for the application.
//!
//! Service settings are read from environment variables with development
//! defaults. Scoring calibration lives in [`ScoringConfig`] and is not read
//! from the environment.

mod scoring;

pub use scoring::ScoringConfig;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable names. Public so tests and binaries can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_RATE_LIMIT_MAX_REQUESTS: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "RATE_LIMIT_WINDOW_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_PREPROCESS_CACHE_CAPACITY: &str = "PREPROCESS_CACHE_CAPACITY";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 60;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PREPROCESS_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: ENV_LOG_FORMAT,
                reason: format!("unknown log format '{other}'"),
            }),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    rate_limit_max_requests: u32,
    rate_limit_window_secs: i64,
    request_timeout_secs: u64,
    preprocess_cache_capacity: usize,
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            preprocess_cache_capacity: DEFAULT_PREPROCESS_CACHE_CAPACITY,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    /// Present but unparseable values are an error rather than silently
    /// replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let rate_limit_max_requests =
            parse_env(ENV_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_MAX_REQUESTS)?;
        if rate_limit_max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_MAX_REQUESTS,
                reason: "must be at least 1".to_string(),
            });
        }

        let rate_limit_window_secs =
            parse_env(ENV_RATE_LIMIT_WINDOW_SECS, DEFAULT_RATE_LIMIT_WINDOW_SECS)?;
        if rate_limit_window_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_WINDOW_SECS,
                reason: "must be positive".to_string(),
            });
        }

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            rate_limit_max_requests,
            rate_limit_window_secs,
            request_timeout_secs: parse_env(
                ENV_REQUEST_TIMEOUT_SECS,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            preprocess_cache_capacity: parse_env(
                ENV_PREPROCESS_CACHE_CAPACITY,
                DEFAULT_PREPROCESS_CACHE_CAPACITY,
            )?,
            log_format,
        })
    }

    pub fn with_rate_limit(mut self, max_requests: u32, window_secs: i64) -> Self {
        self.rate_limit_max_requests = max_requests;
        self.rate_limit_window_secs = window_secs;
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn rate_limit_max_requests(&self) -> u32 {
        self.rate_limit_max_requests
    }
    pub fn rate_limit_window_secs(&self) -> i64 {
        self.rate_limit_window_secs
    }
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
    /// Capacity of the analyzer's preprocessing cache.
    pub fn preprocess_cache_capacity(&self) -> usize {
        self.preprocess_cache_capacity
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: key,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
