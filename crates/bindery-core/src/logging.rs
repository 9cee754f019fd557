#![forbid(unsafe_code)]

//! Logging configuration.
//!
//! The crate emits `tracing` events unconditionally; installing a subscriber
//! is the application's call. With the `tracing-json` feature this module can
//! do it from the environment:
//!
//! | Variable             | Meaning                                   | Default   |
//! |----------------------|-------------------------------------------|-----------|
//! | `BINDERY_LOG`        | `EnvFilter` directive                     | `RUST_LOG`, then `info` |
//! | `BINDERY_LOG_FORMAT` | `compact`, `pretty` or `json`             | `compact` |
//! | `BINDERY_LOG_ANSI`   | colour output (`1/true/yes/on`)           | on        |

use std::str::FromStr;

pub const LOG_ENV: &str = "BINDERY_LOG";
pub const LOG_FORMAT_ENV: &str = "BINDERY_LOG_FORMAT";
pub const LOG_ANSI_ENV: &str = "BINDERY_LOG_ANSI";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Errors from subscriber setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// `BINDERY_LOG_FORMAT` held an unknown value.
    InvalidFormat(String),
    /// A global subscriber was already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(v) => write!(f, "invalid log format '{v}'"),
            Self::AlreadyInitialized => f.write_str("a tracing subscriber is already installed"),
        }
    }
}

impl std::error::Error for LoggingError {}

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub directive: String,
    pub format: LogFormat,
    pub ansi: bool,
}

impl LogConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    fn from_env_with<F>(get_env: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let directive = get_env(LOG_ENV)
            .or_else(|| get_env("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let format = match get_env(LOG_FORMAT_ENV) {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };
        let ansi = get_env(LOG_ANSI_ENV).is_none_or(|v| env_flag(&v));
        Ok(Self {
            directive,
            format,
            ansi,
        })
    }
}

/// Install a global subscriber for `config`.
#[cfg(feature = "tracing-json")]
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.directive))
        .with_ansi(config.ansi);
    let result = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|_| LoggingError::AlreadyInitialized)
}

/// [`LogConfig::from_env`] followed by [`init`].
#[cfg(feature = "tracing-json")]
pub fn init_from_env() -> Result<(), LoggingError> {
    init(&LogConfig::from_env()?)
}
