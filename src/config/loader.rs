//! Configuration loading from the process environment.

use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;

use crate::config::schema::{ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig};

pub const PORT_VAR: &str = "PORT";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
pub const METRICS_ADDRESS_VAR: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid LOG_FORMAT value {0:?}: expected \"json\" or \"pretty\"")]
    InvalidLogFormat(String),

    #[error("invalid METRICS_ADDRESS value {value:?}: {source}")]
    InvalidMetricsAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Load configuration from the real process environment.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
pub fn load_from<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let listener = match lookup(PORT_VAR) {
        Some(raw) => ListenerConfig::on_port(parse_port(&raw)?),
        None => ListenerConfig::default(),
    };

    let log_format = match lookup(LOG_FORMAT_VAR) {
        Some(raw) => parse_log_format(&raw)?,
        None => LogFormat::default(),
    };

    let metrics_address = match lookup(METRICS_ADDRESS_VAR) {
        Some(raw) if !raw.trim().is_empty() => Some(
            raw.trim()
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidMetricsAddress {
                    value: raw.clone(),
                    source,
                })?,
        ),
        _ => None,
    };

    Ok(ServiceConfig {
        listener,
        observability: ObservabilityConfig {
            log_format,
            metrics_address,
        },
    })
}

// Surrounding whitespace is tolerated; anything else that is not a u16 is fatal.
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|source| ConfigError::InvalidPort {
            value: raw.to_string(),
            source,
        })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        _ => Err(ConfigError::InvalidLogFormat(raw.to_string())),
    }
}
