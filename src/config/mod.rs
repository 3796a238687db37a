//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, LOG_FORMAT, METRICS_ADDRESS)
//!     → loader.rs (parse & validate)
//!     → ServiceConfig (immutable)
//!     → handed by value to logging, metrics and the HTTP server
//! ```
//!
//! # Design Decisions
//! - No config file; the environment is the only source
//! - All fields have defaults so an empty environment is valid
//! - Any malformed value is a fatal startup error

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig};
