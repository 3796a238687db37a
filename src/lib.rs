//! Simple Time Service Library
//!
//! Reports the current UTC timestamp and the caller's IP address on `GET /`,
//! plus a liveness check on `GET /healthz`.

pub mod clock;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
