//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer address recorded)
//!     → server.rs (request ID, trace span, routing)
//!     → request.rs (typed view: headers + peer)
//!     → client_ip.rs (X-Forwarded-For → X-Real-IP → peer)
//!     → handlers.rs (build body)
//!     → response.rs (JSON)
//! ```

pub mod client_ip;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use client_ip::{resolve_client_ip, HeaderLookup};
pub use request::{ClientRequest, MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use response::TimestampResponse;
pub use server::{build_router, AppState, HttpServer};
