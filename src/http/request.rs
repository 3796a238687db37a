//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the caller supplied one
//! - Expose a typed view of the request (headers + peer address) to handlers
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Peer address is optional; routers served without connect info still work

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};

use crate::http::client_ip::resolve_client_ip;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(TowerRequestId::new)
    }
}

/// Access to the request ID assigned by the request-id layer.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> &str {
        self.get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers().request_id()
    }
}

/// Typed view of an inbound request: its headers and, when the server
/// records it, the transport peer address.
#[derive(Debug, Clone, Default)]
pub struct ClientRequest {
    pub headers: HeaderMap,
    pub peer: Option<SocketAddr>,
}

impl ClientRequest {
    pub fn new(headers: HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self { headers, peer }
    }

    /// Resolved caller IP, if any source provides one.
    pub fn client_ip(&self) -> Option<String> {
        resolve_client_ip(&self.headers, self.peer)
    }
}

impl<S> FromRequestParts<S> for ClientRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::new(parts.headers.clone(), peer))
    }
}
