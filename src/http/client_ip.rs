//! Client IP resolution from proxy headers.
//!
//! # Precedence
//! 1. First non-empty entry of `X-Forwarded-For` (leftmost hop is the client)
//! 2. `X-Real-IP`, verbatim
//! 3. Transport peer address
//!
//! Values are passed through without checking that they parse as IP
//! addresses. Deciding which proxies to trust happens in front of this service.

use std::borrow::Cow;
use std::net::SocketAddr;

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Case-insensitive header lookup.
pub trait HeaderLookup {
    /// Value of the first occurrence of `name`.
    ///
    /// Present headers always yield a value; bytes that are not UTF-8 are
    /// replaced rather than hiding the header.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl HeaderLookup for HeaderMap {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }
}

/// Resolve the caller's IP from headers and the peer address.
pub fn resolve_client_ip<H>(headers: &H, peer: Option<SocketAddr>) -> Option<String>
where
    H: HeaderLookup + ?Sized,
{
    if let Some(forwarded) = headers.header(X_FORWARDED_FOR) {
        if let Some(ip) = first_forwarded_hop(&forwarded) {
            return Some(ip.to_string());
        }
    }

    if let Some(real_ip) = headers.header(X_REAL_IP).filter(|v| !v.is_empty()) {
        return Some(real_ip.into_owned());
    }

    peer.map(|addr| addr.ip().to_string())
}

fn first_forwarded_hop(value: &str) -> Option<&str> {
    value.split(',').map(str::trim).find(|hop| !hop.is_empty())
}
