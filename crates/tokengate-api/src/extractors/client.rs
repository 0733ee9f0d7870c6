//! Caller key used for rate limiting.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};

/// Key used when the peer address is unknown.
pub const UNKNOWN_CLIENT: &str = "unknown";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Derives the caller key from the TCP peer address.
///
/// `X-Forwarded-For` is read only when the peer is one of
/// `trusted_proxies`. The chain is then walked from the nearest hop and the
/// first address that is not itself a trusted proxy is the caller. Anything
/// left of that hop was written by the client and is ignored.
pub fn client_key(headers: &HeaderMap, extensions: &Extensions, trusted_proxies: &[IpAddr]) -> String {
    let Some(peer) = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
    else {
        return UNKNOWN_CLIENT.to_string();
    };

    if !trusted_proxies.contains(&peer) {
        return peer.to_string();
    }

    let hops: Vec<&str> = headers
        .get_all(FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .collect();

    for hop in hops.into_iter().rev() {
        match hop.parse::<IpAddr>() {
            Ok(addr) if trusted_proxies.contains(&addr) => continue,
            Ok(addr) => return addr.to_string(),
            Err(_) => break,
        }
    }

    peer.to_string()
}
