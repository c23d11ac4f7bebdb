//! Client IP resolution and request-context injection.
//!
//! [`layer`] resolves the client address once per request and stores it in
//! the request extensions as a [`ClientIp`]. Handlers read it back with the
//! [`ClientIp`] extractor or [`ip_from_context`].

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request},
    http::{Extensions, HeaderName, request::Parts},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;

/// Proxy header carrying the original client address. Matched case-insensitively.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Stored when the remote address cannot be split into a host.
pub const UNKNOWN_IP: &str = "unknown";

/// Stored when resolution succeeds but yields an empty string.
///
/// Only reachable with an empty host that still parses as an IP, which no
/// parser accepts, so in practice this value is never produced. Kept for
/// compatibility with clients that match on it.
pub const EMPTY_IP: &str = "forward";

/// The resolved client address of the current request.
///
/// Only [`layer`] can construct it, so a value found in the request
/// extensions always came from the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(String);

impl ClientIp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ClientIp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the client IP stored by [`layer`].
///
/// Returns `None` when the middleware did not run for this request.
pub fn ip_from_context(extensions: &Extensions) -> Option<&str> {
    extensions.get::<ClientIp>().map(ClientIp::as_str)
}

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<ClientIp>().cloned().ok_or_else(|| {
            AppError::internal(
                "Client IP missing from request context",
                json!({"reason": "ip context layer is not installed on this route"}),
            )
        })
    }
}

/// Reasons a remote address cannot be resolved to an IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("missing port in address")]
    MissingPort,
    #[error("too many colons in address")]
    TooManyColons,
    #[error("missing ']' in address")]
    MissingBracket,
    #[error("unexpected '[' in address")]
    UnexpectedOpenBracket,
    #[error("unexpected ']' in address")]
    UnexpectedCloseBracket,
    #[error("host is not an IP literal")]
    NotAnIp,
}

/// Splits `host:port` or `[host]:port` into host and port.
///
/// The port is not validated. IPv6 hosts must be bracketed.
pub fn split_host_port(hostport: &str) -> Result<(&str, &str), AddrError> {
    let colon = hostport.rfind(':').ok_or(AddrError::MissingPort)?;

    let (host, open_from, close_from) = if hostport.starts_with('[') {
        let end = hostport.find(']').ok_or(AddrError::MissingBracket)?;
        if end + 1 == hostport.len() {
            return Err(AddrError::MissingPort);
        }
        if end + 1 != colon {
            return Err(if hostport.as_bytes()[end + 1] == b':' {
                AddrError::TooManyColons
            } else {
                AddrError::MissingPort
            });
        }
        (&hostport[1..end], 1, end + 1)
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return Err(AddrError::TooManyColons);
        }
        (host, 0, 0)
    };

    if hostport[open_from..].contains('[') {
        return Err(AddrError::UnexpectedOpenBracket);
    }
    if hostport[close_from..].contains(']') {
        return Err(AddrError::UnexpectedCloseBracket);
    }

    Ok((host, &hostport[colon + 1..]))
}

/// Strict resolution: the remote host must be an IP literal.
///
/// A non-empty `forwarded_for` replaces the result verbatim.
fn ip_from_remote(remote_addr: &str, forwarded_for: Option<&str>) -> Result<String, AddrError> {
    let (host, _port) = split_host_port(remote_addr)?;
    host.parse::<IpAddr>().map_err(|_| AddrError::NotAnIp)?;

    let ip = match forwarded_for {
        Some(forwarded) if !forwarded.is_empty() => forwarded,
        _ => host,
    };

    if ip.is_empty() {
        return Ok(EMPTY_IP.to_string());
    }
    Ok(ip.to_string())
}

/// Resolves the string stored as the request's client IP.
///
/// # Resolution
///
/// 1. Split `remote_addr` as `host:port` and require the host to be an IP
/// 2. If that holds, a non-empty `X-Forwarded-For` value overrides it as is
/// 3. Otherwise fall back to whatever host the split yields, or
///    [`UNKNOWN_IP`] if there is none
///
/// Never fails.
pub fn resolve_client_ip(remote_addr: &str, forwarded_for: Option<&str>) -> String {
    match ip_from_remote(remote_addr, forwarded_for) {
        Ok(ip) => ip,
        Err(e) => {
            debug!(remote_addr, "client IP fallback: {}", e);
            let host = split_host_port(remote_addr)
                .map(|(host, _)| host)
                .unwrap_or_default();
            if host.is_empty() {
                UNKNOWN_IP.to_string()
            } else {
                host.to_string()
            }
        }
    }
}

/// Stores the resolved client IP in the request context.
///
/// The remote address comes from `ConnectInfo<SocketAddr>`; when the server
/// was not started with connect info it is treated as empty and resolves to
/// [`UNKNOWN_IP`].
///
/// Running the layer twice on the same request overwrites the value with an
/// identical one.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(home_handler))
///     .layer(middleware::from_fn(ip_context::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let remote_addr = ConnectInfo::<SocketAddr>::from_request_parts(&mut parts, &())
        .await
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();

    // raw bytes: obs-text must not drop the header
    let forwarded_for = parts
        .headers
        .get(X_FORWARDED_FOR)
        .map(|value| String::from_utf8_lossy(value.as_bytes()));

    let ip = resolve_client_ip(&remote_addr, forwarded_for.as_deref());
    parts.extensions.insert(ClientIp(ip));

    next.run(Request::from_parts(parts, body)).await
}
