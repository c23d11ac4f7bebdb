//! Server-side sessions correlated to clients by cookie.
//!
//! Cookie handling, id generation and the [`tower_sessions::Session`]
//! extractor come from `tower-sessions`. This module supplies the stores:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for development and fallback
//!
//! [`manager_layer`] builds the session layer with the configured cookie.

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{SessionBackend, SessionHealth};

#[cfg(test)]
pub use store::MockSessionHealth;

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::state::SessionSettings;

/// Builds the session layer for `store`.
///
/// The cookie is `HttpOnly`, `SameSite=Lax`, scoped to `/`, and carries a
/// `Max-Age` that is renewed with every session write. Records expire after
/// `ttl_seconds` without a write.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(home_handler))
///     .layer(session::manager_layer(MemoryStore::new(), &settings));
/// ```
pub fn manager_layer<S: SessionStore>(store: S, settings: &SessionSettings) -> SessionManagerLayer<S> {
    let ttl = i64::try_from(settings.ttl_seconds).unwrap_or(i64::MAX);

    SessionManagerLayer::new(store)
        .with_name(settings.cookie_name.clone())
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(settings.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(ttl)))
}
