//! Session backend selected at startup.

use async_trait::async_trait;
use tower_sessions::SessionStore;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;

use super::memory_store::MemoryStore;
use super::redis_store::RedisStore;

/// Reachability probe for the session backend, used by `/health`.
///
/// # Implementations
///
/// - [`SessionBackend`] - delegates to the active store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionHealth: Send + Sync {
    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}

/// The store behind [`tower_sessions::SessionManagerLayer`].
///
/// Redis when configured and reachable, process memory otherwise.
#[derive(Debug, Clone)]
pub enum SessionBackend {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl SessionBackend {
    pub fn is_redis(&self) -> bool {
        matches!(self, SessionBackend::Redis(_))
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            SessionBackend::Redis(store) => store.create(record).await,
            SessionBackend::Memory(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            SessionBackend::Redis(store) => store.save(record).await,
            SessionBackend::Memory(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            SessionBackend::Redis(store) => store.load(session_id).await,
            SessionBackend::Memory(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            SessionBackend::Redis(store) => store.delete(session_id).await,
            SessionBackend::Memory(store) => store.delete(session_id).await,
        }
    }
}

#[async_trait]
impl SessionHealth for SessionBackend {
    async fn health_check(&self) -> bool {
        match self {
            SessionBackend::Redis(store) => store.health_check().await,
            SessionBackend::Memory(_) => true,
        }
    }
}
