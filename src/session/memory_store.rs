//! In-process session store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tracing::debug;

/// How often `create` prunes expired records.
const SWEEP_INTERVAL: Duration = Duration::minutes(1);

#[derive(Debug)]
struct Records {
    map: HashMap<Id, Record>,
    next_sweep: OffsetDateTime,
}

impl Records {
    fn sweep(&mut self, now: OffsetDateTime) -> usize {
        let before = self.map.len();
        self.map.retain(|_, record| record.expiry_date > now);
        self.next_sweep = now + SWEEP_INTERVAL;
        before - self.map.len()
    }
}

/// Session store backed by a process-local map.
///
/// Used when Redis is not configured or unreachable at startup. Sessions
/// do not survive a restart and are not shared between replicas.
///
/// Expired records never load. They are dropped when a new session is
/// created, at most once per minute, or by [`MemoryStore::delete_expired`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Records {
                map: HashMap::new(),
                next_sweep: OffsetDateTime::now_utc(),
            })),
        }
    }

    /// Number of records held, expired ones included.
    pub async fn len(&self) -> usize {
        self.records.lock().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops every expired record and returns how many were removed.
    pub async fn delete_expired(&self) -> usize {
        let removed = self.records.lock().await.sweep(OffsetDateTime::now_utc());
        if removed > 0 {
            debug!("Swept {} expired sessions", removed);
        }
        removed
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock().await;

        if now >= records.next_sweep {
            let removed = records.sweep(now);
            if removed > 0 {
                debug!("Swept {} expired sessions", removed);
            }
        }

        while records.map.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.map.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records
            .lock()
            .await
            .map
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .lock()
            .await
            .map
            .get(session_id)
            .filter(|record| record.expiry_date > now)
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.map.remove(session_id);
        Ok(())
    }
}
