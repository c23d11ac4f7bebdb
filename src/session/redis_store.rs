//! Redis-backed session store.

use std::fmt;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tower_sessions::SessionStore;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tracing::{debug, info};

/// Session store keeping each session record as one Redis string.
///
/// Layout: `session:{id}` holds the JSON-encoded record and expires at the
/// record's expiry date (`SET ... EXAT`), so idle sessions disappear on
/// their own. Each write replaces the whole record in a single command.
///
/// Uses `ConnectionManager` for automatic reconnection. Unlike a cache, the
/// store does not fail open: errors reach the session layer as
/// [`session_store::Error::Backend`].
#[derive(Clone)]
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`session_store::Error::Backend`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> session_store::Result<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            session_store::Error::Backend(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            session_store::Error::Backend(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| session_store::Error::Backend(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis session store");

        Ok(Self {
            client: manager,
            key_prefix: "session:".to_string(),
        })
    }

    fn build_key(&self, session_id: &Id) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }

    /// Writes the record, only if the key is absent when `only_new` is set.
    ///
    /// Returns `false` when `only_new` is set and the key already exists.
    async fn write(&self, record: &Record, only_new: bool) -> session_store::Result<bool> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(self.build_key(&record.id)).arg(encode(record)?);
        if only_new {
            cmd.arg("NX");
        }
        cmd.arg("EXAT").arg(record.expiry_date.unix_timestamp());

        let mut conn = self.client.clone();
        let reply: redis::Value = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| backend("SET", e))?;

        Ok(!matches!(reply, redis::Value::Nil))
    }

    /// Checks if Redis answers a PING.
    pub async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

fn backend(op: &str, e: redis::RedisError) -> session_store::Error {
    session_store::Error::Backend(format!("Redis {} failed: {}", op, e))
}

fn encode(record: &Record) -> session_store::Result<String> {
    serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))
}

fn decode(text: &str) -> session_store::Result<Record> {
    serde_json::from_str(text).map_err(|e| session_store::Error::Decode(e.to_string()))
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while !self.write(record, true).await? {
            record.id = Id::default();
        }
        debug!("Session CREATE: {}", record.id);
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.write(record, false).await?;
        debug!("Session SAVE: {}", record.id);
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut conn = self.client.clone();
        let raw: Option<String> = conn
            .get(self.build_key(session_id))
            .await
            .map_err(|e| backend("GET", e))?;

        raw.as_deref().map(decode).transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let mut conn = self.client.clone();
        let deleted: i32 = conn
            .del(self.build_key(session_id))
            .await
            .map_err(|e| backend("DEL", e))?;
        if deleted > 0 {
            debug!("Session DELETE: {}", session_id);
        }
        Ok(())
    }
}
