//! Redis-backed session store

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tower_sessions::{
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store, SessionStore,
};

#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: Client,
}

fn backend(context: &str, e: redis::RedisError) -> session_store::Error {
    session_store::Error::Backend(format!("{}: {}", context, e))
}

impl RedisSessionStore {
    /// Create a new Redis session store
    pub async fn new(url: &str) -> session_store::Result<Self> {
        let client = Client::open(url).map_err(|e| backend("Failed to create Redis client", e))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| backend("Failed to connect to Redis", e))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| backend("Redis connection test failed", e))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> session_store::Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| backend("Failed to get Redis connection", e))
    }
}

fn session_key(id: &Id) -> String {
    format!("session:catalog:{}", id)
}

/// Seconds until the record expires, at least one
fn ttl_seconds(record: &Record) -> u64 {
    let remaining = (record.expiry_date - OffsetDateTime::now_utc()).whole_seconds();
    u64::try_from(remaining).unwrap_or(0).max(1)
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut conn = self.connection().await?;

        let json = serde_json::to_string(record)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;

        conn.set_ex::<_, _, ()>(session_key(&record.id), json, ttl_seconds(record))
            .await
            .map_err(|e| backend("Failed to store session in Redis", e))
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let mut conn = self.connection().await?;

        let stored: Option<String> = conn
            .get(session_key(id))
            .await
            .map_err(|e| backend("Failed to read session from Redis", e))?;

        match stored {
            Some(json) => match serde_json::from_str(&json) {
                Ok(record) => Ok(Some(record)),
                Err(e) => {
                    // Start over rather than fail every request for this client
                    tracing::warn!("Discarding unreadable session {}: {}", id, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(session_key(id))
            .await
            .map_err(|e| backend("Failed to delete session from Redis", e))
    }
}
