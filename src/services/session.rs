//! Client sessions: cookie layer, in-memory store and flash messages

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::{
    cookie::{
        time::{Duration, OffsetDateTime},
        SameSite,
    },
    session::{Id, Record},
    session_store::{self, ExpiredDeletion},
    Expiry, Session, SessionManagerLayer, SessionStore,
};

use crate::{
    config::SessionConfig,
    models::session::{keys, FlashMessage},
};

/// Create the session layer around a store
pub fn session_layer<S>(store: S, config: &SessionConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX),
        )))
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Process-local session store, lost on restart.
///
/// Expired records are invisible to `load` and dropped by
/// [`ExpiredDeletion::delete_expired`].
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<Id, Record>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, expired or not
    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut sessions = self.sessions.lock().await;
        while sessions.contains_key(&record.id) {
            record.id = Id::default();
        }
        sessions.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.sessions.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .sessions
            .lock()
            .await
            .get(id)
            .filter(|record| is_active(record))
            .cloned())
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.sessions.lock().await.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for MemorySessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        self.sessions.lock().await.retain(|_, record| is_active(record));
        Ok(())
    }
}

/// Sweep expired sessions from a store forever
pub async fn delete_expired_every<S>(store: S, period: std::time::Duration)
where
    S: ExpiredDeletion,
{
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            tracing::warn!("Failed to delete expired sessions: {}", e);
        }
    }
}

/// Take pending flash messages, leaving none behind
pub async fn take_flash(session: &Session) -> Result<Vec<FlashMessage>, tower_sessions::session::Error> {
    let messages: Option<Vec<FlashMessage>> = session.get(keys::FLASH).await?;
    if messages.is_some() {
        session.remove::<Vec<FlashMessage>>(keys::FLASH).await?;
    }
    Ok(messages.unwrap_or_default())
}

/// Queue a message for the next rendered page
pub async fn push_flash(session: &Session, message: FlashMessage) -> Result<(), tower_sessions::session::Error> {
    let mut messages: Vec<FlashMessage> = session.get(keys::FLASH).await?.unwrap_or_default();
    messages.push(message);
    session.insert(keys::FLASH, messages).await
}
