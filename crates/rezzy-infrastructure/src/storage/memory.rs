use async_trait::async_trait;
use rezzy_core::error::Result;
use rezzy_core::session::SessionStore;
use tokio::sync::RwLock;

/// Session id store that lives as long as the process.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session_id: RwLock<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: RwLock::new(Some(session_id.into())),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self) -> Result<Option<String>> {
        Ok(self.session_id.read().await.clone())
    }

    async fn set(&self, session_id: &str) -> Result<()> {
        *self.session_id.write().await = Some(session_id.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session_id.write().await = None;
        Ok(())
    }
}
