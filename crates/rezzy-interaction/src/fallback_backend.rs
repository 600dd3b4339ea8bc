use std::sync::Arc;

use async_trait::async_trait;
use rezzy_core::error::{Result, RezzyError};
use rezzy_core::session::{ChatSession, ChatSessionsPage, HealthStatus, QueryReply};

use crate::backend::ChatBackend;

/// Tries `primary` first and answers from `fallback` when the primary
/// backend cannot be reached.
///
/// Only transport failures (see `RezzyError::is_transport`) fall back; a
/// well-formed error answer from the primary backend is returned as is.
pub struct FallbackChatBackend {
    primary: Arc<dyn ChatBackend>,
    fallback: Arc<dyn ChatBackend>,
}

impl FallbackChatBackend {
    pub fn new(primary: Arc<dyn ChatBackend>, fallback: Arc<dyn ChatBackend>) -> Self {
        Self { primary, fallback }
    }

    fn should_fall_back(operation: &str, err: &RezzyError) -> bool {
        if err.is_transport() {
            tracing::warn!(target: "fallback", operation, error = %err, "Backend unreachable, using mock data");
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl ChatBackend for FallbackChatBackend {
    async fn process_query(&self, question: &str, session_id: Option<&str>) -> Result<QueryReply> {
        match self.primary.process_query(question, session_id).await {
            Err(err) if Self::should_fall_back("process_query", &err) => {
                self.fallback.process_query(question, session_id).await
            }
            other => other,
        }
    }

    async fn list_sessions(&self, page: u32, limit: u32) -> Result<ChatSessionsPage> {
        match self.primary.list_sessions(page, limit).await {
            Err(err) if Self::should_fall_back("list_sessions", &err) => {
                self.fallback.list_sessions(page, limit).await
            }
            other => other,
        }
    }

    async fn session_detail(&self, session_id: &str) -> Result<ChatSession> {
        match self.primary.session_detail(session_id).await {
            Err(err) if Self::should_fall_back("session_detail", &err) => {
                self.fallback.session_detail(session_id).await
            }
            other => other,
        }
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        match self.primary.health_check().await {
            Err(err) if Self::should_fall_back("health_check", &err) => {
                self.fallback.health_check().await
            }
            other => other,
        }
    }
}
