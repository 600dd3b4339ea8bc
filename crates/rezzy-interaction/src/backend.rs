//! Backend trait for the Rezzy chat service.

use async_trait::async_trait;
use rezzy_core::error::Result;
use rezzy_core::session::{ChatSession, ChatSessionsPage, HealthStatus, QueryReply};

/// The request/response boundary to the chat service.
///
/// Implementations must not retry non-transport errors and must surface
/// failures as labeled `RezzyError`s; what to show the user is decided by
/// the caller.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Asks a question, optionally filing it under an existing session.
    async fn process_query(&self, question: &str, session_id: Option<&str>) -> Result<QueryReply>;

    /// Lists stored sessions, 1-based `page`.
    async fn list_sessions(&self, page: u32, limit: u32) -> Result<ChatSessionsPage>;

    /// Fetches one session with all its conversation turns.
    async fn session_detail(&self, session_id: &str) -> Result<ChatSession>;

    async fn health_check(&self) -> Result<HealthStatus>;
}
