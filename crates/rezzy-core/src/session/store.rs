//! Session id store trait.
//!
//! Holds the id of the chat session new messages are filed under.

use async_trait::async_trait;

use crate::error::Result;

/// A single-slot store for the active chat session id.
///
/// Passed explicitly to whatever drives the chat so no global key-value
/// state is needed. Implementations may be in-memory or persistent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session id, if any.
    async fn get(&self) -> Result<Option<String>>;

    /// Replaces the stored session id.
    async fn set(&self, session_id: &str) -> Result<()>;

    /// Forgets the stored session id. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}
