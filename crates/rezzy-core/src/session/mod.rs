//! Session domain module.
//!
//! This module contains the server-owned session models, the replay
//! normalizer and the session id store interface.
//!
//! # Module Structure
//!
//! - `model`: Session and backend reply models (`ChatSession`, `QueryReply`, ...)
//! - `normalizer`: Stored session to ordered `ChatMessage` list
//! - `store`: Store trait for the active session id (`SessionStore`)

mod model;
mod normalizer;
mod store;

// Re-export public API
pub use model::{
    ChatSession, ChatSessionSummary, ChatSessionsPage, HealthStatus, Pagination, QueryReply,
    SearchSuggestion, SuggestionCategory, parse_timestamp,
};
pub use normalizer::normalize;
pub use store::SessionStore;
