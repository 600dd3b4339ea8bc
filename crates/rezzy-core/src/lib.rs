//! Domain layer for the Ask Rezzy chat client.
//!
//! Turns backend responses into display messages: classification of a single
//! answer, replay of a stored session, plus the quiz state and the session id
//! store interface used by the application layer.

pub mod chat;
pub mod config;
pub mod error;
pub mod quiz;
pub mod session;
pub mod util;

// Re-export common error type
pub use error::{Result, RezzyError};
