//! Chat domain module.
//!
//! # Module Structure
//!
//! - `response`: Raw bot response items and payloads (`ResponseItem`, `ResponsePayload`)
//! - `classifier`: Splits a response into display text, flashcards and questions
//! - `message`: Display messages (`ChatMessage`, `MessageRole`)
//! - `reveal`: Word-by-word reveal of a finished answer
//!
//! # Usage
//!
//! ```ignore
//! use rezzy_core::chat::{classify, CallSite, Separator, ResponsePayload};
//! ```

mod classifier;
mod message;
mod response;
mod reveal;

// Re-export public API
pub use classifier::{
    CallSite, ClassifiedResponse, FALLBACK_RESPONSE_TEXT, Separator, classify, classify_value,
};
pub use message::{ChatMessage, ERROR_REPLY_TEXT, MessageRole};
pub use response::{Flashcard, Question, ResponseItem, ResponsePayload};
pub use reveal::RevealSequence;
