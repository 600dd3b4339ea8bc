//! Application layer for Rezzy.
//!
//! Use cases that drive a chat screen on top of a `ChatBackend` and a
//! `SessionStore`.

pub mod chat_usecase;
pub mod quiz_usecase;
pub mod study_service;

pub use chat_usecase::{ChatUseCase, SuggestionOutcome};
pub use quiz_usecase::{AnswerFeedback, QuizUseCase};
pub use study_service::{Difficulty, StudyMaterialService, StudyMaterials};
