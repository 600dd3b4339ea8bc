//! Quiz state for questions collected from bot answers.

mod manager;
mod model;

pub use manager::QuizManager;
pub use model::QuizSession;
