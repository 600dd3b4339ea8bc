use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chat::Question;

/// An in-progress quiz over a fixed list of questions.
///
/// Answers are keyed by question position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub id: String,
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    pub answers: BTreeMap<usize, String>,
    pub score: Option<u32>,
    pub completed: bool,
}

impl QuizSession {
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// Number of recorded answers matching the question's correct option.
    pub fn correct_answers(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                match (self.answers.get(index), question.correct_option_text()) {
                    (Some(answer), Some(correct)) => answer == correct,
                    _ => false,
                }
            })
            .count()
    }

    /// Percentage of correct answers, rounded to the nearest integer.
    pub fn compute_score(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        let ratio = self.correct_answers() as f64 / self.questions.len() as f64;
        (ratio * 100.0).round() as u32
    }
}
