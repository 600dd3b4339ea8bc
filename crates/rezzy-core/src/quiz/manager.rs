use std::collections::BTreeMap;

use uuid::Uuid;

use super::model::QuizSession;
use crate::chat::Question;
use crate::error::{Result, RezzyError};

/// Holds at most one active quiz and drives its transitions.
#[derive(Debug, Default)]
pub struct QuizManager {
    current: Option<QuizSession>,
}

impl QuizManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&QuizSession> {
        self.current.as_ref()
    }

    /// Starts a new quiz, replacing any active one.
    ///
    /// # Errors
    ///
    /// Returns a `Quiz` error when `questions` is empty; the previous quiz
    /// (if any) is kept.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<&QuizSession> {
        if questions.is_empty() {
            return Err(RezzyError::quiz("No questions provided for quiz"));
        }

        tracing::debug!(count = questions.len(), "Starting quiz");
        Ok(self.current.insert(QuizSession {
            id: Uuid::new_v4().to_string(),
            questions,
            current_question_index: 0,
            answers: BTreeMap::new(),
            score: None,
            completed: false,
        }))
    }

    /// Records (or overwrites) the answer for the question at `question_index`.
    pub fn submit_answer(&mut self, question_index: usize, answer: impl Into<String>) -> Result<()> {
        let quiz = self.active_mut()?;
        if question_index >= quiz.questions.len() {
            return Err(RezzyError::quiz(format!(
                "Question {question_index} is out of range ({} questions)",
                quiz.questions.len()
            )));
        }
        quiz.answers.insert(question_index, answer.into());
        Ok(())
    }

    /// Moves to the next question; the quiz completes after the last one.
    pub fn next_question(&mut self) -> Result<&QuizSession> {
        let quiz = self.active_mut()?;
        let next_index = quiz.current_question_index + 1;
        quiz.current_question_index = next_index;
        quiz.completed = next_index >= quiz.questions.len();
        Ok(quiz)
    }

    /// Scores the quiz and marks it completed. Returns the score.
    pub fn finish(&mut self) -> Result<u32> {
        let quiz = self.active_mut()?;
        let score = quiz.compute_score();
        quiz.score = Some(score);
        quiz.completed = true;
        tracing::debug!(score, "Quiz finished");
        Ok(score)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    fn active_mut(&mut self) -> Result<&mut QuizSession> {
        self.current
            .as_mut()
            .ok_or_else(|| RezzyError::quiz("No active quiz session"))
    }
}
