//! Quiz use case: practice questions fetched from the backend, answered one
//! at a time.

use std::sync::Arc;

use rezzy_core::chat::Question;
use rezzy_core::error::{Result, RezzyError};
use rezzy_core::quiz::{QuizManager, QuizSession};
use rezzy_interaction::ChatBackend;

use crate::study_service::StudyMaterialService;

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// The answer as recorded, after option letters/numbers are resolved.
    pub answer: String,
    pub correct: bool,
    pub correct_option: Option<String>,
    /// No questions remain.
    pub completed: bool,
}

pub struct QuizUseCase {
    study: StudyMaterialService,
    manager: QuizManager,
}

impl QuizUseCase {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            study: StudyMaterialService::new(backend),
            manager: QuizManager::new(),
        }
    }

    /// Starts a quiz over the questions the backend returns for `query`.
    ///
    /// # Errors
    ///
    /// Backend errors, or a `Quiz` error when the answer has no questions.
    pub async fn start(&mut self, query: &str) -> Result<&QuizSession> {
        let questions = self.study.search_questions(query).await?;
        tracing::info!(query, count = questions.len(), "Starting quiz");
        self.manager.start(questions)
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.manager.current()
    }

    /// Position and content of the question awaiting an answer.
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        let quiz = self.manager.current()?;
        if quiz.completed {
            return None;
        }
        quiz.current_question()
            .map(|question| (quiz.current_question_index, question))
    }

    /// Records `input` for the current question and moves on.
    pub fn answer(&mut self, input: &str) -> Result<AnswerFeedback> {
        let (index, answer, correct_option) = {
            let (index, question) = self
                .current_question()
                .ok_or_else(|| RezzyError::quiz("No question awaiting an answer"))?;
            (
                index,
                resolve_answer(question, input),
                question.correct_option_text().map(str::to_string),
            )
        };

        self.manager.submit_answer(index, answer.clone())?;
        let completed = self.manager.next_question()?.completed;

        Ok(AnswerFeedback {
            correct: correct_option.as_deref() == Some(answer.as_str()),
            answer,
            correct_option,
            completed,
        })
    }

    /// Scores the quiz as a rounded percentage.
    pub fn finish(&mut self) -> Result<u32> {
        self.manager.finish()
    }
}

/// Maps an option letter (`b`), a 1-based number (`2`) or a case-insensitive
/// option text to the option itself. Anything else is kept as typed.
pub fn resolve_answer(question: &Question, input: &str) -> String {
    let input = input.trim();
    let options = question.options.as_deref().unwrap_or_default();

    let mut chars = input.chars();
    let by_letter = match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => {
            let offset = letter.to_ascii_lowercase() as usize - 'a' as usize;
            options.get(offset)
        }
        _ => None,
    };
    let by_number = input
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index));
    let by_text = options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input));

    by_letter
        .or(by_number)
        .or(by_text)
        .cloned()
        .unwrap_or_else(|| input.to_string())
}
