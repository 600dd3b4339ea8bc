//! Study material lookups on top of the chat backend.

use std::sync::Arc;

use rezzy_core::chat::{
    CallSite, ClassifiedResponse, Flashcard, Question, Separator, classify,
};
use rezzy_core::error::Result;
use rezzy_core::session::SearchSuggestion;
use rezzy_interaction::ChatBackend;
use rezzy_interaction::mock_data;

const PRACTICE_QUESTIONS_QUERY: &str = "Give me practice questions";
const STUDY_FLASHCARDS_QUERY: &str = "Give me study flashcards";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyMaterials {
    pub questions: Vec<Question>,
    pub flashcards: Vec<Flashcard>,
}

pub struct StudyMaterialService {
    backend: Arc<dyn ChatBackend>,
}

impl StudyMaterialService {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    async fn query(&self, query: &str) -> Result<ClassifiedResponse> {
        let reply = self.backend.process_query(query, None).await?;
        Ok(classify(
            reply.payload,
            Separator::for_call_site(CallSite::LiveSend),
        ))
    }

    /// Questions and flashcards from a single query.
    pub async fn search(&self, query: &str) -> Result<StudyMaterials> {
        let classified = self.query(query).await?;
        Ok(StudyMaterials {
            questions: classified.questions.unwrap_or_default(),
            flashcards: classified.flashcards.unwrap_or_default(),
        })
    }

    /// Questions the backend returns for `query`.
    pub async fn search_questions(&self, query: &str) -> Result<Vec<Question>> {
        Ok(self.query(query).await?.questions.unwrap_or_default())
    }

    /// Flashcards the backend returns for `query`.
    pub async fn search_flashcards(&self, query: &str) -> Result<Vec<Flashcard>> {
        Ok(self.query(query).await?.flashcards.unwrap_or_default())
    }

    /// General practice material. Both lookups run concurrently and a failed
    /// lookup contributes an empty list.
    pub async fn random_study_materials(&self) -> StudyMaterials {
        let (questions, flashcards) = tokio::join!(
            self.search_questions(PRACTICE_QUESTIONS_QUERY),
            self.search_flashcards(STUDY_FLASHCARDS_QUERY),
        );

        StudyMaterials {
            questions: questions.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Failed to load practice questions");
                Vec::new()
            }),
            flashcards: flashcards.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Failed to load study flashcards");
                Vec::new()
            }),
        }
    }

    /// The backend has no difficulty filter, so every level gets general
    /// practice questions.
    pub async fn questions_by_difficulty(&self, level: Difficulty) -> Result<Vec<Question>> {
        tracing::debug!(?level, "Difficulty filter not supported by backend");
        self.search_questions(PRACTICE_QUESTIONS_QUERY).await
    }

    /// Starter prompts for an empty chat.
    pub fn search_suggestions(&self) -> Vec<SearchSuggestion> {
        mock_data::search_suggestions()
    }
}
