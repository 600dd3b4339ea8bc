//! MockChatBackend - answers from built-in study material.
//!
//! Keeps an in-memory log of what was asked so the session list and session
//! replay work offline too.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rezzy_core::chat::{ResponseItem, ResponsePayload};
use rezzy_core::error::{Result, RezzyError};
use rezzy_core::session::{
    ChatSession, ChatSessionSummary, ChatSessionsPage, HealthStatus, Pagination, QueryReply,
};
use rezzy_core::util::truncate_text;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::backend::ChatBackend;
use crate::mock_data;

const TITLE_MAX_CHARS: usize = 60;
const SAMPLE_SIZE: usize = 3;

#[derive(Debug, Clone)]
struct MockSession {
    id: String,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    conversations: Vec<Value>,
}

impl MockSession {
    fn summary(&self) -> ChatSessionSummary {
        ChatSessionSummary {
            chat_session_id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
            response_count: self.conversations.len() as u32,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockChatBackend {
    sessions: Mutex<Vec<MockSession>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the answer items for `question`.
    ///
    /// The first item carries the display text; fixture questions and
    /// flashcards follow.
    pub fn answer(question: &str) -> Vec<ResponseItem> {
        let results = mock_data::search_content(question);

        let (response, questions, flashcards) = if results.is_empty() {
            (
                "I could not find material for that yet, so here are some practice items to get you started."
                    .to_string(),
                mock_data::random_questions(SAMPLE_SIZE),
                mock_data::random_flashcards(SAMPLE_SIZE),
            )
        } else {
            (
                format!(
                    "Here is what I found for \"{}\".",
                    truncate_text(question.trim(), TITLE_MAX_CHARS)
                ),
                results.questions,
                results.flashcards,
            )
        };

        let fact = flashcards.first().and_then(|card| card.back.clone());

        let mut items = Vec::with_capacity(1 + questions.len() + flashcards.len());
        items.push(ResponseItem {
            fact,
            response: Some(response),
            ..Default::default()
        });
        items.extend(questions);
        items.extend(flashcards);
        items
    }

    fn record_turn(&self, question: &str, session_id: Option<&str>, items: &[ResponseItem]) -> Result<(String, u32)> {
        let response = serde_json::to_value(items)?;
        let mut turn = Map::new();
        turn.insert(question.to_string(), response);

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| RezzyError::storage("Mock session log poisoned"))?;
        let now = Utc::now();

        let index = match session_id.and_then(|id| sessions.iter().position(|s| s.id == id)) {
            Some(index) => index,
            None => {
                sessions.push(MockSession {
                    id: session_id
                        .map(str::to_string)
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    title: truncate_text(question.trim(), TITLE_MAX_CHARS),
                    created_at: now,
                    updated_at: now,
                    conversations: Vec::new(),
                });
                sessions.len() - 1
            }
        };

        let session = &mut sessions[index];
        session.conversations.push(Value::Object(turn));
        session.updated_at = now;
        Ok((session.id.clone(), session.conversations.len() as u32))
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn process_query(&self, question: &str, session_id: Option<&str>) -> Result<QueryReply> {
        let items = Self::answer(question);
        let (session_id, response_number) = self.record_turn(question, session_id, &items)?;

        tracing::debug!(%session_id, response_number, items = items.len(), "Answered from mock data");

        Ok(QueryReply {
            payload: ResponsePayload::Many(items),
            chat_session_id: Some(session_id),
            response_number: Some(response_number),
        })
    }

    async fn list_sessions(&self, page: u32, limit: u32) -> Result<ChatSessionsPage> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| RezzyError::storage("Mock session log poisoned"))?;

        let mut summaries: Vec<(DateTime<Utc>, ChatSessionSummary)> = sessions
            .iter()
            .map(|session| (session.updated_at, session.summary()))
            .collect();
        summaries.sort_by(|a, b| b.0.cmp(&a.0));

        let page = page.max(1);
        let skip = ((page - 1) as usize).saturating_mul(limit as usize);
        let chat_sessions = summaries
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .map(|(_, summary)| summary)
            .collect();

        Ok(ChatSessionsPage {
            chat_sessions,
            pagination: Pagination::for_page(page, limit, sessions.len() as u32),
        })
    }

    async fn session_detail(&self, session_id: &str) -> Result<ChatSession> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| RezzyError::storage("Mock session log poisoned"))?;

        sessions
            .iter()
            .find(|session| session.id == session_id)
            .map(|session| ChatSession {
                session_id: session.id.clone(),
                title: session.title.clone(),
                created_at: session.created_at,
                updated_at: Some(session.updated_at.to_rfc3339()),
                summary: None,
                conversations: session.conversations.clone(),
            })
            .ok_or_else(|| RezzyError::Http {
                status: 404,
                message: format!("Chat session '{session_id}' not found"),
            })
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rezzy_core::session::normalize;

    #[test]
    fn test_answer_starts_with_text_item() {
        let items = MockChatBackend::answer("What role does calcium play in muscle contraction?");
        assert!(items[0].is_primary_text_candidate());
        assert!(items[1..].iter().any(ResponseItem::is_flashcard_candidate));
    }

    #[test]
    fn test_answer_without_match_samples_fixtures() {
        let items = MockChatBackend::answer("zzzz");
        let questions = items.iter().filter(|i| i.is_question_candidate()).count();
        let flashcards = items.iter().filter(|i| i.is_flashcard_candidate()).count();
        assert_eq!(questions, SAMPLE_SIZE);
        assert_eq!(flashcards, SAMPLE_SIZE);
    }

    #[tokio::test]
    async fn test_queries_are_logged_as_sessions() {
        let backend = MockChatBackend::new();

        let first = backend.process_query("Tell me about Osteology", None).await.unwrap();
        let session_id = first.chat_session_id.clone().unwrap();
        assert_eq!(first.response_number, Some(1));

        let second = backend
            .process_query("And the patella?", Some(&session_id))
            .await
            .unwrap();
        assert_eq!(second.chat_session_id.as_deref(), Some(session_id.as_str()));
        assert_eq!(second.response_number, Some(2));

        let page = backend.list_sessions(1, 10).await.unwrap();
        assert_eq!(page.chat_sessions.len(), 1);
        assert_eq!(page.chat_sessions[0].response_count, 2);
        assert_eq!(page.chat_sessions[0].title, "Tell me about Osteology");

        let detail = backend.session_detail(&session_id).await.unwrap();
        let messages = normalize(&detail).unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].text, "And the patella?");
    }

    #[tokio::test]
    async fn test_unknown_session_detail_is_404() {
        let backend = MockChatBackend::new();
        let err = backend.session_detail("missing").await.unwrap_err();
        assert!(matches!(err, RezzyError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_list_sessions_paginates() {
        let backend = MockChatBackend::new();
        for question in ["one", "two", "three"] {
            backend.process_query(question, None).await.unwrap();
        }

        let page = backend.list_sessions(2, 2).await.unwrap();
        assert_eq!(page.chat_sessions.len(), 1);
        assert_eq!(page.pagination.total_count, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }
}
