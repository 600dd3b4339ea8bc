//! Chat message types handed to the view layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::ClassifiedResponse;
use super::response::{Flashcard, Question};

/// Shown in place of a bot answer when a send or load fails.
pub const ERROR_REPLY_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

/// A single displayable message.
///
/// `questions` and `flashcards` are `None` when the message has no such
/// section. When present they are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcards: Option<Vec<Flashcard>>,
}

impl ChatMessage {
    pub fn user(id: impl Into<String>, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::User,
            text: text.into(),
            created_at,
            questions: None,
            flashcards: None,
        }
    }

    /// Builds a bot message from a classified response.
    pub fn bot(
        id: impl Into<String>,
        classified: ClassifiedResponse,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Bot,
            text: classified.text,
            created_at,
            questions: classified.questions,
            flashcards: classified.flashcards,
        }
    }

    /// The static bot reply used when a request fails.
    pub fn error_reply(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Bot,
            text: ERROR_REPLY_TEXT.to_string(),
            created_at,
            questions: None,
            flashcards: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_bot(&self) -> bool {
        self.role == MessageRole::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_sections_are_not_serialized() {
        let at = DateTime::parse_from_rfc3339("2025-06-06T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let message = ChatMessage::user("user-0", "What is the patella?", at);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "user-0",
                "role": "user",
                "text": "What is the patella?",
                "createdAt": "2025-06-06T10:00:00Z"
            })
        );
    }

    #[test]
    fn test_error_reply_is_bot_message() {
        let message = ChatMessage::error_reply("1", Utc::now());
        assert!(message.is_bot());
        assert_eq!(message.text, ERROR_REPLY_TEXT);
        assert!(message.questions.is_none());
    }
}
