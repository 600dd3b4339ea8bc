//! Server-owned session models and backend reply shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::ResponsePayload;
use crate::error::{Result, RezzyError};

/// A stored chat session as returned by the session detail endpoint.
///
/// `conversations` holds the raw turns; each should be an object with a
/// single key (the user's question) mapping to a response payload. Turn
/// validation happens during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    #[serde(rename = "chat_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub conversations: Vec<Value>,
}

/// One row of the session list.
///
/// Missing or null text fields read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSessionSummary {
    pub chat_session_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
    #[serde(default)]
    pub response_count: u32,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u32,
    pub limit: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Computes pagination for `total_count` items.
    pub fn for_page(current_page: u32, limit: u32, total_count: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_count.div_ceil(limit)
        };
        Self {
            current_page,
            total_pages,
            total_count,
            limit,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }
}

/// A page of the session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSessionsPage {
    pub chat_sessions: Vec<ChatSessionSummary>,
    pub pagination: Pagination,
}

/// The backend's answer to a query.
///
/// The query endpoint either returns the payload directly or wraps it in an
/// envelope carrying the session id the answer was filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReply {
    pub payload: ResponsePayload,
    pub chat_session_id: Option<String>,
    pub response_number: Option<u32>,
}

impl QueryReply {
    /// Parses a raw reply body.
    ///
    /// An object containing `chat_session_id` is treated as the envelope
    /// `{response, chat_session_id, response_number}`; anything else must be
    /// a bare payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayloadShape` when the envelope or the payload inside
    /// it has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Ok(Self {
                payload: ResponsePayload::from_value(value)?,
                chat_session_id: None,
                response_number: None,
            });
        };

        if !map.contains_key("chat_session_id") {
            return Ok(Self {
                payload: ResponsePayload::from_value(Value::Object(map))?,
                chat_session_id: None,
                response_number: None,
            });
        }

        let chat_session_id = match map.remove("chat_session_id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id),
            Some(Value::Null) | None => None,
            Some(Value::String(_)) => None,
            Some(other) => {
                return Err(RezzyError::invalid_payload(format!(
                    "chat_session_id must be a string, got {other}"
                )));
            }
        };
        let response_number = map
            .remove("response_number")
            .and_then(|value| value.as_u64())
            .and_then(|number| u32::try_from(number).ok());
        let response = map
            .remove("response")
            .ok_or_else(|| RezzyError::invalid_payload("envelope has no 'response' field"))?;

        Ok(Self {
            payload: ResponsePayload::from_value(response)?,
            chat_session_id,
            response_number,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Topic,
    Question,
    Flashcard,
}

/// A tappable prompt shown before the user types anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub id: String,
    pub text: String,
    pub category: SuggestionCategory,
}

impl SearchSuggestion {
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: SuggestionCategory) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category,
        }
    }
}

/// Parses RFC 3339 timestamps, and zone-less ISO timestamps as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RezzyError::InvalidTimestamp {
            value: value.to_string(),
        })
}

mod flexible_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
