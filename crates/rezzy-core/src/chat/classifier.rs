//! Response classification.
//!
//! Splits one bot response into the text to display plus the flashcards and
//! quiz questions it carries.

use serde_json::Value;

use super::response::{Flashcard, Question, ResponseItem, ResponsePayload};
use crate::error::Result;

/// Displayed when a response carries neither a fact nor a response text.
pub const FALLBACK_RESPONSE_TEXT: &str = "Here is the information you requested.";

/// Where a response is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// Replaying a stored session turn by turn.
    SessionReplay,
    /// Showing the answer to a message that was just sent.
    LiveSend,
}

/// Glue placed between a fact and its response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Paragraph,
    Space,
}

impl Separator {
    /// The two call sites join fact and response differently; keep them apart.
    pub fn for_call_site(call_site: CallSite) -> Self {
        match call_site {
            CallSite::SessionReplay => Separator::Paragraph,
            CallSite::LiveSend => Separator::Space,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Paragraph => "\n\n",
            Separator::Space => " ",
        }
    }
}

/// The three parts derived from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedResponse {
    pub text: String,
    pub flashcards: Option<Vec<Flashcard>>,
    pub questions: Option<Vec<Question>>,
}

/// Classifies a validated payload.
///
/// The primary item is the first one with a response text, or the first item
/// when none has one. Items that look like flashcards and questions are
/// collected in payload order; an item may land in both lists.
pub fn classify(payload: ResponsePayload, separator: Separator) -> ClassifiedResponse {
    let items = payload.into_items();

    let primary = items
        .iter()
        .find(|item| item.is_primary_text_candidate())
        .or_else(|| items.first());

    let text = display_text(primary, separator);

    let flashcards = collect(&items, ResponseItem::is_flashcard_candidate);
    let questions = collect(&items, ResponseItem::is_question_candidate);

    ClassifiedResponse {
        text,
        flashcards,
        questions,
    }
}

/// Validates a raw JSON response and classifies it.
///
/// # Errors
///
/// Returns `InvalidPayloadShape` when the value is not an object or an array
/// of objects.
pub fn classify_value(value: Value, separator: Separator) -> Result<ClassifiedResponse> {
    let payload = ResponsePayload::from_value(value)?;
    Ok(classify(payload, separator))
}

fn display_text(primary: Option<&ResponseItem>, separator: Separator) -> String {
    let fact = primary.and_then(ResponseItem::fact_text).unwrap_or("");
    let response = primary
        .and_then(ResponseItem::response_text)
        .unwrap_or(FALLBACK_RESPONSE_TEXT);

    if !fact.is_empty() && !response.is_empty() && fact != response {
        return format!("{fact}{}{response}", separator.as_str());
    }

    [response, fact]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(FALLBACK_RESPONSE_TEXT)
        .to_string()
}

fn collect(items: &[ResponseItem], keep: fn(&ResponseItem) -> bool) -> Option<Vec<ResponseItem>> {
    let kept: Vec<ResponseItem> = items.iter().filter(|item| keep(item)).cloned().collect();
    if kept.is_empty() { None } else { Some(kept) }
}
