//! Session replay: stored conversation turns to display messages.

use serde_json::Value;

use super::model::ChatSession;
use crate::chat::{CallSite, ChatMessage, ResponsePayload, Separator, classify};
use crate::error::{Result, RezzyError};

/// Converts a stored session into its ordered message list.
///
/// Each turn yields a user message `user-{i}` followed by a bot message
/// `bot-{i}`. All messages carry the session's creation time.
///
/// # Errors
///
/// Fails on the first turn that is not a single-key object
/// (`MalformedTurn`) or whose response has the wrong shape
/// (`InvalidPayloadShape`). No partial list is returned.
pub fn normalize(session: &ChatSession) -> Result<Vec<ChatMessage>> {
    let separator = Separator::for_call_site(CallSite::SessionReplay);
    let mut messages = Vec::with_capacity(session.conversations.len() * 2);

    for (index, turn) in session.conversations.iter().enumerate() {
        let (question, response) = split_turn(index, turn)?;
        let payload = ResponsePayload::from_value(response.clone())?;
        let classified = classify(payload, separator);

        messages.push(ChatMessage::user(
            format!("user-{index}"),
            question,
            session.created_at,
        ));
        messages.push(ChatMessage::bot(
            format!("bot-{index}"),
            classified,
            session.created_at,
        ));
    }

    tracing::debug!(
        session_id = %session.session_id,
        turns = session.conversations.len(),
        "Normalized chat session"
    );

    Ok(messages)
}

fn split_turn(index: usize, turn: &Value) -> Result<(&str, &Value)> {
    let Some(map) = turn.as_object() else {
        return Err(RezzyError::MalformedTurn {
            index,
            key_count: 0,
        });
    };

    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((question, response)), None) => Ok((question.as_str(), response)),
        _ => Err(RezzyError::MalformedTurn {
            index,
            key_count: map.len(),
        }),
    }
}
