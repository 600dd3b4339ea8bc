//! Bot response payload types.
//!
//! The backend answers a query with one item or an array of items. Every
//! field of an item is optional; what an item *is* (flashcard, quiz question,
//! plain answer) is decided by which fields are filled in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, RezzyError};

/// One element of a bot response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseItem {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fact: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub response: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub question: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub front: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub back: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_option: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic: Option<String>,
}

// Fields of an unexpected JSON type read as absent so one odd field does not
// discard the whole response.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(elements) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(elements
        .into_iter()
        .map(|element| match element {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect())
}

/// A response item shown as a quiz question.
pub type Question = ResponseItem;

/// A response item shown as a flashcard.
pub type Flashcard = ResponseItem;

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

impl ResponseItem {
    /// Both `front` and `back` are non-empty.
    pub fn is_flashcard_candidate(&self) -> bool {
        filled(&self.front).is_some() && filled(&self.back).is_some()
    }

    /// At least one option and a non-empty `correct_option`.
    pub fn is_question_candidate(&self) -> bool {
        self.options.as_ref().is_some_and(|options| !options.is_empty())
            && filled(&self.correct_option).is_some()
    }

    /// Non-empty `response` text.
    pub fn is_primary_text_candidate(&self) -> bool {
        filled(&self.response).is_some()
    }

    pub fn fact_text(&self) -> Option<&str> {
        filled(&self.fact)
    }

    pub fn response_text(&self) -> Option<&str> {
        filled(&self.response)
    }

    pub fn correct_option_text(&self) -> Option<&str> {
        filled(&self.correct_option)
    }
}

/// A bot response as received: a bare item or an ordered list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Single(ResponseItem),
    Many(Vec<ResponseItem>),
}

impl ResponsePayload {
    /// Validates the shape of a raw JSON response.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayloadShape` when the value is not an object or an
    /// array of objects. Item fields of the wrong JSON type are dropped.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(Self::Single(parse_item(value, None)?)),
            Value::Array(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| {
                    if element.is_object() {
                        parse_item(element, Some(index))
                    } else {
                        Err(RezzyError::invalid_payload(format!(
                            "element {index} is {}, expected an object",
                            json_kind(&element)
                        )))
                    }
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Many),
            other => Err(RezzyError::invalid_payload(format!(
                "payload is {}, expected an object or an array of objects",
                json_kind(&other)
            ))),
        }
    }

    /// Flattens the payload into a non-empty item list.
    ///
    /// A bare item becomes a one-element list. An empty array becomes a
    /// single empty item, which classifies to the fallback text.
    pub fn into_items(self) -> Vec<ResponseItem> {
        match self {
            Self::Single(item) => vec![item],
            Self::Many(items) if items.is_empty() => vec![ResponseItem::default()],
            Self::Many(items) => items,
        }
    }
}

impl<'de> Deserialize<'de> for ResponsePayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn parse_item(value: Value, index: Option<usize>) -> Result<ResponseItem> {
    serde_json::from_value(value).map_err(|err| {
        let location = match index {
            Some(index) => format!("element {index}"),
            None => "item".to_string(),
        };
        RezzyError::invalid_payload(format!("{location}: {err}"))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flashcard_candidate_requires_both_sides() {
        let card: ResponseItem =
            serde_json::from_value(json!({"front": "Patella?", "back": "Sesamoid bone"})).unwrap();
        assert!(card.is_flashcard_candidate());

        let half: ResponseItem =
            serde_json::from_value(json!({"front": "Patella?", "back": ""})).unwrap();
        assert!(!half.is_flashcard_candidate());
    }

    #[test]
    fn test_question_candidate_requires_options_and_answer() {
        let question: ResponseItem = serde_json::from_value(json!({
            "question": "Which test diagnoses osteoporosis?",
            "options": ["X-ray", "DEXA scan"],
            "correct_option": "DEXA scan"
        }))
        .unwrap();
        assert!(question.is_question_candidate());

        let no_options: ResponseItem =
            serde_json::from_value(json!({"options": [], "correct_option": "A"})).unwrap();
        assert!(!no_options.is_question_candidate());

        let no_answer: ResponseItem =
            serde_json::from_value(json!({"options": ["A"], "correct_option": null})).unwrap();
        assert!(!no_answer.is_question_candidate());
    }

    #[test]
    fn test_payload_accepts_object_and_array() {
        let single = ResponsePayload::from_value(json!({"response": "R"})).unwrap();
        assert_eq!(single.into_items().len(), 1);

        let many = ResponsePayload::from_value(json!([{"fact": "F"}, {"response": "R"}])).unwrap();
        assert_eq!(many.into_items().len(), 2);
    }

    #[test]
    fn test_empty_array_yields_single_empty_item() {
        let payload = ResponsePayload::from_value(json!([])).unwrap();
        assert_eq!(payload.into_items(), vec![ResponseItem::default()]);
    }

    #[test]
    fn test_payload_rejects_scalars_and_mixed_arrays() {
        for value in [json!("text"), json!(42), json!(null), json!([{"fact": "F"}, 3])] {
            let err = ResponsePayload::from_value(value).unwrap_err();
            assert!(err.is_invalid_payload(), "unexpected error: {err:?}");
        }
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let payload = ResponsePayload::from_value(json!([
            {"response": "R"},
            {"front": "F", "back": "B", "topic": 7},
            {"question": "Q?", "options": "A, B", "correct_option": 2},
            {"question": "Q2?", "options": ["A", 3], "correct_option": "A"}
        ]))
        .unwrap();

        let items = payload.into_items();
        assert_eq!(items.len(), 4);
        assert!(items[1].is_flashcard_candidate());
        assert_eq!(items[1].topic, None);
        assert_eq!(items[2].options, None);
        assert_eq!(items[2].correct_option, None);
        assert!(!items[3].is_question_candidate());
        assert_eq!(items[3].question.as_deref(), Some("Q2?"));
    }

    #[test]
    fn test_payload_deserializes_through_serde() {
        let payload: ResponsePayload = serde_json::from_str(r#"[{"response": "R"}]"#).unwrap();
        assert!(matches!(payload, ResponsePayload::Many(ref items) if items.len() == 1));

        assert!(serde_json::from_str::<ResponsePayload>("true").is_err());
    }
}
