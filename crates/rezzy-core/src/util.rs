//! Small text and id helpers shared by the chat screens.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Longest message accepted by `validate_message`, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Long-form date, e.g. "June 6, 2025".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Cuts `text` to `max_chars` characters, trims the cut and appends "...".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Millisecond timestamp followed by 9 random base-36 characters.
pub fn generate_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}

/// A message is sendable when it has visible content and is not too long.
pub fn validate_message(message: &str) -> bool {
    !message.trim().is_empty() && message.chars().count() <= MAX_MESSAGE_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2025, 6, 6, 9, 0, 0).unwrap();
        assert_eq!(format_date(&date), "June 6, 2025");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("The patella is a bone", 11), "The patella...");
        assert_eq!(truncate_text("The femur ", 4), "The...");
    }

    #[test]
    fn test_generate_id_is_unique_enough() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(a.len() > 9);
    }

    #[test]
    fn test_validate_message() {
        assert!(validate_message("What is the femur?"));
        assert!(!validate_message("   \n"));
        assert!(validate_message(&"a".repeat(MAX_MESSAGE_CHARS)));
        assert!(!validate_message(&"a".repeat(MAX_MESSAGE_CHARS + 1)));
    }
}
