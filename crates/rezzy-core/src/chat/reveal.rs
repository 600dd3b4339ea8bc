//! Word-by-word reveal of a finished bot answer.
//!
//! The answer is already complete when it arrives; this only replays it as a
//! growing prefix so the UI can animate typing.

use std::time::Duration;

use futures::{Stream, StreamExt, stream};

/// Precomputed prefixes of a text, one word longer each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSequence {
    prefixes: Vec<String>,
}

impl RevealSequence {
    /// Splits on single spaces. Empty text yields one empty prefix.
    pub fn new(text: &str) -> Self {
        let words: Vec<&str> = text.split(' ').collect();
        let prefixes = (1..=words.len())
            .map(|count| words[..count].join(" "))
            .collect();
        Self { prefixes }
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// The full text, i.e. the last prefix.
    pub fn full_text(&self) -> &str {
        self.prefixes.last().map(String::as_str).unwrap_or("")
    }

    /// Yields each prefix after waiting `delay`.
    ///
    /// Every call starts over from the first word.
    pub fn stream(&self, delay: Duration) -> impl Stream<Item = String> + Send + use<> {
        stream::iter(self.prefixes.clone()).then(move |prefix| async move {
            tokio::time::sleep(delay).await;
            prefix
        })
    }
}
