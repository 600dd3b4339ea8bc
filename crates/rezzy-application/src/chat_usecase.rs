//! Chat use case implementation.
//!
//! `ChatUseCase` owns the message list of one chat screen and coordinates the
//! backend, the session store and the response classifier.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::Stream;
use rezzy_core::chat::{CallSite, ChatMessage, RevealSequence, Separator, classify};
use rezzy_core::error::{Result, RezzyError};
use rezzy_core::session::{SearchSuggestion, SessionStore, SuggestionCategory, normalize};
use rezzy_core::util::{MAX_MESSAGE_CHARS, generate_id, validate_message};
use rezzy_interaction::ChatBackend;
use tokio::sync::RwLock;

const POPULAR_PAGE_SIZE: u32 = 10;
const POPULAR_COUNT: usize = 3;

/// What `resolve_suggestion` did with a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// The suggestion named a popular session, which is now open.
    OpenedSession(String),
    /// The suggestion was sent as a message; holds the bot reply.
    Sent(ChatMessage),
}

#[derive(Debug, Default)]
struct ChatState {
    messages: Vec<ChatMessage>,
    active_session_id: Option<String>,
    popular: Vec<SearchSuggestion>,
}

/// Use case for a single chat conversation.
///
/// # Thread Safety
///
/// State lives behind a `tokio::sync::RwLock`; no lock is held while the
/// backend or the store is awaited.
pub struct ChatUseCase {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn SessionStore>,
    state: RwLock<ChatState>,
    reveal_delay: Duration,
}

impl ChatUseCase {
    pub fn new(backend: Arc<dyn ChatBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            store,
            state: RwLock::new(ChatState::default()),
            reveal_delay: Duration::from_millis(50),
        }
    }

    /// Sets the delay between revealed words.
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Snapshot of the current message list.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.read().await.messages.clone()
    }

    pub async fn last_message(&self) -> Option<ChatMessage> {
        self.state.read().await.messages.last().cloned()
    }

    pub async fn active_session_id(&self) -> Option<String> {
        self.state.read().await.active_session_id.clone()
    }

    /// Picks up the session id persisted by a previous run.
    pub async fn restore(&self) -> Result<Option<String>> {
        let session_id = self.store.get().await?;
        if let Some(id) = &session_id {
            tracing::debug!(session_id = %id, "Restored active chat session");
        }
        self.state.write().await.active_session_id = session_id.clone();
        Ok(session_id)
    }

    /// Sends `text` and appends both sides of the exchange.
    ///
    /// Returns the bot message on success. A rejected message appends
    /// nothing; a failed request appends the static error reply and returns
    /// the underlying error.
    pub async fn send_message(&self, text: &str) -> Result<ChatMessage> {
        if !validate_message(text) {
            return Err(RezzyError::InvalidMessage(format!(
                "message must be non-empty and at most {MAX_MESSAGE_CHARS} characters"
            )));
        }
        let text = text.trim();

        let session_id = {
            let mut state = self.state.write().await;
            state
                .messages
                .push(ChatMessage::user(generate_id(), text, Utc::now()));
            state.active_session_id.clone()
        };

        match self.exchange(text, session_id).await {
            Ok(reply) => {
                self.state.write().await.messages.push(reply.clone());
                Ok(reply)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to send message");
                self.state
                    .write()
                    .await
                    .messages
                    .push(ChatMessage::error_reply(generate_id(), Utc::now()));
                Err(err)
            }
        }
    }

    async fn exchange(&self, text: &str, session_id: Option<String>) -> Result<ChatMessage> {
        let reply = self
            .backend
            .process_query(text, session_id.as_deref())
            .await?;

        if let Some(new_id) = reply.chat_session_id.as_deref() {
            if session_id.as_deref() != Some(new_id) {
                tracing::info!(session_id = %new_id, "Chat session started");
                self.store.set(new_id).await?;
                self.state.write().await.active_session_id = Some(new_id.to_string());
            }
        }

        let classified = classify(
            reply.payload,
            Separator::for_call_site(CallSite::LiveSend),
        );
        Ok(ChatMessage::bot(generate_id(), classified, Utc::now()))
    }

    /// Replays a stored session into the message list and makes it active.
    ///
    /// On failure the current messages and active session stay as they were.
    pub async fn open_session(&self, session_id: &str) -> Result<()> {
        let session = self.backend.session_detail(session_id).await?;
        let messages = normalize(&session)?;
        self.store.set(session_id).await?;

        tracing::info!(session_id, messages = messages.len(), "Opened chat session");

        let mut state = self.state.write().await;
        state.messages = messages;
        state.active_session_id = Some(session_id.to_string());
        Ok(())
    }

    /// Starts over with an empty conversation.
    pub async fn clear_chat(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.messages.clear();
            state.active_session_id = None;
        }
        self.store.clear().await
    }

    /// The three most active sessions as topic suggestions.
    pub async fn popular_sessions(&self) -> Result<Vec<SearchSuggestion>> {
        let mut page = self.backend.list_sessions(1, POPULAR_PAGE_SIZE).await?;
        page.chat_sessions
            .sort_by(|a, b| b.response_count.cmp(&a.response_count));

        let popular: Vec<SearchSuggestion> = page
            .chat_sessions
            .into_iter()
            .take(POPULAR_COUNT)
            .map(|session| {
                SearchSuggestion::new(
                    session.chat_session_id,
                    session.title,
                    SuggestionCategory::Topic,
                )
            })
            .collect();

        self.state.write().await.popular = popular.clone();
        Ok(popular)
    }

    /// Opens the popular session titled `text`, or sends `text` as a message.
    pub async fn resolve_suggestion(&self, text: &str) -> Result<SuggestionOutcome> {
        let session_id = self
            .state
            .read()
            .await
            .popular
            .iter()
            .find(|suggestion| suggestion.text == text)
            .map(|suggestion| suggestion.id.clone());

        match session_id {
            Some(id) => {
                self.open_session(&id).await?;
                Ok(SuggestionOutcome::OpenedSession(id))
            }
            None => self.send_message(text).await.map(SuggestionOutcome::Sent),
        }
    }

    /// Word-by-word reveal of `message`, paced by the configured delay.
    pub fn reveal(&self, message: &ChatMessage) -> impl Stream<Item = String> + Send + use<> {
        RevealSequence::new(&message.text).stream(self.reveal_delay)
    }
}
