//! File-backed session id store.
//!
//! Keeps the active chat session id in `~/.config/rezzy/session.json`:
//!
//! ```json
//! { "chat_session_id": "..." }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rezzy_core::error::{Result, RezzyError};
use rezzy_core::session::SessionStore;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::paths::RezzyPaths;

#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    chat_session_id: String,
}

/// Storage for the active session id.
///
/// Responsibilities:
/// - Read/write the session document
/// - Atomic replace on write (tmp file + rename)
/// - Treat a missing file as "no session"
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at the default path (`~/.config/rezzy/session.json`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: RezzyPaths::session_file()?,
        })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let document: SessionDocument = serde_json::from_str(&content).map_err(|err| {
            RezzyError::storage(format!(
                "Corrupt session file {}: {err}",
                self.path.display()
            ))
        })?;

        Ok(Some(document.chat_session_id).filter(|id| !id.is_empty()))
    }

    async fn set(&self, session_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let document = SessionDocument {
            chat_session_id: session_id.to_string(),
        };
        let content = serde_json::to_string_pretty(&document)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "Stored chat session id");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
