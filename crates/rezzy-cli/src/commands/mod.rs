pub mod chat;
pub mod health;
pub mod quiz;
pub mod sessions;
pub mod study;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rezzy_application::ChatUseCase;
use rezzy_core::config::ClientConfig;
use rezzy_core::session::SessionStore;
use rezzy_infrastructure::{ConfigService, FileSessionStore};
use rezzy_interaction::{ChatBackend, backend_from_config};

/// Everything a command needs, built once from config.
pub struct AppContext {
    pub config: ClientConfig,
    pub backend: Arc<dyn ChatBackend>,
    pub store: Arc<dyn SessionStore>,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, force_mock: bool) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to locate config directory")?,
        };
        let mut config = service
            .load()
            .with_context(|| format!("Failed to load config from {}", service.path().display()))?;
        if force_mock {
            config.use_mock = true;
        }
        tracing::info!(
            api_base_url = %config.api_base_url,
            use_mock = config.use_mock,
            "Loaded configuration"
        );

        let backend = backend_from_config(&config)?;
        let store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new().context("Failed to locate session file")?);

        Ok(Self {
            config,
            backend,
            store,
        })
    }

    /// A chat use case resumed from the stored session id.
    pub async fn chat(&self) -> Result<ChatUseCase> {
        let chat = ChatUseCase::new(self.backend.clone(), self.store.clone())
            .with_reveal_delay(self.config.reveal_delay());
        chat.restore().await?;
        Ok(chat)
    }
}
