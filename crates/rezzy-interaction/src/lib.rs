//! Transport layer for Rezzy.
//!
//! Provides the `ChatBackend` boundary and its implementations: the HTTP
//! client, the offline mock backend and a fallback combinator between them.

pub mod backend;
pub mod fallback_backend;
pub mod http_backend;
pub mod mock_backend;
pub mod mock_data;

use std::sync::Arc;

use rezzy_core::config::ClientConfig;
use rezzy_core::error::Result;

pub use backend::ChatBackend;
pub use fallback_backend::FallbackChatBackend;
pub use http_backend::HttpChatBackend;
pub use mock_backend::MockChatBackend;

/// Builds the backend described by `config`.
///
/// - `use_mock`: mock data only
/// - `fallback_to_mock`: HTTP first, mock data when unreachable
/// - otherwise: HTTP only
pub fn backend_from_config(config: &ClientConfig) -> Result<Arc<dyn ChatBackend>> {
    if config.use_mock {
        tracing::info!("Using mock chat backend");
        return Ok(Arc::new(MockChatBackend::new()));
    }

    let http = Arc::new(HttpChatBackend::from_config(config)?);
    if config.fallback_to_mock {
        Ok(Arc::new(FallbackChatBackend::new(
            http,
            Arc::new(MockChatBackend::new()),
        )))
    } else {
        Ok(http)
    }
}
