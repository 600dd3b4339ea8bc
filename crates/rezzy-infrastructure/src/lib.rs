//! Infrastructure layer for Rezzy: platform paths, configuration loading and
//! `SessionStore` implementations.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::RezzyPaths;
pub use crate::storage::{FileSessionStore, InMemorySessionStore};
