//! Unified path management for rezzy configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/rezzy/             # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── session.json             # Active chat session id
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for rezzy_core::RezzyError {
    fn from(err: PathError) -> Self {
        rezzy_core::RezzyError::config(err.to_string())
    }
}

pub struct RezzyPaths;

impl RezzyPaths {
    const APP_DIR: &'static str = "rezzy";

    /// Returns the rezzy configuration directory (e.g. `~/.config/rezzy/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored session id.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_config_dir() {
        // Skip on machines without a resolvable config directory.
        let Ok(dir) = RezzyPaths::config_dir() else {
            return;
        };
        assert!(dir.ends_with("rezzy"));
        assert_eq!(RezzyPaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(RezzyPaths::session_file().unwrap(), dir.join("session.json"));
    }
}
