//! Client configuration loading.
//!
//! Reads `config.toml` and layers environment overrides on top:
//!
//! | variable | field |
//! |---|---|
//! | `REZZY_API_BASE_URL` | `api_base_url` |
//! | `REZZY_TIMEOUT_SECS` | `timeout_secs` |
//! | `REZZY_USE_MOCK` | `use_mock` |

use std::path::{Path, PathBuf};

use rezzy_core::config::ClientConfig;
use rezzy_core::error::{Result, RezzyError};

use crate::paths::RezzyPaths;

pub const ENV_API_BASE_URL: &str = "REZZY_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "REZZY_TIMEOUT_SECS";
pub const ENV_USE_MOCK: &str = "REZZY_USE_MOCK";

pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default config file (`~/.config/rezzy/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: RezzyPaths::config_file()?,
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file, then applies process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    /// Loads the file only. Missing or empty file gives the defaults.
    pub fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = toml::from_str(&content)?;
        validate(&config)?;
        Ok(config)
    }
}

/// Applies `REZZY_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_BASE_URL) {
        config.api_base_url = url;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.timeout_secs = raw.trim().parse().map_err(|_| {
            RezzyError::config(format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{raw}'"))
        })?;
    }

    if let Some(raw) = lookup(ENV_USE_MOCK) {
        config.use_mock = parse_flag(&raw).ok_or_else(|| {
            RezzyError::config(format!("{ENV_USE_MOCK} must be true/false, got '{raw}'"))
        })?;
    }

    validate(&config)?;
    Ok(config)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate(config: &ClientConfig) -> Result<()> {
    let url = config.api_base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(RezzyError::config(format!(
            "api_base_url must start with http:// or https://, got '{url}'"
        )));
    }
    if config.timeout_secs == 0 {
        return Err(RezzyError::config("timeout_secs must be greater than 0"));
    }
    if config.retry.max_attempts == 0 {
        return Err(RezzyError::config("retry.max_attempts must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load_file().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://api.rezzy.test\"\ntimeout_secs = 10\nuse_mock = true\n",
        )
        .unwrap();

        let config = ConfigService::with_path(path).load_file().unwrap();
        assert_eq!(config.api_base_url, "https://api.rezzy.test");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.use_mock);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = ConfigService::with_path(path).load_file().unwrap_err();
        assert!(matches!(err, RezzyError::Serialization { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(
            ClientConfig::default(),
            env(&[
                (ENV_API_BASE_URL, "https://staging.rezzy.test"),
                (ENV_TIMEOUT_SECS, "5"),
                (ENV_USE_MOCK, "yes"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://staging.rezzy.test");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.use_mock);
    }

    #[test]
    fn test_bad_env_values_are_rejected() {
        let err = apply_env_overrides(ClientConfig::default(), env(&[(ENV_TIMEOUT_SECS, "abc")]))
            .unwrap_err();
        assert!(matches!(err, RezzyError::Config(_)));

        let err = apply_env_overrides(ClientConfig::default(), env(&[(ENV_API_BASE_URL, "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, RezzyError::Config(_)));

        let err = apply_env_overrides(ClientConfig::default(), env(&[(ENV_TIMEOUT_SECS, "0")]))
            .unwrap_err();
        assert!(matches!(err, RezzyError::Config(_)));
    }
}
