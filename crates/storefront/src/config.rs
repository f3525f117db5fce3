//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PAHNAWA_FIRESTORE_PROJECT_ID` - Firestore project identifier
//! - `PAHNAWA_FIRESTORE_API_KEY` - Web API key passed on every request
//!
//! ## Optional
//! - `PAHNAWA_FIRESTORE_DATABASE` - Database name (default: `(default)`)
//! - `PAHNAWA_SEARCH_CACHE_LIMIT` - Cap on products fetched for popup
//!   search contexts (default: 100)
//! - `PAHNAWA_SNAPSHOT_DIR` - Directory for persisted cart/favorites
//!   snapshots (default: `.pahnawa`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default cap on the ad-hoc search catalog fetch.
pub const DEFAULT_SEARCH_CACHE_LIMIT: u32 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct PahnawaConfig {
    /// Remote document store configuration.
    pub firestore: FirestoreConfig,
    /// Cap on products fetched for popup/compact search contexts. The full
    /// shop listing is unbounded.
    pub search_cache_limit: u32,
    /// Directory holding persisted cart/favorites snapshots.
    pub snapshot_dir: PathBuf,
}

/// Firestore REST API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct FirestoreConfig {
    /// Project identifier (e.g., `pahnawa-banaras`).
    pub project_id: String,
    /// Database name within the project.
    pub database: String,
    /// Web API key sent as a query parameter on every request.
    pub api_key: SecretString,
}

impl std::fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl PahnawaConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let firestore = FirestoreConfig::from_env()?;

        let search_cache_limit = get_env_or_default(
            "PAHNAWA_SEARCH_CACHE_LIMIT",
            &DEFAULT_SEARCH_CACHE_LIMIT.to_string(),
        )
        .parse::<u32>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("PAHNAWA_SEARCH_CACHE_LIMIT".to_string(), e.to_string())
        })?;

        let snapshot_dir = PathBuf::from(get_env_or_default("PAHNAWA_SNAPSHOT_DIR", ".pahnawa"));

        Ok(Self {
            firestore,
            search_cache_limit,
            snapshot_dir,
        })
    }
}

impl FirestoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            project_id: get_required_env("PAHNAWA_FIRESTORE_PROJECT_ID")?,
            database: get_env_or_default("PAHNAWA_FIRESTORE_DATABASE", "(default)"),
            api_key: SecretString::from(get_required_env("PAHNAWA_FIRESTORE_API_KEY")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_firestore_config_debug_redacts_api_key() {
        let config = FirestoreConfig {
            project_id: "pahnawa-test".to_string(),
            database: "(default)".to_string(),
            api_key: SecretString::from("AIzaSyTestKeyValue"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("pahnawa-test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("AIzaSyTestKeyValue"));
    }

    #[test]
    fn test_get_env_or_default_uses_default_when_unset() {
        assert_eq!(
            get_env_or_default("PAHNAWA_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }
}
