//! # configs
//!
//! Layered runtime configuration: optional `campus-connect.toml` file,
//! then `CAMPUS__`-prefixed environment variables (with `.env` loaded
//! first). All settings have defaults so the binary starts with zero
//! configuration for local development.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Top-level settings for the CampusConnect core.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub identity: IdentitySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber` env-filter directive.
    /// Env: `CAMPUS__LOG__FILTER`. Default: `info`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// How many times a conflicted vote transaction is re-attempted.
    /// Env: `CAMPUS__STORE__VOTE_RETRY_LIMIT`. Default: 3.
    #[serde(default = "default_retry_limit")]
    pub vote_retry_limit: u32,

    /// How many times a conflicted registration transaction is
    /// re-attempted. Env: `CAMPUS__STORE__REGISTRATION_RETRY_LIMIT`.
    /// Default: 3.
    #[serde(default = "default_retry_limit")]
    pub registration_retry_limit: u32,

    /// Seed demo content on startup.
    /// Env: `CAMPUS__STORE__SEED_DEMO_DATA`. Default: true.
    #[serde(default = "default_seed")]
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentitySettings {
    /// Server-side API key for the third-party identity service. Optional;
    /// the core only receives already-resolved viewer profiles, but the
    /// deployment that resolves them needs this.
    /// Env: `CAMPUS__IDENTITY__API_KEY`.
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_retry_limit() -> u32 {
    3
}

fn default_seed() -> bool {
    true
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            vote_retry_limit: default_retry_limit(),
            registration_retry_limit: default_retry_limit(),
            seed_demo_data: default_seed(),
        }
    }
}

impl Settings {
    /// Loads settings from `campus-connect.toml` (if present) and the
    /// environment. Later layers win.
    pub fn load() -> Result<Self, ConfigsError> {
        // .env is a convenience for local runs; missing is fine.
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("campus-connect").required(false))
            .add_source(Environment::with_prefix("CAMPUS").separator("__"))
            .build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            vote_retry_limit = settings.store.vote_retry_limit,
            registration_retry_limit = settings.store.registration_retry_limit,
            "settings loaded"
        );
        Ok(settings)
    }
}
