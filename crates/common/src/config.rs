//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Subscription configuration.
    #[serde(default)]
    pub subscription: SubscriptionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Creator id of the signed-in viewer.
    #[serde(default = "default_current_user_id")]
    pub current_user_id: u64,
    /// JSON fixture file replacing the built-in fixtures.
    #[serde(default)]
    pub fixtures_path: Option<PathBuf>,
    /// JSON action script replayed after seeding.
    #[serde(default)]
    pub replay_path: Option<PathBuf>,
}

/// Which posts lose their pin when another post is pinned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinScope {
    /// Only the same creator's posts.
    #[default]
    Creator,
    /// Every post in the session.
    Global,
}

/// Feed configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedConfig {
    /// Unpin scope applied by `pin_post`.
    #[serde(default)]
    pub pin_scope: PinScope,
}

/// Subscription configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionConfig {
    /// Days between subscribing and the renewal date.
    #[serde(default = "default_renewal_days")]
    pub renewal_days: u32,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

const fn default_current_user_id() -> u64 {
    1
}

const fn default_renewal_days() -> u32 {
    30
}

fn default_log_level() -> String {
    "fanvault=info".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            current_user_id: default_current_user_id(),
            fixtures_path: None,
            replay_path: None,
        }
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            renewal_days: default_renewal_days(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `FANVAULT_ENV`)
    /// 4. Environment variables with `FANVAULT__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("FANVAULT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FANVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FANVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
