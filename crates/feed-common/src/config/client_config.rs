//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub user: UserConfig,
    pub reactions: ReactionsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Feed service credentials and request settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub api_key: String,
    pub app_id: String,
    /// Region the app is hosted in (e.g. "us-east"); `None` uses the default
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The authenticated user the SDK acts for
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub id: String,
}

/// Reaction enrichment settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionsConfig {
    /// How many latest reactions per kind to request on enriched reads
    #[serde(default = "default_latest_reactions_limit")]
    pub latest_limit: u32,
}

// Default value functions
fn default_app_name() -> String {
    "feed-client".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_timeout_secs() -> u64 {
    3
}

fn default_latest_reactions_limit() -> u32 {
    5
}

impl ClientConfig {
    /// Build a configuration in code with defaults for everything optional
    pub fn new(api_key: impl Into<String>, app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            api: ApiConfig {
                api_key: api_key.into(),
                app_id: app_id.into(),
                location: None,
                timeout_secs: default_timeout_secs(),
            },
            user: UserConfig { id: user_id.into() },
            reactions: ReactionsConfig {
                latest_limit: default_latest_reactions_limit(),
            },
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|raw| {
                    raw.parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, raw))
                })
                .transpose()
        };

        let env = match lookup("FEED_ENV") {
            Some(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("FEED_ENV", raw))?,
            None => Environment::default(),
        };

        let latest_limit = match parsed("FEED_LATEST_REACTIONS_LIMIT")? {
            Some(limit) => u32::try_from(limit).map_err(|_| {
                ConfigError::InvalidValue("FEED_LATEST_REACTIONS_LIMIT", limit.to_string())
            })?,
            None => default_latest_reactions_limit(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("FEED_APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ApiConfig {
                api_key: required("FEED_API_KEY")?,
                app_id: required("FEED_APP_ID")?,
                location: lookup("FEED_LOCATION").filter(|s| !s.is_empty()),
                timeout_secs: parsed("FEED_TIMEOUT_SECS")?.unwrap_or_else(default_timeout_secs),
            },
            user: UserConfig {
                id: required("FEED_USER_ID")?,
            },
            reactions: ReactionsConfig { latest_limit },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
