//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::env;

/// Upper bound of the recent-activity window
pub const MAX_RECENT_LIMIT: i64 = 1000;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub audit: AuditConfig,
    pub history: HistoryConfig,
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
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Where the audit trigger writes and where acting users live
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_audit_table")]
    pub table: String,
    #[serde(default = "default_users_table")]
    pub users_table: String,
    #[serde(default = "default_users_name_column")]
    pub users_name_column: String,
}

/// History rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// chrono format string for date fields
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// chrono format string for datetime fields
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    /// Entity type -> fields never shown in history
    #[serde(default)]
    pub excluded_fields: BTreeMap<String, BTreeSet<String>>,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            datetime_format: default_datetime_format(),
            excluded_fields: BTreeMap::new(),
            recent_limit: default_recent_limit(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "audit-history".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_audit_table() -> String {
    "audit_logged_actions".to_string()
}

fn default_users_table() -> String {
    "accounts_user".to_string()
}

fn default_users_name_column() -> String {
    "_full_name".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_datetime_format() -> String {
    "%d.%m.%Y %H:%M".to_string()
}

fn default_recent_limit() -> i64 {
    50
}

/// Check that a chrono format string has no unknown or dangling specifiers
///
/// # Errors
/// Returns `ConfigError::InvalidValue` naming `key` when chrono cannot render `format`.
pub fn validate_date_format(key: &'static str, format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidValue(key, format.to_string()));
    }
    Ok(())
}

/// Parse `Entity.field` pairs separated by commas
///
/// # Errors
/// Returns `ConfigError::InvalidValue` for items without exactly one dot.
pub fn parse_excluded_fields(
    raw: &str,
) -> Result<BTreeMap<String, BTreeSet<String>>, ConfigError> {
    let mut excluded: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match item.split_once('.') {
            Some((entity, field))
                if !entity.is_empty() && !field.is_empty() && !field.contains('.') =>
            {
                excluded
                    .entry(entity.to_string())
                    .or_default()
                    .insert(field.to_string());
            }
            _ => {
                return Err(ConfigError::InvalidValue(
                    "HISTORY_EXCLUDED_FIELDS",
                    item.to_string(),
                ))
            }
        }
    }

    Ok(excluded)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| -> Result<Option<i64>, ConfigError> {
            var(key)
                .map(|s| {
                    s.trim()
                        .parse::<i64>()
                        .map_err(|_| ConfigError::InvalidValue(key, s.clone()))
                })
                .transpose()
        };

        let recent_limit = parsed("HISTORY_RECENT_LIMIT")?.unwrap_or_else(default_recent_limit);
        if !(1..=MAX_RECENT_LIMIT).contains(&recent_limit) {
            return Err(ConfigError::InvalidValue(
                "HISTORY_RECENT_LIMIT",
                recent_limit.to_string(),
            ));
        }

        let date_format = var("HISTORY_DATE_FORMAT").unwrap_or_else(default_date_format);
        validate_date_format("HISTORY_DATE_FORMAT", &date_format)?;
        let datetime_format =
            var("HISTORY_DATETIME_FORMAT").unwrap_or_else(default_datetime_format);
        validate_date_format("HISTORY_DATETIME_FORMAT", &datetime_format)?;

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: var("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: var("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            audit: AuditConfig {
                table: var("AUDIT_TABLE").unwrap_or_else(default_audit_table),
                users_table: var("USERS_TABLE").unwrap_or_else(default_users_table),
                users_name_column: var("USERS_NAME_COLUMN")
                    .unwrap_or_else(default_users_name_column),
            },
            history: HistoryConfig {
                date_format,
                datetime_format,
                excluded_fields: var("HISTORY_EXCLUDED_FIELDS")
                    .map(|s| parse_excluded_fields(&s))
                    .transpose()?
                    .unwrap_or_default(),
                recent_limit,
            },
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
