//! Configuration structs

mod app_config;

pub use app_config::{
    parse_excluded_fields, validate_date_format, AppConfig, AppSettings, AuditConfig, ConfigError,
    DatabaseConfig, Environment, HistoryConfig, MAX_RECENT_LIMIT,
};
