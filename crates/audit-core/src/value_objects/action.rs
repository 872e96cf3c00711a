//! Audit action kind

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of row-level change captured by the audit trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
    Truncate,
}

impl AuditAction {
    /// Single-letter code written by the trigger (`I`, `U`, `D`, `T`)
    pub fn code(self) -> &'static str {
        match self {
            Self::Insert => "I",
            Self::Update => "U",
            Self::Delete => "D",
            Self::Truncate => "T",
        }
    }

    /// Spelled-out name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
        }
    }

    /// Verb used when rendering change descriptions
    pub fn description_prefix(self) -> &'static str {
        match self {
            Self::Insert => "Initial value",
            Self::Update => "New value",
            Self::Delete | Self::Truncate => "Final value",
        }
    }

    /// Whether the record carries a full row snapshot rather than a diff
    #[inline]
    pub fn has_full_row(self) -> bool {
        !matches!(self, Self::Update)
    }
}

/// Error when parsing an unknown action code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audit action: {0}")]
pub struct ActionParseError(pub String);

impl FromStr for AuditAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "INSERT" => Ok(Self::Insert),
            "U" | "UPDATE" => Ok(Self::Update),
            "D" | "DELETE" => Ok(Self::Delete),
            "T" | "TRUNCATE" => Ok(Self::Truncate),
            _ => Err(ActionParseError(s.to_string())),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
