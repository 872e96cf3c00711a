//! SQL identifier handling
//!
//! Table and column names come from configuration and cannot be bound as
//! parameters, so they are checked and quoted before being spliced in.

use audit_core::error::DomainError;

/// A checked, quoted SQL identifier, optionally schema-qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    /// Parse `name` or `schema.name`
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.is_empty() || parts.len() > 2 || !parts.iter().all(|p| is_plain_identifier(p)) {
            return Err(DomainError::ValidationError(format!(
                "invalid SQL identifier: {raw:?}"
            )));
        }

        let quoted = parts
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(".");
        Ok(Self(quoted))
    }

    /// Quote a built-in plain name without checking it
    pub(crate) fn builtin(name: &'static str) -> Self {
        debug_assert!(is_plain_identifier(name));
        Self(format!("\"{name}\""))
    }

    /// The quoted form, safe to splice into SQL
    pub fn as_sql(&self) -> &str {
        &self.0
    }
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
