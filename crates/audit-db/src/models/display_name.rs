//! Minimal rows used for display-string resolution

use sqlx::FromRow;

/// Identifier and display string of a referenced row
#[derive(Debug, Clone, FromRow)]
pub struct DisplayNameModel {
    pub id: String,
    pub display: Option<String>,
}

/// User id and display name
#[derive(Debug, Clone, FromRow)]
pub struct UserNameModel {
    pub id: i64,
    pub name: Option<String>,
}
