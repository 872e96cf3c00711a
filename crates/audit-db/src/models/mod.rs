//! Database models - SQLx-compatible structs for PostgreSQL rows

mod display_name;
mod logged_action;

pub use display_name::{DisplayNameModel, UserNameModel};
pub use logged_action::LoggedActionModel;
