//! Model to entity mappers
//!
//! This module provides conversions from database models to domain entities (audit-core).

mod logged_action;

pub use logged_action::{json_to_row_values, UNKNOWN_USER};
