//! Value objects - immutable types that represent domain concepts

mod action;
mod event_id;

pub use action::{ActionParseError, AuditAction};
pub use event_id::{EventId, EventIdParseError};
