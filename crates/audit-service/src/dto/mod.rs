//! Data transfer objects for history requests and responses
//!
//! This module provides:
//! - Request DTOs with validation
//! - Response DTOs for serializing reconstructed history
//! - Mappers for converting domain changes to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{HistoryRequest, RecentChangesRequest, MAX_RECENT_LIMIT};
pub use responses::{
    ChangeResponse, FieldChangeResponse, HistoryLinkResponse, HistoryResponse,
    RecentChangesResponse,
};
