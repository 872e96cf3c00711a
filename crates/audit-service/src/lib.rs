//! # audit-service
//!
//! Application layer: turns audit log rows into human-readable history.

pub mod dto;
pub mod services;

pub use services::{
    reconstruct_history, DateFormats, FormatterRegistry, HistoryService, SchemaRegistry,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserNames,
    VisibilityPolicy,
};
