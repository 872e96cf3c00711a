//! Integration test utilities for the history reconstructor
//!
//! This crate provides in-memory adapters for the store ports and fixtures
//! for running the full service pipeline without a database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
