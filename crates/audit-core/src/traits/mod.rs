//! Repository traits (ports)

mod repositories;

pub use repositories::{AuditStore, EntityLookup, RepoResult, UserDirectory};
