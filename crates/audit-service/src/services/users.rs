//! User identity resolution
//!
//! Session markers look like `user-<id>-<slug>`. Anything else (system
//! actors, imports, anonymous sessions) is shown verbatim.

use std::collections::HashMap;

use audit_core::{AuditRecord, RepoResult, UserDirectory};
use tracing::debug;

const USER_PREFIX: &str = "user-";

/// Extract the numeric user id from a `user-<id>-<slug>` marker
pub fn parse_user_id(user_name: &str) -> Option<i64> {
    let rest = user_name.strip_prefix(USER_PREFIX)?;
    let (id, slug) = rest.split_once('-')?;
    if id.is_empty() || slug.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

/// Snapshot of known users for one batch of records
#[derive(Debug, Clone, Default)]
pub struct UserNames {
    known: HashMap<i64, String>,
}

impl UserNames {
    pub fn new(known: HashMap<i64, String>) -> Self {
        Self { known }
    }

    /// Friendly name for a session marker, or the marker unchanged
    pub fn pretty(&self, user_name: &str) -> String {
        parse_user_id(user_name)
            .and_then(|id| self.known.get(&id))
            .map_or_else(|| user_name.to_string(), Clone::clone)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// Loads the user snapshot for a batch, skipping the query when no record
/// carries a user marker
pub struct UserNameResolver<'a> {
    directory: &'a dyn UserDirectory,
}

impl<'a> UserNameResolver<'a> {
    pub fn new(directory: &'a dyn UserDirectory) -> Self {
        Self { directory }
    }

    /// One directory call at most, regardless of batch size
    pub async fn snapshot_for(&self, records: &[AuditRecord]) -> RepoResult<UserNames> {
        let wanted = records
            .iter()
            .filter(|r| parse_user_id(&r.user_name).is_some())
            .count();
        if wanted == 0 {
            return Ok(UserNames::default());
        }

        let known = self.directory.all_known_users().await?;
        debug!(records = wanted, users = known.len(), "Loaded user snapshot");
        Ok(UserNames::new(known))
    }
}
