//! Plugin admin list resolution.
//!
//! # Responsibilities
//! - Split the raw `pluginadmins` field into user ids
//! - Validate every id against the user directory
//! - Record the ids that could not be validated
//!
//! # Design Decisions
//! - Never fails: an all-invalid list yields an empty set, leaving only the
//!   system admin in control
//! - No state carried between calls; the set is rebuilt from scratch

use std::collections::HashSet;

use crate::host::UserDirectory;
use crate::observability::metrics;

/// An id from the raw list that could not be validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminFailure {
    pub user_id: String,
    pub error: String,
}

/// Outcome of resolving a raw admin list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminResolution {
    pub admins: HashSet<String>,
    pub failures: Vec<AdminFailure>,
}

/// Resolve a comma-separated list of user ids into the set of valid ones.
pub async fn resolve_admin_list<D>(raw: &str, directory: &D) -> AdminResolution
where
    D: UserDirectory + ?Sized,
{
    let mut resolution = AdminResolution::default();

    let user_ids = raw.split(',').map(str::trim).filter(|id| !id.is_empty());
    for user_id in user_ids {
        match directory.get_user(user_id).await {
            Ok(_) => {
                resolution.admins.insert(user_id.to_string());
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Error occurred while verifying plugin admin user id"
                );
                metrics::record_admin_lookup_failure();
                resolution.failures.push(AdminFailure {
                    user_id: user_id.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    resolution
}
