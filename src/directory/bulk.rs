use tracing::{error, info, instrument};

use crate::clients::UserClient;
use crate::domain::{UserPatch, UserRecord};
use crate::user_actor::UserError;

use super::cache::UserCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    pub updated: usize,
}

/// Applies one patch to many users through the single-record update.
///
/// Updates run one after another in list order, each awaited before the next
/// is sent. The first failure stops the batch; updates already committed stay
/// committed and stay patched into the cache.
#[derive(Clone)]
pub struct BulkUpdateCoordinator {
    users: UserClient,
}

impl BulkUpdateCoordinator {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// Updates one user and patches the cached copy on success. On failure
    /// the cache is left untouched.
    #[instrument(skip(self, cache))]
    pub async fn update_one(&self, cache: &mut UserCache, id: &str, patch: UserPatch) -> Result<UserRecord, UserError> {
        let updated = self.users.update_user(id.to_string(), patch).await?;
        cache.patch(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self, cache, ids), fields(batch = ids.len()))]
    pub async fn apply(&self, cache: &mut UserCache, ids: &[String], patch: &UserPatch) -> Result<BulkOutcome, UserError> {
        for (committed, id) in ids.iter().enumerate() {
            if let Err(e) = self.update_one(cache, id, patch.clone()).await {
                error!(user_id = %id, committed, error = %e, "Bulk update aborted");
                return Err(e);
            }
        }

        info!(updated = ids.len(), "Bulk update complete");
        Ok(BulkOutcome { updated: ids.len() })
    }
}
