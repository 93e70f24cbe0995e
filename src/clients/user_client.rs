use tracing::{debug, instrument};
use crate::domain::{UserPatch, UserRecord};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the user store.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<UserRecord>,
}

impl_basic_client!(UserClient, UserRecord, UserError, user);

impl UserClient {
    /// Fetches every user in store order.
    #[instrument(skip(self))]
    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, UserError> {
        debug!("Sending request");
        self.inner.list().await.map_err(|e| UserError::LoadFailed { status: e.status() })
    }

    /// Partially updates one user and returns the stored result.
    #[instrument(skip(self))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        self.inner
            .update(id.clone(), patch)
            .await
            .map_err(|e| UserError::UpdateFailed { id, status: e.status() })
    }
}
