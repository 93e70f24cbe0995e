use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use crate::analytics;
use crate::clients::UserClient;
use crate::domain::{RegistrationsDatum, UsersByRoleDatum};
use crate::user_actor::UserError;

/// Read-only aggregates computed over the user store.
#[derive(Clone)]
pub struct AnalyticsClient {
    users: UserClient,
}

impl AnalyticsClient {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    #[instrument(skip(self))]
    pub async fn registrations(&self, now: DateTime<Utc>) -> Result<Vec<RegistrationsDatum>, UserError> {
        debug!("Sending request");
        let users = self.users.fetch_users().await?;
        Ok(analytics::monthly_student_registrations(&users, now))
    }

    #[instrument(skip(self))]
    pub async fn users_by_role(&self) -> Result<Vec<UsersByRoleDatum>, UserError> {
        debug!("Sending request");
        let users = self.users.fetch_users().await?;
        Ok(analytics::users_by_role(&users))
    }
}
