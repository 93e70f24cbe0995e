use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, Instrument};

use crate::clients::UserClient;
use crate::domain::UserRecord;
use crate::user_actor::UserError;

/// Runs the user list fetch as its own task so a stale fetch can be
/// abandoned when a new one starts or the directory goes away.
pub struct DirectoryLoader {
    users: UserClient,
    in_flight: Option<AbortHandle>,
}

impl DirectoryLoader {
    pub fn new(users: UserClient) -> Self {
        Self {
            users,
            in_flight: None,
        }
    }

    /// Starts a fetch, aborting the previous one if it is still running.
    pub fn begin(&mut self) -> PendingLoad {
        self.cancel();
        let users = self.users.clone();
        let handle = tokio::spawn(async move { users.fetch_users().await }.in_current_span());
        self.in_flight = Some(handle.abort_handle());
        PendingLoad { handle }
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Aborting stale user load");
            }
            previous.abort();
        }
    }
}

impl Drop for DirectoryLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A fetch in progress. Dropping it aborts the fetch.
pub struct PendingLoad {
    handle: JoinHandle<Result<Vec<UserRecord>, UserError>>,
}

impl PendingLoad {
    pub async fn wait(mut self) -> Result<Vec<UserRecord>, UserError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(UserError::Cancelled),
            Err(e) => Err(UserError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl Drop for PendingLoad {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
