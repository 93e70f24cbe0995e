use axum::Router;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::api;
use crate::clients::UserClient;
use crate::domain::UserRecord;
use crate::fixtures::generate_users;

use super::{AppError, PortalSettings};

/// Owns the user store actor and the handles that reach it.
///
/// Every client handed out must be dropped before [`PortalSystem::shutdown`]
/// can finish, since the store stops only once its channel closes.
pub struct PortalSystem {
    pub user_client: UserClient,
    /// `/api/...` routes over the store.
    pub api: Router,
    handles: Vec<JoinHandle<()>>,
}

impl PortalSystem {
    /// Starts the store seeded with the fixture dataset described by `settings`.
    pub fn new(settings: &PortalSettings, now: DateTime<Utc>) -> Self {
        let users = generate_users(settings.user_count, settings.seed, now);
        Self::with_users(settings.channel_buffer, users)
    }

    pub fn with_users(buffer: usize, users: Vec<UserRecord>) -> Self {
        info!(count = users.len(), "Seeding user store");
        let (user_actor, user_resource_client) = ResourceActor::new(buffer, users);
        let user_handle = tokio::spawn(user_actor.run());

        let user_client = UserClient::new(user_resource_client);
        let api = api::router(user_client.clone());

        Self {
            user_client,
            api,
            handles: vec![user_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        drop(self.api);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
