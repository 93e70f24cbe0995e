//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_list`] or [`expect_update`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

pub type Responder<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a `ResourceActor`, the test owns the receiving end
/// of the channel. Each request the code under test sends shows up there and
/// stays pending until the test answers it, so request order, payloads and
/// failures can all be controlled deterministically.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UserClient;
    use crate::domain::{Role, Status, UserPatch, UserRecord};
    use crate::user_actor::UserError;
    use chrono::Utc;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<UserRecord>(10);
        let client = UserClient::new(inner);

        let update_task = tokio::spawn(async move {
            client.update_user("4".to_string(), UserPatch::status(Status::Archived)).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, "4");
        assert_eq!(patch.status, Some(Status::Archived));
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Err(UserError::UpdateFailed { id: "4".to_string(), status: 404 }));
    }

    #[tokio::test]
    async fn test_mock_get() {
        let (inner, mut receiver) = create_mock_client::<UserRecord>(10);
        let client = UserClient::new(inner);

        let get_task = tokio::spawn(async move { client.get_user("8".to_string()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        let user = UserRecord::new(id, "Nancy", "Wheeler", "nancy.wheeler@northridge.edu", vec![Role::Staff], Status::Active, Utc::now());
        responder.send(Ok(Some(user.clone()))).unwrap();

        assert_eq!(get_task.await.unwrap(), Ok(Some(user)));
    }
}
