use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and Patches)
// =============================================================================

/// Trait that any record must implement to be served by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    // --- Lifecycle Hooks ---

    /// Validate and apply a partial update.
    ///
    /// The actor applies the patch to a copy and only commits it when this
    /// returns `Ok`, so an implementation may bail out half way.
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
}

/// Failures surfaced by the resource actor or the channel in front of it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Update rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

impl FrameworkError {
    /// HTTP-equivalent status code for this failure.
    pub fn status(&self) -> u16 {
        match self {
            FrameworkError::NotFound(_) => 404,
            FrameworkError::Rejected(_) => 400,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => 503,
        }
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns an ordered collection of entities and serves requests one at a time.
///
/// Records keep the order they were seeded in; updates replace in place.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    items: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, items: Vec<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id().clone(), pos))
            .collect();
        let actor = Self {
            receiver,
            items,
            index,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(items = self.items.len()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    debug!(count = self.items.len(), "Listing items");
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.index.get(&id).map(|&pos| self.items[pos].clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let Some(&pos) = self.index.get(&id) else {
            warn!(id = %id, "Update for unknown item");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut next = self.items[pos].clone();
        if let Err(e) = next.on_update(patch) {
            warn!(id = %id, error = %e, "Update rejected");
            return Err(FrameworkError::Rejected(e));
        }

        self.items[pos] = next.clone();
        debug!(id = %id, "Item updated");
        Ok(next)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::List { respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Get { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Update { id, patch, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterPatch {
        value: Option<u32>,
    }

    impl Entity for Counter {
        type Id = String;
        type Patch = CounterPatch;

        fn id(&self) -> &String { &self.id }

        fn on_update(&mut self, patch: CounterPatch) -> Result<(), String> {
            self.value = 0;
            match patch.value {
                Some(value) if value > 0 => {
                    self.value = value;
                    Ok(())
                }
                _ => Err("value must be positive".to_string()),
            }
        }
    }

    fn counter(id: &str, value: u32) -> Counter {
        Counter { id: id.to_string(), value }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_list_preserves_seed_order() {
        let (actor, client) = ResourceActor::new(10, vec![counter("b", 1), counter("a", 2), counter("c", 3)]);
        tokio::spawn(actor.run());

        let ids: Vec<String> = client.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (actor, client) = ResourceActor::new(10, vec![counter("a", 1), counter("b", 2)]);
        tokio::spawn(actor.run());

        let updated = client.update("a".to_string(), CounterPatch { value: Some(9) }).await.unwrap();
        assert_eq!(updated, counter("a", 9));

        let all = client.list().await.unwrap();
        assert_eq!(all, vec![counter("a", 9), counter("b", 2)]);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_item_untouched() {
        let (actor, client) = ResourceActor::new(10, vec![counter("a", 5)]);
        tokio::spawn(actor.run());

        let err = client.update("a".to_string(), CounterPatch { value: None }).await.unwrap_err();
        assert_eq!(err.status(), 400);

        let item = client.get("a".to_string()).await.unwrap().unwrap();
        assert_eq!(item.value, 5);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (actor, client) = ResourceActor::new(10, vec![counter("a", 5)]);
        tokio::spawn(actor.run());

        let err = client.update("zz".to_string(), CounterPatch { value: Some(1) }).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("zz".to_string()));
        assert_eq!(err.status(), 404);
        assert_eq!(client.get("zz".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_unavailable() {
        let (actor, client) = ResourceActor::<Counter>::new(10, Vec::new());
        drop(actor);

        let err = client.list().await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
        assert_eq!(err.status(), 503);
    }
}
