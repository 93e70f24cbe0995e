use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur while talking to the user store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("Failed to load users ({status})")]
    LoadFailed { status: u16 },
    #[error("Failed to update user {id} ({status})")]
    UpdateFailed { id: String, status: u16 },
    #[error("User load cancelled")]
    Cancelled,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    /// HTTP-equivalent status carried by the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            UserError::LoadFailed { status } | UserError::UpdateFailed { status, .. } => Some(*status),
            UserError::Cancelled => None,
            UserError::ActorCommunicationError(_) => Some(503),
        }
    }
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        UserError::ActorCommunicationError(e.to_string())
    }
}
