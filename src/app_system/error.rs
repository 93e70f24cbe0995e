use thiserror::Error;

use crate::directory::DirectoryError;
use crate::session::SessionError;
use crate::user_actor::UserError;

/// Top-level failure of the portal binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("User store error: {0}")]
    User(#[from] UserError),
    #[error("Request error: {0}")]
    Request(#[from] axum::http::Error),
    #[error("Response body error: {0}")]
    Body(#[from] axum::Error),
    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
