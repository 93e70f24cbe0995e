//! Mock sign-in: the session context, its persistence port, and the
//! permissions derived from the signed-in role.

pub mod context;
pub mod permissions;
pub mod store;

use thiserror::Error;

pub use context::*;
pub use permissions::*;
pub use store::{FileSessionStore, LenientStore, MemorySessionStore, SessionStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session marker encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}
