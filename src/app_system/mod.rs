//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod portal_system;
pub mod settings;
pub mod tracing;

pub use self::error::*;
pub use self::portal_system::*;
pub use self::settings::*;
pub use self::tracing::*;
