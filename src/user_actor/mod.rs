//! User-specific store logic: patch validation and error types.

pub mod entity;
pub mod error;

pub use error::*;
