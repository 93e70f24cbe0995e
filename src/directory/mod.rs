//! The directory page core: filter, sort and page the cached user list,
//! track the selection, and push bulk changes back to the store.

pub mod bulk;
pub mod cache;
pub mod controller;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod selection;

use thiserror::Error;

use crate::user_actor::UserError;

pub use bulk::{BulkOutcome, BulkUpdateCoordinator};
pub use cache::UserCache;
pub use controller::{DirectoryController, LoadState};
pub use filter::{FilterState, RoleFilter, Sort, SortDirection, SortKey, StatusFilter};
pub use selection::SelectionSet;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("Only admins can change users")]
    Forbidden,
    #[error("Unsupported page size: {0}")]
    InvalidPageSize(usize),
    #[error(transparent)]
    User(#[from] UserError),
}
