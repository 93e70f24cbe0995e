//! Typed handles over the resource actors.

#[macro_use]
mod macros;

pub mod user_client;
pub mod analytics_client;

pub use user_client::UserClient;
pub use analytics_client::AnalyticsClient;
