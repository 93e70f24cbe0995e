pub mod user;
pub mod session;
pub mod analytics;

pub use user::*;
pub use session::*;
pub use analytics::*;
