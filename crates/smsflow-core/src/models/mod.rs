/// Data models
pub mod config;
pub mod events;
pub(crate) mod lenient;
pub mod messages;
pub mod route;

pub use config::*;
pub use events::*;
pub use messages::*;
pub use route::*;
