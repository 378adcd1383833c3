/// smsflow Core - SMS/MMS webhook relay library
///
/// This crate contains the event models, phone number normalization, route
/// resolution, provider clients and the dispatcher used by the smsflow
/// webhook Lambda function.
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod routing;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::RelayError;
pub use services::relay::{Outcome, Relay};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
