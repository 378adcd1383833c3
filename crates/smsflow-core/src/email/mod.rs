/// Forwarded email rendering
pub mod composer;

pub use composer::{EmailComposer, format_timestamp};
