/// Utility modules
pub mod logging;
pub mod sanitization;
pub mod signature;
pub mod validation;

pub use logging::*;
pub use sanitization::*;
pub use validation::*;
