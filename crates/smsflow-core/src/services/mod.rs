/// Service layer: provider clients, media, metrics and the dispatcher
pub mod config;
pub mod mailgun;
pub mod media;
pub mod metrics;
pub mod relay;
pub mod telnyx;

pub use config::*;
pub use mailgun::*;
pub use media::*;
pub use metrics::*;
pub use relay::*;
pub use telnyx::*;
