//! Publishing stage.
//!
//! A [`Publisher`] uploads a rendered clip with its metadata and returns the
//! public location. [`SimulatedPublisher`] fabricates YouTube-style ids and
//! URLs without contacting any platform.

mod config;
mod error;
mod simulated;
mod traits;
mod types;

pub use config::{create_publisher, PublishConfig, PublishProvider};
pub use error::PublishError;
pub use simulated::SimulatedPublisher;
pub use traits::Publisher;
pub use types::{PublishArtifact, PublishRequest, Visibility, DEFAULT_CATEGORY_ID, MAX_TITLE_CHARS};
