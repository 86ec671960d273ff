//! Video rendering stage.
//!
//! A [`Renderer`] turns a prompt into a rendered clip. Rendering is a job:
//! the returned [`RenderArtifact`] reports whether it is still processing,
//! completed (with media and thumbnail locations) or failed.
//!
//! [`SimulatedRenderer`] stands in for a real video model. It waits a fixed
//! delay and hands back synthetic URLs.

mod config;
mod error;
mod simulated;
mod traits;
mod types;

pub use config::{create_renderer, RenderConfig, RenderProvider};
pub use error::RenderError;
pub use simulated::SimulatedRenderer;
pub use traits::Renderer;
pub use types::{RenderArtifact, RenderRequest, RenderState};
