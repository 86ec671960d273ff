pub mod api;
pub mod metrics;
pub mod shutdown;
pub mod state;
