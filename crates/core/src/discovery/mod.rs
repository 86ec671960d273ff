//! Trending content discovery.
//!
//! Discovery supplies the ordered list of candidates a pipeline run works
//! through. The bundled [`StaticTrendingDiscovery`] serves a fixed list of
//! trending videos; other sources plug in through the [`Discovery`] trait.

mod static_list;
mod types;

pub use static_list::StaticTrendingDiscovery;
pub use types::{top_category, Candidate, Discovery, DiscoveryError};
