//! Types for trending content discovery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while fetching candidates.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The upstream source could not be read.
    #[error("discovery source unavailable: {0}")]
    SourceUnavailable(String),

    /// The upstream source returned data we could not understand.
    #[error("invalid discovery data: {0}")]
    InvalidData(String),
}

/// A trending item eligible for pipeline processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Video title.
    pub title: String,
    /// Channel that published the source video.
    pub channel: String,
    /// Popularity figure as reported by the source (e.g. "2.5M").
    pub views: String,
    /// Link to the source video.
    pub url: String,
    /// Free-text description.
    pub description: String,
    /// Category tag (e.g. "Technology").
    pub category: String,
}

/// A source of trending candidates.
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Name of this discovery source for logging.
    fn name(&self) -> &str;

    /// Fetch the current candidate list, most relevant first.
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, DiscoveryError>;
}

/// Returns the most frequent category among the candidates.
///
/// Ties go to the category that appears first in the list.
pub fn top_category(candidates: &[Candidate]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, candidate) in candidates.iter().enumerate() {
        counts
            .entry(candidate.category.as_str())
            .or_insert((0, position))
            .0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(category, _)| category.to_string())
}
