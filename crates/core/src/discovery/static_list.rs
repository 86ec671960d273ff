//! Fixed trending list used until a live trending feed is wired in.

use async_trait::async_trait;

use super::types::{Candidate, Discovery, DiscoveryError};

/// Discovery source backed by an in-memory list.
#[derive(Debug, Clone)]
pub struct StaticTrendingDiscovery {
    candidates: Vec<Candidate>,
}

impl Default for StaticTrendingDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticTrendingDiscovery {
    /// Create a discovery source serving the built-in trending list.
    pub fn new() -> Self {
        Self {
            candidates: default_trending(),
        }
    }

    /// Create a discovery source serving the given list in order.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl Discovery for StaticTrendingDiscovery {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, DiscoveryError> {
        Ok(self.candidates.clone())
    }
}

fn entry(
    title: &str,
    channel: &str,
    views: &str,
    video: &str,
    description: &str,
    category: &str,
) -> Candidate {
    Candidate {
        title: title.to_string(),
        channel: channel.to_string(),
        views: views.to_string(),
        url: format!("https://youtube.com/watch?v={}", video),
        description: description.to_string(),
        category: category.to_string(),
    }
}

fn default_trending() -> Vec<Candidate> {
    vec![
        entry(
            "AI Revolution: How Machine Learning is Changing Everything",
            "Tech Insider",
            "2.5M",
            "example1",
            "Exploring the latest breakthroughs in artificial intelligence and machine learning",
            "Technology",
        ),
        entry(
            "10 Productivity Hacks That Actually Work",
            "ProductivityPro",
            "1.8M",
            "example2",
            "Science-backed productivity techniques to boost your efficiency",
            "Education",
        ),
        entry(
            "Future of Space Exploration in 2025",
            "Space News",
            "3.2M",
            "example3",
            "Latest updates on space missions and discoveries",
            "Science",
        ),
        entry(
            "Cooking Made Easy: 5-Minute Recipes",
            "Quick Chef",
            "4.1M",
            "example4",
            "Simple and delicious recipes for busy people",
            "Lifestyle",
        ),
        entry(
            "Fitness Transformation: Beginner's Guide",
            "FitLife",
            "2.9M",
            "example5",
            "Complete workout and nutrition plan for beginners",
            "Health",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::top_category;

    #[tokio::test]
    async fn test_default_list_order() {
        let discovery = StaticTrendingDiscovery::new();
        let candidates = discovery.fetch_candidates().await.unwrap();

        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[0].category, "Technology");
        assert_eq!(candidates[4].category, "Health");
        assert_eq!(candidates[2].url, "https://youtube.com/watch?v=example3");
    }

    #[tokio::test]
    async fn test_custom_list() {
        let discovery = StaticTrendingDiscovery::with_candidates(vec![]);
        assert!(discovery.fetch_candidates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_default_list_top_category_is_first() {
        let candidates = StaticTrendingDiscovery::new()
            .fetch_candidates()
            .await
            .unwrap();
        // Every category appears once, so the first one wins.
        assert_eq!(top_category(&candidates), Some("Technology".to_string()));
    }
}
