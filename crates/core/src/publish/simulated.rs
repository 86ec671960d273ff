//! Simulated publisher.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::error::PublishError;
use super::traits::Publisher;
use super::types::{PublishArtifact, PublishRequest, DEFAULT_CATEGORY_ID};

const ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const ID_SUFFIX_LEN: usize = 11;

/// Publisher that pretends to upload to YouTube.
///
/// Ids look like `YT_<millis>_<11 random chars>` and are unique across calls.
#[derive(Debug, Clone)]
pub struct SimulatedPublisher {
    delay: Duration,
    default_category: String,
}

impl SimulatedPublisher {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(2000),
            default_category: DEFAULT_CATEGORY_ID.to_string(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_default_category(mut self, category_id: impl Into<String>) -> Self {
        self.default_category = category_id.into();
        self
    }

    fn next_id() -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: String = uuid::Uuid::new_v4()
            .as_bytes()
            .iter()
            .take(ID_SUFFIX_LEN)
            .map(|b| ID_ALPHABET[(*b as usize) % ID_ALPHABET.len()] as char)
            .collect();
        format!("YT_{}_{}", millis, suffix)
    }
}

impl Default for SimulatedPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for SimulatedPublisher {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn publish(&self, request: PublishRequest) -> Result<PublishArtifact, PublishError> {
        request.validate().map_err(PublishError::invalid_metadata)?;

        let category = request
            .category_id
            .as_deref()
            .unwrap_or(&self.default_category);
        debug!(
            "Simulated upload of '{}' ({}, category {}, {} tags)",
            request.title,
            request.visibility,
            category,
            request.tags.len()
        );
        tokio::time::sleep(self.delay).await;

        let video_id = Self::next_id();
        let artifact = PublishArtifact {
            url: format!("https://youtube.com/watch?v={}", video_id),
            video_id,
            state: "uploaded".to_string(),
        };

        info!("Published '{}' at {}", request.title, artifact.url);
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::Visibility;

    fn request() -> PublishRequest {
        PublishRequest {
            media_url: "https://example.com/videos/generated_video_1.mp4".to_string(),
            title: "Science: Space".to_string(),
            description: "desc".to_string(),
            tags: vec!["Science".to_string()],
            category_id: None,
            visibility: Visibility::Public,
        }
    }

    fn publisher() -> SimulatedPublisher {
        SimulatedPublisher::new().with_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_publish_artifact_shape() {
        let artifact = publisher().publish(request()).await.unwrap();

        assert_eq!(artifact.state, "uploaded");
        let (millis, suffix) = artifact
            .video_id
            .strip_prefix("YT_")
            .and_then(|rest| rest.split_once('_'))
            .unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_eq!(artifact.url, format!("https://youtube.com/watch?v={}", artifact.video_id));
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let publisher = publisher();
        let a = publisher.publish(request()).await.unwrap();
        let b = publisher.publish(request()).await.unwrap();
        assert_ne!(a.video_id, b.video_id);
        assert_ne!(a.url, b.url);
    }

    #[tokio::test]
    async fn test_rejects_long_title() {
        let mut req = request();
        req.title = "t".repeat(101);
        let err = publisher().publish(req).await.unwrap_err();
        assert!(matches!(err, PublishError::InvalidMetadata { .. }));
    }

    #[tokio::test]
    async fn test_rejects_missing_media() {
        let mut req = request();
        req.media_url = String::new();
        assert!(matches!(
            publisher().publish(req).await,
            Err(PublishError::InvalidMetadata { .. })
        ));
    }
}
