//! Types for the render module.

use serde::{Deserialize, Serialize};

/// A request to render one clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Directive text produced by the prompt stage.
    pub prompt: String,
    /// Target clip length in seconds.
    pub duration_secs: u32,
    /// Aspect ratio as "W:H" (e.g. "16:9").
    pub aspect_ratio: String,
    /// Optional style hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl RenderRequest {
    pub fn new(prompt: impl Into<String>, duration_secs: u32, aspect_ratio: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs,
            aspect_ratio: aspect_ratio.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Completion state of a render job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    Processing,
    Completed,
    Failed,
}

impl RenderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a render call as reported by the provider.
///
/// Locations are only meaningful when the job completed. Providers are not
/// trusted to fill them in, so callers should go through
/// [`RenderArtifact::completed_media_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderArtifact {
    /// Provider job identifier.
    pub job_id: String,
    /// Current job state.
    pub state: RenderState,
    /// Location of the rendered clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Location of the thumbnail image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl RenderArtifact {
    /// A completed job with its media and thumbnail.
    pub fn completed(
        job_id: impl Into<String>,
        media_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            state: RenderState::Completed,
            media_url: Some(media_url.into()),
            thumbnail_url: Some(thumbnail_url.into()),
        }
    }

    /// A job that has not produced output (still processing or failed).
    pub fn pending(job_id: impl Into<String>, state: RenderState) -> Self {
        Self {
            job_id: job_id.into(),
            state,
            media_url: None,
            thumbnail_url: None,
        }
    }

    /// The media location, if the job completed and reported a non-empty one.
    pub fn completed_media_url(&self) -> Option<&str> {
        match self.state {
            RenderState::Completed => self.media_url.as_deref().filter(|url| !url.is_empty()),
            RenderState::Processing | RenderState::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_media_url() {
        let artifact = RenderArtifact::completed("job-1", "https://cdn/v.mp4", "https://cdn/t.jpg");
        assert_eq!(artifact.completed_media_url(), Some("https://cdn/v.mp4"));
    }

    #[test]
    fn test_processing_has_no_media() {
        let artifact = RenderArtifact::pending("job-2", RenderState::Processing);
        assert_eq!(artifact.completed_media_url(), None);
    }

    #[test]
    fn test_completed_without_locator_has_no_media() {
        let artifact: RenderArtifact =
            serde_json::from_str(r#"{"job_id":"job-3","state":"completed"}"#).unwrap();
        assert_eq!(artifact.state, RenderState::Completed);
        assert_eq!(artifact.completed_media_url(), None);

        let blank = RenderArtifact {
            media_url: Some(String::new()),
            ..artifact
        };
        assert_eq!(blank.completed_media_url(), None);
    }

    #[test]
    fn test_failed_ignores_stray_locator() {
        let artifact = RenderArtifact {
            job_id: "job-4".to_string(),
            state: RenderState::Failed,
            media_url: Some("https://cdn/partial.mp4".to_string()),
            thumbnail_url: None,
        };
        assert_eq!(artifact.completed_media_url(), None);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(RenderState::Processing.to_string(), "processing");
        assert_eq!(
            serde_json::to_string(&RenderState::Completed).unwrap(),
            "\"completed\""
        );
    }
}
