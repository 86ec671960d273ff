//! Types for the publish module.

use serde::{Deserialize, Serialize};

/// Longest title the platform accepts, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Platform category used when a request does not name one ("People & Blogs").
pub const DEFAULT_CATEGORY_ID: &str = "22";

/// Who can see a published video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Unlisted,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Unlisted => "unlisted",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clip and the metadata to publish it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub media_url: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Platform category identifier. The publisher's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub visibility: Visibility,
}

impl PublishRequest {
    /// Check the request before it is sent anywhere.
    pub fn validate(&self) -> Result<(), String> {
        if self.media_url.trim().is_empty() {
            return Err("media location is empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        let chars = self.title.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(format!(
                "title is {} characters, limit is {}",
                chars, MAX_TITLE_CHARS
            ));
        }
        Ok(())
    }
}

/// What the platform returned for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishArtifact {
    /// Platform video id.
    pub video_id: String,
    /// Public URL of the video.
    pub url: String,
    /// Platform-reported state (e.g. "uploaded").
    pub state: String,
}
