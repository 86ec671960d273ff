use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Separator line between document blocks.
pub const DOCUMENT_SEPARATOR: &str = "-------------------------------------------";

/// Progress marker recorded for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    PromptGenerated,
    Uploaded,
}

impl LogStatus {
    /// Stable key used for storage and filtering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PromptGenerated => "prompt_generated",
            Self::Uploaded => "uploaded",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PromptGenerated => "Prompt Generated",
            Self::Uploaded => "Uploaded to YouTube",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "prompt_generated" => Some(Self::PromptGenerated),
            "uploaded" => Some(Self::Uploaded),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub run_id: String,
    pub title: String,
    pub category: String,
    pub views: String,
    /// Directive text produced by the prompt stage.
    pub prompt: String,
    pub status: LogStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,
}

/// A stored [`LogEntry`] with its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub entry: LogEntry,
}

impl LogRecord {
    /// Render this record as a block of the plain-text document.
    pub fn document_block(&self) -> String {
        let published = match self.entry.published_url.as_deref() {
            Some(url) => format!("YouTube URL: {}", url),
            None => "Not uploaded yet".to_string(),
        };
        format!(
            "[{}]\nTitle: {}\nCategory: {}\nViews: {}\nPrompt Generated: {}\nStatus: {}\n{}\n{}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.entry.title,
            self.entry.category,
            self.entry.views,
            self.entry.prompt,
            self.entry.status.label(),
            published,
            DOCUMENT_SEPARATOR,
        )
    }
}

/// Render records as one document, in the order given.
pub fn render_document(records: &[LogRecord]) -> String {
    records
        .iter()
        .map(LogRecord::document_block)
        .collect::<Vec<_>>()
        .join("\n")
}
