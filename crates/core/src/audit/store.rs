use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{LogEntry, LogRecord, LogStatus};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Filter for querying the run log
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub run_id: Option<String>,
    pub status: Option<LogStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

impl AuditFilter {
    pub fn new() -> Self {
        Self {
            limit: 100,
            offset: 0,
            ..Default::default()
        }
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn with_status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_time_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

/// Destination for pipeline progress entries
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append an entry, returns the assigned ID
    async fn append(&self, entry: LogEntry) -> Result<i64, LoggingError>;

    /// Query records with optional filters, newest first
    async fn query(&self, filter: &AuditFilter) -> Result<Vec<LogRecord>, LoggingError>;

    /// Count matching records
    async fn count(&self, filter: &AuditFilter) -> Result<i64, LoggingError>;
}
