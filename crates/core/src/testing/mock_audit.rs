//! In-memory run log for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::audit::{AuditFilter, AuditLog, LogEntry, LogRecord, LogStatus, LoggingError};

/// Mock implementation of the AuditLog trait.
///
/// Keeps records in memory and can be told to fail appends.
#[derive(Debug)]
pub struct MockAuditLog {
    records: Arc<RwLock<Vec<LogRecord>>>,
    queued_errors: Arc<RwLock<VecDeque<LoggingError>>>,
    failing_statuses: Arc<RwLock<HashSet<LogStatus>>>,
    append_attempts: Arc<RwLock<usize>>,
}

impl Default for MockAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuditLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            queued_errors: Arc::new(RwLock::new(VecDeque::new())),
            failing_statuses: Arc::new(RwLock::new(HashSet::new())),
            append_attempts: Arc::new(RwLock::new(0)),
        }
    }

    /// Configure the next append to fail with the given error.
    pub async fn set_next_error(&self, error: LoggingError) {
        self.queued_errors.write().await.push_back(error);
    }

    /// Fail every append with this status.
    pub async fn fail_on_status(&self, status: LogStatus) {
        self.failing_statuses.write().await.insert(status);
    }

    /// Stored entries, oldest first.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.records
            .read()
            .await
            .iter()
            .map(|r| r.entry.clone())
            .collect()
    }

    /// Number of append calls, failed ones included.
    pub async fn append_attempts(&self) -> usize {
        *self.append_attempts.read().await
    }

    fn matches(filter: &AuditFilter, record: &LogRecord) -> bool {
        filter.run_id.as_ref().map_or(true, |id| &record.entry.run_id == id)
            && filter.status.map_or(true, |s| record.entry.status == s)
            && filter.from.map_or(true, |from| record.timestamp >= from)
            && filter.to.map_or(true, |to| record.timestamp <= to)
    }
}

#[async_trait]
impl AuditLog for MockAuditLog {
    async fn append(&self, entry: LogEntry) -> Result<i64, LoggingError> {
        *self.append_attempts.write().await += 1;

        if let Some(err) = self.queued_errors.write().await.pop_front() {
            return Err(err);
        }
        if self.failing_statuses.read().await.contains(&entry.status) {
            return Err(LoggingError::Database(format!(
                "mock failure for {} entry",
                entry.status.as_str()
            )));
        }

        let mut records = self.records.write().await;
        let id = records.len() as i64 + 1;
        records.push(LogRecord {
            id,
            timestamp: Utc::now(),
            entry,
        });
        Ok(id)
    }

    async fn query(&self, filter: &AuditFilter) -> Result<Vec<LogRecord>, LoggingError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| Self::matches(filter, r))
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &AuditFilter) -> Result<i64, LoggingError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| Self::matches(filter, r))
            .count() as i64)
    }
}
