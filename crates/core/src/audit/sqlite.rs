use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use super::{AuditFilter, AuditLog, LogEntry, LogRecord, LogStatus, LoggingError};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS run_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        run_id TEXT NOT NULL,
        status TEXT NOT NULL,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        views TEXT NOT NULL,
        prompt TEXT NOT NULL,
        published_url TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_run_log_timestamp ON run_log(timestamp);
    CREATE INDEX IF NOT EXISTS idx_run_log_run_id ON run_log(run_id);
    CREATE INDEX IF NOT EXISTS idx_run_log_status ON run_log(status);
"#;

/// Fixed-width timestamps so that text comparison matches time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite-backed run log
pub struct SqliteAuditLog {
    conn: Mutex<Connection>,
}

impl SqliteAuditLog {
    /// Open (or create) the database file and its tables
    pub fn new(path: &Path) -> Result<Self, LoggingError> {
        let conn = Connection::open(path).map_err(|e| LoggingError::Database(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Create an in-memory run log (useful for testing)
    pub fn in_memory() -> Result<Self, LoggingError> {
        let conn =
            Connection::open_in_memory().map_err(|e| LoggingError::Database(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, LoggingError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| LoggingError::Database(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, LoggingError> {
        self.conn
            .lock()
            .map_err(|_| LoggingError::Database("connection lock poisoned".to_string()))
    }

    /// Insert an entry with an explicit timestamp
    pub fn insert_at(&self, entry: &LogEntry, timestamp: DateTime<Utc>) -> Result<i64, LoggingError> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO run_log (timestamp, run_id, status, title, category, views, prompt, published_url) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                format_timestamp(&timestamp),
                entry.run_id,
                entry.status.as_str(),
                entry.title,
                entry.category,
                entry.views,
                entry.prompt,
                entry.published_url,
            ],
        )
        .map_err(|e| LoggingError::Database(e.to_string()))?;

        Ok(conn.last_insert_rowid())
    }

    fn build_where_clause(filter: &AuditFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref run_id) = filter.run_id {
            conditions.push("run_id = ?");
            params.push(Box::new(run_id.clone()));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params.push(Box::new(status.as_str()));
        }

        if let Some(ref from) = filter.from {
            conditions.push("timestamp >= ?");
            params.push(Box::new(format_timestamp(from)));
        }

        if let Some(ref to) = filter.to {
            conditions.push("timestamp <= ?");
            params.push(Box::new(format_timestamp(to)));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    fn query_sync(&self, filter: &AuditFilter) -> Result<Vec<LogRecord>, LoggingError> {
        let conn = self.lock()?;

        let (where_clause, params) = Self::build_where_clause(filter);

        let sql = format!(
            "SELECT id, timestamp, run_id, status, title, category, views, prompt, published_url FROM run_log {} ORDER BY timestamp DESC, id DESC LIMIT ? OFFSET ?",
            where_clause
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| LoggingError::Database(e.to_string()))?;

        let mut all_params: Vec<Box<dyn rusqlite::ToSql>> = params;
        all_params.push(Box::new(filter.limit));
        all_params.push(Box::new(filter.offset));

        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(3)?,
                    LogEntry {
                        run_id: row.get(2)?,
                        title: row.get(4)?,
                        category: row.get(5)?,
                        views: row.get(6)?,
                        prompt: row.get(7)?,
                        status: LogStatus::PromptGenerated,
                        published_url: row.get(8)?,
                    },
                ))
            })
            .map_err(|e| LoggingError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row_result in rows {
            let (id, timestamp_str, status_str, mut entry) =
                row_result.map_err(|e| LoggingError::Database(e.to_string()))?;

            let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&timestamp_str)
                .map_err(|e| LoggingError::Serialization(format!("Invalid timestamp: {}", e)))?
                .into();

            entry.status = LogStatus::parse(&status_str).ok_or_else(|| {
                LoggingError::Serialization(format!("Unknown status: {}", status_str))
            })?;

            records.push(LogRecord {
                id,
                timestamp,
                entry,
            });
        }

        Ok(records)
    }

    fn count_sync(&self, filter: &AuditFilter) -> Result<i64, LoggingError> {
        let conn = self.lock()?;

        let (where_clause, params) = Self::build_where_clause(filter);

        let sql = format!("SELECT COUNT(*) FROM run_log {}", where_clause);

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = conn
            .query_row(&sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(|e| LoggingError::Database(e.to_string()))?;

        Ok(count)
    }
}

#[async_trait]
impl AuditLog for SqliteAuditLog {
    async fn append(&self, entry: LogEntry) -> Result<i64, LoggingError> {
        self.insert_at(&entry, Utc::now())
    }

    async fn query(&self, filter: &AuditFilter) -> Result<Vec<LogRecord>, LoggingError> {
        self.query_sync(filter)
    }

    async fn count(&self, filter: &AuditFilter) -> Result<i64, LoggingError> {
        self.count_sync(filter)
    }
}
