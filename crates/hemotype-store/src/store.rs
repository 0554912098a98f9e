//! SQLite-backed report storage.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use hemotype_core::AnalysisResult;
use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, info};

use crate::report::{ReportQuery, ReportRecord};

/// Errors from report store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Lock error")]
    Lock,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// SQLite-backed report storage.
pub struct ReportStore {
    conn: Mutex<Connection>,
}

const SELECT_REPORT: &str = "SELECT id, image_path, result, created_at FROM reports";

impl ReportStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let store = Self {
            conn: Mutex::new(Connection::open(path)?),
        };
        store.init_schema()?;
        info!("Report store initialized at {:?}", path);
        Ok(store)
    }

    /// Creates an in-memory report store (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                image_path TEXT NOT NULL,
                result TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_reports_created ON reports(created_at DESC);
            "#,
        )?;

        Ok(())
    }

    /// Inserts a report and returns its id.
    pub fn insert_report(&self, image_path: &str, result: &AnalysisResult) -> Result<i64, StoreError> {
        let result_json = serde_json::to_string(result)?;
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute(
            "INSERT INTO reports (image_path, result) VALUES (?1, ?2)",
            params![image_path, result_json],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, image_path, blood_type = %result.blood_type, "Inserted report");
        Ok(id)
    }

    /// Retrieves a report by id.
    pub fn get_report(&self, id: i64) -> Result<Option<ReportRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_REPORT))?;
        let row = stmt.query_row(params![id], read_row);

        match row {
            Ok(raw) => Ok(Some(raw.into_record()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists reports, newest first.
    pub fn list_reports(&self, query: &ReportQuery) -> Result<Vec<ReportRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut sql = format!("{} WHERE 1=1", SELECT_REPORT);
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref blood_type) = query.blood_type {
            sql.push_str(" AND json_extract(result, '$.blood_type') = ?");
            params_vec.push(Box::new(blood_type.clone()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        // SQLite requires LIMIT before OFFSET; -1 means unbounded.
        if query.limit.is_some() || query.offset.is_some() {
            let limit = query.limit.map_or(-1, i64::from);
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = query.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(params_refs.as_slice(), read_row)?;

        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?.into_record()?);
        }

        Ok(reports)
    }

    /// Deletes a report. Returns whether a row was removed.
    pub fn delete_report(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let deleted = conn.execute("DELETE FROM reports WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    pub fn count_reports(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reports", [], |r| r.get(0))?;
        Ok(count as u64)
    }
}

struct RawReport {
    id: i64,
    image_path: String,
    result: String,
    created_at: String,
}

impl RawReport {
    fn into_record(self) -> Result<ReportRecord, StoreError> {
        Ok(ReportRecord {
            id: self.id,
            image_path: self.image_path,
            result: serde_json::from_str(&self.result)?,
            created_at: self.created_at,
        })
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawReport> {
    Ok(RawReport {
        id: row.get(0)?,
        image_path: row.get(1)?,
        result: row.get(2)?,
        created_at: row.get(3)?,
    })
}
