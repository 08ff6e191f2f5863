//! Storage layer for the day planner.
//!
//! Provides persistence for time entries using `rusqlite`, exposed to the core
//! through the [`EntryStorage`] load/save hooks.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization. The CLI additionally holds
//! an exclusive file lock while a mutating command runs.
//!
//! # Schema
//!
//! All values are stored as TEXT in their canonical textual forms:
//! - `date`: `YYYY-MM-DD`
//! - `start_time` / `end_time`: `HH:MM`
//! - `created_at`: RFC 3339 in UTC (e.g., `2025-11-02T12:00:00.000Z`)
//!
//! `date` and `HH:MM` sort lexicographically in chronological order, so the
//! `ORDER BY` below yields entries grouped by day and ordered by start.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

use dp_core::calendar::{format_date, format_time, parse_date, parse_time};
use dp_core::{EntryId, EntryStorage, TimeEntry, Title, ValidationError};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row does not describe a valid entry.
    #[error("invalid entry row {id}: {source}")]
    InvalidRow {
        id: String,
        #[source]
        source: ValidationError,
    },
    /// Failed to parse a stored creation timestamp.
    #[error("invalid timestamp for entry {id}: {timestamp}")]
    TimestampParse {
        id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// An entry as stored, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl EntryRecord {
    fn from_entry(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: format_date(entry.date),
            start_time: format_time(entry.start_time),
            end_time: format_time(entry.end_time),
            title: entry.title.to_string(),
            notes: entry.notes.clone(),
            created_at: format_timestamp(entry.created_at),
        }
    }

    fn into_entry(self) -> Result<TimeEntry, DbError> {
        let invalid = |source| DbError::InvalidRow {
            id: self.id.clone(),
            source,
        };
        let created_at = parse_timestamp(&self.created_at, &self.id)?;
        Ok(TimeEntry {
            id: EntryId::new(self.id.clone()).map_err(invalid)?,
            date: parse_date(&self.date).map_err(invalid)?,
            start_time: parse_time(&self.start_time).map_err(invalid)?,
            end_time: parse_time(&self.end_time).map_err(invalid)?,
            title: Title::new(self.title.clone()).map_err(invalid)?,
            notes: self.notes,
            created_at,
        })
    }
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                title TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
            ",
        )?;
        Ok(())
    }

    /// Lists raw entry rows ordered by date, start time, then ID.
    pub fn list_records(&self) -> Result<Vec<EntryRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, date, start_time, end_time, title, notes, created_at
            FROM entries
            ORDER BY date ASC, start_time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EntryRecord {
                id: row.get(0)?,
                date: row.get(1)?,
                start_time: row.get(2)?,
                end_time: row.get(3)?,
                title: row.get(4)?,
                notes: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Loads and validates every stored entry.
    pub fn list_entries(&self) -> Result<Vec<TimeEntry>, DbError> {
        self.list_records()?
            .into_iter()
            .map(EntryRecord::into_entry)
            .collect()
    }

    /// Replaces the stored collection in a single transaction.
    pub fn replace_entries(&mut self, entries: &[TimeEntry]) -> Result<usize, DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM entries", [])?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT INTO entries (id, date, start_time, end_time, title, notes, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )?;
            for entry in entries {
                let record = EntryRecord::from_entry(entry);
                inserted += stmt.execute(params![
                    record.id,
                    record.date,
                    record.start_time,
                    record.end_time,
                    record.title,
                    record.notes,
                    record.created_at,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(inserted, "saved entries");
        Ok(inserted)
    }

    /// Number of stored entries.
    pub fn count_entries(&self) -> Result<usize, DbError> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl EntryStorage for Database {
    type Error = DbError;

    fn load_entries(&mut self) -> Result<Vec<TimeEntry>, Self::Error> {
        self.list_entries()
    }

    fn save_entries(&mut self, entries: &[TimeEntry]) -> Result<(), Self::Error> {
        self.replace_entries(entries).map(|_| ())
    }
}

fn parse_timestamp(timestamp: &str, id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
