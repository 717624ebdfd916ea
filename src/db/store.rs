//! Record Store contract and its SQLite implementation.

use crate::db::pool::DbPool;
use crate::errors::{AppError, StoreError};
use crate::models::TimeEntry;
use chrono::{DateTime, Datelike, FixedOffset};
use rusqlite::{Params, Row, params};
use uuid::Uuid;

/// Persistence backend the access layer wraps.
///
/// Implementations do no retrying of their own and no bounds checks on the
/// year/month/day filters.
pub trait RecordStore: Send + Sync {
    /// Persist `entry`, generating its id when absent, and echo it back.
    fn insert(&self, entry: &TimeEntry) -> Result<TimeEntry, StoreError>;

    fn find_all(&self) -> Result<Vec<TimeEntry>, StoreError>;

    /// Exact match on the `date` tag; no date parsing.
    fn find_by_date(&self, date: &str) -> Result<Vec<TimeEntry>, StoreError>;

    /// Year component of `entry_time`.
    fn find_by_year(&self, year: i32) -> Result<Vec<TimeEntry>, StoreError>;

    /// Month component (1-12) of `entry_time`.
    fn find_by_month(&self, month: i32) -> Result<Vec<TimeEntry>, StoreError>;

    /// Day-of-month component of `entry_time`.
    fn find_by_day(&self, day: i32) -> Result<Vec<TimeEntry>, StoreError>;
}

const SELECT_ENTRIES: &str = "SELECT id, date, entry_time, lunch_exit_time, lunch_entry_time, exit_time
     FROM time_entries";

const ORDER_BY: &str = "ORDER BY entry_time ASC, id ASC";

const INSERT_ENTRY: &str = "INSERT INTO time_entries (id, date, entry_time, lunch_exit_time, lunch_entry_time, exit_time)
     VALUES (COALESCE(?1, uuid_generate_v4()), ?2, ?3, ?4, ?5, ?6)
     RETURNING id";

/// RFC 3339 only carries four-digit years, and the year filter reads the
/// first four characters of the column.
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// `RecordStore` over a shared SQLite connection.
///
/// Timestamps are kept as RFC 3339 text with the caller's offset, so the
/// date-part filters compare the wall-clock fields as written.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// `pool` must already have gone through `init_db`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn into_pool(self) -> DbPool {
        self.pool
    }

    fn select<P: Params>(&self, filter: &str, params: P) -> Result<Vec<TimeEntry>, StoreError> {
        let sql = format!("{SELECT_ENTRIES} {filter} {ORDER_BY}");
        self.pool.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt.query_map(params, map_row)?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }
}

impl RecordStore for SqliteStore {
    /// Punches outside years 0000-9999 are rejected before anything is
    /// written; stored rows always read back.
    fn insert(&self, entry: &TimeEntry) -> Result<TimeEntry, StoreError> {
        let entry_time = storable_timestamp("entry_time", &entry.entry_time)?;
        let lunch_exit_time = storable_timestamp("lunch_exit_time", &entry.lunch_exit_time)?;
        let lunch_entry_time = storable_timestamp("lunch_entry_time", &entry.lunch_entry_time)?;
        let exit_time = storable_timestamp("exit_time", &entry.exit_time)?;

        let id: String = self.pool.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(INSERT_ENTRY)?;
            stmt.query_row(
                params![
                    entry.id.map(|id| id.to_string()),
                    entry.date,
                    entry_time,
                    lunch_exit_time,
                    lunch_entry_time,
                    exit_time,
                ],
                |row| row.get(0),
            )
        })?;

        let id = Uuid::parse_str(&id)
            .map_err(|e| StoreError::Unavailable(format!("store returned invalid id '{id}': {e}")))?;

        Ok(TimeEntry {
            id: Some(id),
            ..entry.clone()
        })
    }

    fn find_all(&self) -> Result<Vec<TimeEntry>, StoreError> {
        self.select("", [])
    }

    fn find_by_date(&self, date: &str) -> Result<Vec<TimeEntry>, StoreError> {
        self.select("WHERE date = ?1", [date])
    }

    fn find_by_year(&self, year: i32) -> Result<Vec<TimeEntry>, StoreError> {
        self.select("WHERE CAST(substr(entry_time, 1, 4) AS INTEGER) = ?1", [year])
    }

    fn find_by_month(&self, month: i32) -> Result<Vec<TimeEntry>, StoreError> {
        self.select("WHERE CAST(substr(entry_time, 6, 2) AS INTEGER) = ?1", [month])
    }

    fn find_by_day(&self, day: i32) -> Result<Vec<TimeEntry>, StoreError> {
        self.select("WHERE CAST(substr(entry_time, 9, 2) AS INTEGER) = ?1", [day])
    }
}

fn storable_timestamp(column: &str, value: &DateTime<FixedOffset>) -> Result<String, StoreError> {
    if !STORABLE_YEARS.contains(&value.year()) {
        return Err(StoreError::InvalidValue(format!(
            "{column} {value} is outside years 0000-9999"
        )));
    }
    Ok(value.to_rfc3339())
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<FixedOffset>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map_err(|_| conversion_error(idx, AppError::InvalidTimestamp(raw.clone())))
}

pub fn map_row(row: &Row) -> rusqlite::Result<TimeEntry> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str).map_err(|_| {
        conversion_error(0, AppError::Validation(format!("Invalid id: {id_str}")))
    })?;

    Ok(TimeEntry {
        id: Some(id),
        date: row.get(1)?,
        entry_time: timestamp_column(row, 2)?,
        lunch_exit_time: timestamp_column(row, 3)?,
        lunch_entry_time: timestamp_column(row, 4)?,
        exit_time: timestamp_column(row, 5)?,
    })
}
