#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset};
use rtimeclock::core::OutcomeSink;
use rtimeclock::db::{DbPool, SqliteStore, init_db};
use rtimeclock::errors::StoreError;
use rtimeclock::models::{OperationOutcome, TimeEntry};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use uuid::Uuid;

/// CLI command with HOME pointed at `home`, so no real config is read.
pub fn rtc(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rtimeclock");
    cmd.env("HOME", home)
        .env_remove("RTIMECLOCK_DB")
        .env_remove("RTIMECLOCK_LOG_FORMAT")
        .env("RTIMECLOCK_CONNECT_BACKOFF_MS", "1")
        .env("RUST_LOG", "off");
    cmd
}

/// Temp dir plus a database path inside it.
pub fn temp_db(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(format!("{name}_rtimeclock.sqlite"));
    (dir, path)
}

/// Open and initialize a SQLite store at `path`.
pub fn open_store(path: &Path) -> SqliteStore {
    let pool = DbPool::open(&path.to_string_lossy(), Duration::from_secs(5)).expect("open db");
    init_db(&pool).expect("init db");
    SqliteStore::new(pool)
}

pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid RFC 3339 timestamp")
}

/// A regular 09:00-18:00 day with lunch 12:00-13:00 at `day` ("YYYY-MM-DD"),
/// date tag set to `tag`.
pub fn workday(tag: &str, day: &str) -> TimeEntry {
    TimeEntry::new(
        tag,
        ts(&format!("{day}T09:00:00+00:00")),
        ts(&format!("{day}T12:00:00+00:00")),
        ts(&format!("{day}T13:00:00+00:00")),
        ts(&format!("{day}T18:00:00+00:00")),
    )
}

/// Collects every outcome the retry envelope reports.
#[derive(Default)]
pub struct RecordingSink {
    outcomes: Mutex<Vec<OperationOutcome>>,
}

impl RecordingSink {
    pub fn outcomes(&self) -> Vec<OperationOutcome> {
        self.outcomes.lock().expect("sink lock").clone()
    }

    pub fn failures(&self) -> usize {
        self.outcomes().iter().filter(|o| !o.succeeded).count()
    }

    pub fn successes(&self) -> usize {
        self.outcomes().iter().filter(|o| o.succeeded).count()
    }
}

impl OutcomeSink for RecordingSink {
    fn record(&self, outcome: &OperationOutcome) {
        self.outcomes.lock().expect("sink lock").push(outcome.clone());
    }
}

/// In-memory store that fails its first `failures` calls.
pub struct FlakyStore {
    remaining_failures: AtomicU32,
    calls: AtomicU32,
    call_times: Mutex<Vec<Instant>>,
    entries: Mutex<Vec<TimeEntry>>,
}

impl FlakyStore {
    pub fn healthy() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: u32) -> Self {
        Self {
            remaining_failures: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
            call_times: Mutex::new(Vec::new()),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_entries(self, entries: Vec<TimeEntry>) -> Self {
        *self.entries.lock().expect("entries lock") = entries;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().expect("times lock").clone()
    }

    fn gate(&self) -> Result<(), StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.call_times.lock().expect("times lock").push(Instant::now());

        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(StoreError::Unavailable(format!("simulated outage on call {call}")));
        }
        Ok(())
    }

    fn filtered<F: Fn(&TimeEntry) -> bool>(&self, keep: F) -> Result<Vec<TimeEntry>, StoreError> {
        self.gate()?;
        Ok(self
            .entries
            .lock()
            .expect("entries lock")
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect())
    }
}

impl rtimeclock::db::RecordStore for FlakyStore {
    fn insert(&self, entry: &TimeEntry) -> Result<TimeEntry, StoreError> {
        self.gate()?;
        let stored = TimeEntry {
            id: Some(entry.id.unwrap_or_else(Uuid::new_v4)),
            ..entry.clone()
        };
        self.entries.lock().expect("entries lock").push(stored.clone());
        Ok(stored)
    }

    fn find_all(&self) -> Result<Vec<TimeEntry>, StoreError> {
        self.filtered(|_| true)
    }

    fn find_by_date(&self, date: &str) -> Result<Vec<TimeEntry>, StoreError> {
        self.filtered(|e| e.date == date)
    }

    fn find_by_year(&self, year: i32) -> Result<Vec<TimeEntry>, StoreError> {
        use chrono::Datelike;
        self.filtered(|e| e.entry_time.year() == year)
    }

    fn find_by_month(&self, month: i32) -> Result<Vec<TimeEntry>, StoreError> {
        use chrono::Datelike;
        self.filtered(|e| e.entry_time.month() as i32 == month)
    }

    fn find_by_day(&self, day: i32) -> Result<Vec<TimeEntry>, StoreError> {
        use chrono::Datelike;
        self.filtered(|e| e.entry_time.day() as i32 == day)
    }
}
