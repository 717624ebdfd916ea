//! Resilient access layer over a `RecordStore`.

use crate::core::retry::{RetryPolicy, execute_with_retry};
use crate::core::sink::{OutcomeSink, TracingSink};
use crate::config::Config;
use crate::db::{DbPool, RecordStore, SqliteStore, init_db};
use crate::errors::{AppResult, StoreError};
use crate::models::TimeEntry;
use std::sync::Arc;

/// Caller-facing operations. Every call runs through the same retry
/// envelope; the store is injected and never reached through a global.
pub struct TimeService<S> {
    store: S,
    policy: RetryPolicy,
    sink: Arc<dyn OutcomeSink>,
}

impl<S: RecordStore> TimeService<S> {
    pub fn new(store: S, policy: RetryPolicy) -> Self {
        Self {
            store,
            policy,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the default tracing sink.
    pub fn with_sink(mut self, sink: Arc<dyn OutcomeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert `entry` and echo it back with its (possibly generated) id.
    /// The id is fixed before the first attempt, so every retry of the
    /// same call writes the same row.
    pub fn create(&self, mut entry: TimeEntry) -> AppResult<TimeEntry> {
        entry.ensure_id();
        self.run("create", || self.store.insert(&entry))
    }

    pub fn list_all(&self) -> AppResult<Vec<TimeEntry>> {
        self.run("list_all", || self.store.find_all())
    }

    /// Exact string match on the `date` tag.
    pub fn list_by_date(&self, date: &str) -> AppResult<Vec<TimeEntry>> {
        self.run("list_by_date", || self.store.find_by_date(date))
    }

    /// Entries whose `entry_time` falls in `year`.
    pub fn list_by_year(&self, year: i32) -> AppResult<Vec<TimeEntry>> {
        self.run("list_by_year", || self.store.find_by_year(year))
    }

    pub fn list_by_month(&self, month: i32) -> AppResult<Vec<TimeEntry>> {
        self.run("list_by_month", || self.store.find_by_month(month))
    }

    pub fn list_by_day(&self, day: i32) -> AppResult<Vec<TimeEntry>> {
        self.run("list_by_day", || self.store.find_by_day(day))
    }

    fn run<T, F>(&self, operation: &'static str, call: F) -> AppResult<T>
    where
        F: FnMut() -> Result<T, StoreError>,
    {
        execute_with_retry(operation, &self.policy, self.sink.as_ref(), call)
    }
}

impl TimeService<SqliteStore> {
    /// Open the configured database (with the connect policy), run schema
    /// setup and wrap the store with the query policy.
    pub fn connect(cfg: &Config) -> AppResult<Self> {
        let pool =
            DbPool::connect_with_retry(&cfg.database, cfg.busy_timeout(), &cfg.connect_retry)?;
        init_db(&pool)?;
        Ok(Self::new(SqliteStore::new(pool), cfg.query_retry))
    }

    /// Release the connection once the caller is done with the service.
    pub fn shutdown(self) -> AppResult<()> {
        self.store.into_pool().close()
    }
}
