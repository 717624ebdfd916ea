//! Shared SQLite connection handle.
//!
//! One connection behind a mutex, cloned cheaply across callers and threads.
//! Opening goes through its own fixed-interval retry policy, independent of
//! the query-level one used by the access layer.

use crate::core::RetryPolicy;
use crate::errors::{AppError, AppResult, StoreError};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone)]
pub struct DbPool {
    conn: Arc<Mutex<Connection>>,
    path: String,
}

impl DbPool {
    /// Open `path` once, applying the busy timeout.
    pub fn open(path: &str, busy_timeout: Duration) -> Result<Self, StoreError> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(busy_timeout)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: path.to_string(),
        })
    }

    /// Open `path`, retrying up to the connect policy's budget.
    ///
    /// Exhaustion is [`AppError::ConnectFailed`]; callers treat it as fatal.
    pub fn connect_with_retry(
        path: &str,
        busy_timeout: Duration,
        policy: &RetryPolicy,
    ) -> AppResult<Self> {
        let max_attempts = policy.attempts();
        let mut attempt = 1;

        loop {
            match Self::open(path, busy_timeout) {
                Ok(pool) => {
                    info!(path, attempt, "Database connection established successfully.");
                    return Ok(pool);
                }
                Err(e) if attempt >= max_attempts => {
                    return Err(AppError::ConnectFailed {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(
                        path,
                        attempt,
                        max_attempts,
                        backoff_ms = policy.backoff_ms,
                        error = %e,
                        "Failed to connect to database, retrying ({attempt}/{max_attempts})"
                    );
                    thread::sleep(policy.backoff());
                    attempt += 1;
                }
            }
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run `func` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, func: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(func(&mut conn)?)
    }

    /// Close the connection if this is the last handle; otherwise just drop it.
    pub fn close(self) -> AppResult<()> {
        let Ok(mutex) = Arc::try_unwrap(self.conn) else {
            return Ok(());
        };
        let conn = mutex.into_inner().map_err(|_| StoreError::Poisoned)?;
        conn.close().map_err(|(_, e)| StoreError::Db(e))?;
        Ok(())
    }
}
