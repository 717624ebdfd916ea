use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Result};
use uuid::Uuid;

/// SQL function used as the id default on insert.
pub const UUID_FUNCTION: &str = "uuid_generate_v4";

/// Register `uuid_generate_v4()` on this connection.
///
/// SQLite functions live per connection, so this runs on every pool that
/// is going to insert, not once per database file.
pub fn register_uuid_function(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(UUID_FUNCTION, 0, FunctionFlags::SQLITE_UTF8, |_ctx| {
        Ok(Uuid::new_v4().to_string())
    })
}

/// Initialize the database behind `pool`.
/// Must run before the first access-layer call; running it again is a no-op
/// apart from re-registering the id function.
pub fn init_db(pool: &DbPool) -> AppResult<()> {
    pool.with_conn(|conn| {
        register_uuid_function(conn)?;
        run_pending_migrations(conn)?;
        Ok(())
    })?;
    Ok(())
}
