use chrono::Local;
use rusqlite::{Connection, Result, params};
use tracing::info;

/// Ordered schema migrations: (version, name, sql).
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "create_time_entries",
    r#"
    CREATE TABLE IF NOT EXISTS time_entries (
        id               TEXT PRIMARY KEY NOT NULL,
        date             TEXT NOT NULL,
        entry_time       TEXT NOT NULL,   -- RFC 3339 with offset
        lunch_exit_time  TEXT NOT NULL,
        lunch_entry_time TEXT NOT NULL,
        exit_time        TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_time_entries_date ON time_entries(date);
    CREATE INDEX IF NOT EXISTS idx_time_entries_entry_time ON time_entries(entry_time);
    "#,
)];

/// Ensure that the `schema_migrations` bookkeeping table exists.
fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Highest applied migration version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> Result<i64> {
    ensure_migrations_table(conn)?;
    conn.query_row(
        "SELECT IFNULL(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
}

/// Apply every migration newer than the recorded version.
/// Returns how many were applied; 0 means the schema was already current.
pub fn run_pending_migrations(conn: &mut Connection) -> Result<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![version, name, Local::now().to_rfc3339()],
        )?;
        tx.commit()?;

        info!(version, name, "Applied schema migration");
        applied += 1;
    }

    Ok(applied)
}
