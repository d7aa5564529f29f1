//! Connection bootstrap for planner databases.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Every open attempt logs one `db_open` outcome event with its duration.

use super::migrations::apply_migrations;
use crate::store::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a planner database file.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory planner database.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect()
        .map_err(StoreError::from)
        .map_err(|err| ("db_open_failed", err))
        .and_then(|mut conn| match bootstrap_connection(&mut conn) {
            Ok(()) => Ok(conn),
            Err(err) => Err(("db_bootstrap_failed", err)),
        });

    let elapsed_ms = started_at.elapsed().as_millis();
    match result {
        Ok(conn) => {
            info!("event=db_open module=db status=ok mode={mode} duration_ms={elapsed_ms}");
            Ok(conn)
        }
        Err((error_code, err)) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={elapsed_ms} error_code={error_code} error={err}"
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
