//! Slot schema bootstrap and introspection.
//!
//! # Invariants
//! - A fresh database (`user_version = 0`) gets the slot table and is stamped
//!   with `SCHEMA_VERSION` in one transaction.
//! - A stamped database must still contain `persist_slots`; a stamp without the
//!   table is reported, not silently repaired.
//! - A database stamped by a newer binary is refused.

use crate::repo::snapshot_repo::{RepoError, RepoResult};
use log::info;
use rusqlite::Connection;

/// Slot schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const SLOT_SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates or verifies the slot schema on `conn`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the stamp is newer than `SCHEMA_VERSION`.
/// - `MissingRequiredTable` when a stamped database lacks `persist_slots`.
pub fn ensure_schema(conn: &mut Connection) -> RepoResult<()> {
    match schema_version(conn)? {
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(SLOT_SCHEMA_SQL)?;
            tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
            tx.commit()?;
            info!(
                "event=db_schema module=db status=ok action=create version={}",
                SCHEMA_VERSION
            );
            Ok(())
        }
        SCHEMA_VERSION => {
            if table_exists(conn, "persist_slots")? {
                Ok(())
            } else {
                Err(RepoError::MissingRequiredTable("persist_slots"))
            }
        }
        found => Err(RepoError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        }),
    }
}

/// Reads the `user_version` stamp.
pub fn schema_version(conn: &Connection) -> RepoResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
