//! Snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the serialized note snapshot in one keyed slot.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - A save replaces the slot in a single immediate transaction.
//! - A missing slot is a normal "nothing saved yet" state, not an error.
//! - Repository never interprets snapshot bytes; decoding belongs to `NoteStore`.

use crate::db::schema::{table_exists, table_has_column};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the note snapshot.
pub const DATA_STORE_KEY: i64 = 100;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence.
#[derive(Debug)]
pub enum RepoError {
    /// SQLite transport failure.
    Sqlite(rusqlite::Error),
    /// Storage was stamped by a newer binary.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "storage table `{table}` is missing column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Storage medium for the note snapshot.
pub trait SnapshotRepository {
    /// Reads the saved snapshot, or `None` when nothing was saved.
    fn load_snapshot(&self) -> RepoResult<Option<Vec<u8>>>;
    /// Atomically replaces the saved snapshot.
    fn save_snapshot(&mut self, bytes: &[u8]) -> RepoResult<()>;
    /// Removes the saved snapshot. Succeeds when nothing was saved.
    fn clear_snapshot(&mut self) -> RepoResult<()>;
}

/// SQLite-backed snapshot slot.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn mut Connection,
    key: i64,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Constructs a repository over `DATA_STORE_KEY` from a bootstrapped connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        Self::with_key(conn, DATA_STORE_KEY)
    }

    /// Constructs a repository over a caller-chosen slot key.
    pub fn with_key(conn: &'conn mut Connection, key: i64) -> RepoResult<Self> {
        ensure_slot_connection_ready(conn)?;
        Ok(Self { conn, key })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> RepoResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM persist_slots WHERE key = ?1;",
                [self.key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        debug!(
            "event=snapshot_load module=repo status=ok key={} found={} bytes={}",
            self.key,
            value.is_some(),
            value.as_ref().map_or(0, Vec::len)
        );
        Ok(value)
    }

    fn save_snapshot(&mut self, bytes: &[u8]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO persist_slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, bytes],
        )?;
        tx.commit()?;
        info!(
            "event=snapshot_save module=repo status=ok key={} bytes={}",
            self.key,
            bytes.len()
        );
        Ok(())
    }

    fn clear_snapshot(&mut self) -> RepoResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM persist_slots WHERE key = ?1;", [self.key])?;
        info!(
            "event=snapshot_clear module=repo status=ok key={} removed={}",
            self.key, removed
        );
        Ok(())
    }
}

fn ensure_slot_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "persist_slots")? {
        return Err(RepoError::MissingRequiredTable("persist_slots"));
    }

    for column in ["key", "value", "updated_at"] {
        if !table_has_column(conn, "persist_slots", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "persist_slots",
                column,
            });
        }
    }

    Ok(())
}
