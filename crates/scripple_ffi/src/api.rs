//! FFI use-case API for the watch UI shell.
//!
//! # Responsibility
//! - Expose note list use cases to the host UI via FRB.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized by one process-wide lock; the store is single-owner.
//! - Indices are 0-based store indices; the UI owns the add-row offset.

use log::warn;
use scripple_core::db::open_db;
use scripple_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, ScrippleService, ServiceResult, SqliteSnapshotRepository,
};
use std::sync::{Mutex, OnceLock, PoisonError};

static ENTRY_CONFIG: OnceLock<AppConfig> = OnceLock::new();
static ENTRY_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Snapshot of the note list for menu rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// Note texts in display order.
    pub items: Vec<String>,
    /// Store capacity; the UI may hide the add row when `items.len() == capacity`.
    pub capacity: u32,
    /// Whether the list was read successfully.
    pub ok: bool,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for note use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Store index affected by the operation.
    pub index: Option<u32>,
    /// Note text for read operations.
    pub text: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, index: usize, text: Option<String>) -> Self {
        Self {
            ok: true,
            index: Some(to_u32(index)),
            text,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            index: None,
            text: None,
            message: message.into(),
        }
    }
}

/// Lists all notes in display order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failure returns an empty list with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    match with_service(false, |service| {
        Ok((service.store().texts(), service.store().capacity()))
    }) {
        Ok((items, capacity)) => NotesListResponse {
            message: format!("{} of {} note(s).", items.len(), capacity),
            items,
            capacity: to_u32(capacity),
            ok: true,
        },
        Err(err) => NotesListResponse {
            items: Vec::new(),
            capacity: 0,
            ok: false,
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Reads the full text of the note at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(index: u32) -> NoteActionResponse {
    let index = index as usize;
    match with_service(false, |service| {
        Ok(service.note(index)?.to_string())
    }) {
        Ok(text) => NoteActionResponse::success("Note loaded.", index, Some(text)),
        Err(err) => NoteActionResponse::failure(format!("note_get failed: {err}")),
    }
}

/// Appends a dictated note and persists the list.
///
/// # FFI contract
/// - Text is stored as delivered by dictation; it is not trimmed.
/// - Text longer than the note bound is truncated, not rejected.
/// - A full list returns `ok=false` and leaves storage unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(text: String) -> NoteActionResponse {
    match with_service(true, |service| service.add_note(text)) {
        Ok(index) => NoteActionResponse::success("Note created.", index, None),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Deletes the note at `index` and persists the list.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(index: u32) -> NoteActionResponse {
    let index = index as usize;
    match with_service(true, |service| service.delete_note(index)) {
        Ok(()) => NoteActionResponse::success("Note deleted.", index, None),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

fn resolve_entry_config() -> &'static AppConfig {
    ENTRY_CONFIG.get_or_init(AppConfig::from_env)
}

fn with_service<T>(
    persist: bool,
    f: impl FnOnce(&mut ScrippleService<SqliteSnapshotRepository<'_>>) -> ServiceResult<T>,
) -> Result<T, String> {
    // A panicked holder leaves no partial state behind; storage is only
    // written by a completed `shutdown`.
    let _guard = ENTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let config = resolve_entry_config();

    let mut conn =
        open_db(&config.db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let repo = SqliteSnapshotRepository::try_new(&mut conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let mut service = ScrippleService::start(repo, config.capacity)
        .map_err(|err| format!("entry service start failed: {err}"))?;

    let value = f(&mut service).map_err(|err| err.to_string())?;
    if persist {
        service.shutdown().map_err(|err| {
            warn!("event=ffi_save module=ffi status=error error={err}");
            format!("entry save failed: {err}")
        })?;
    }
    Ok(value)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
