//! Core domain logic for Scripple, a dictated note list for the wrist.
//! This crate is the single source of truth for note list invariants.

pub mod config;
pub mod db;
pub mod dictation;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use dictation::{
    dictation_channel, DictationFailure, DictationOutcome, DictationResolution,
    DictationResponder, PendingDictation,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, MAX_NOTE_BYTES};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, DATA_STORE_KEY,
};
pub use service::scripple_service::{
    LoadSource, MenuAction, MenuRow, ScrippleService, ServiceError, ServiceResult, ADD_ROW,
};
pub use store::note_store::{
    ChangeObserver, NoteStore, StoreError, StoreResult, DEFAULT_CAPACITY, SNAPSHOT_VERSION,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
