//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract used at startup load and shutdown save.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories move opaque snapshot bytes; they never decode notes.

pub mod snapshot_repo;
