//! SQLite storage bootstrap for persisted note slots.
//!
//! # Responsibility
//! - Open file or in-memory connections with the slot schema in place.
//! - Answer schema introspection questions for the repository layer.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - No slot is read or written before `ensure_schema` succeeds.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, schema_version, SCHEMA_VERSION};
