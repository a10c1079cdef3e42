//! In-memory note collection.
//!
//! # Responsibility
//! - Hold the ordered note list between startup load and shutdown save.
//! - Keep capacity and index checks at the API boundary.
//!
//! # Invariants
//! - The store is single-owner and single-threaded; no internal locking.

pub mod note_store;
