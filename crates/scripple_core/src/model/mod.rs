//! Domain model for the note list.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Notes are identified by position only; there is no stable id.

pub mod note;
