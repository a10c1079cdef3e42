//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and repository calls into UI-level use cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod scripple_service;
