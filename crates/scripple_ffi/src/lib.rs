//! Host UI bindings for Scripple core.

pub mod api;
