// CullTracker - platform/mod.rs
//
// Platform abstraction layer: directory resolution, config.toml, file writes.
// Dependencies: directories, toml, core::model value types.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
