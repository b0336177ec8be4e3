// CullTracker - app/mod.rs
//
// Application layer: tournament session orchestration and UI-facing state.
// Dependencies: core layer; platform for config values and atomic writes.
// Must NOT depend on: ui.

pub mod session;
pub mod state;
