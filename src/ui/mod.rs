// CullTracker - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state, session), core (read-only models), egui.
// Must NOT depend on: platform, direct I/O (file dialogs hand paths to app).

pub mod panels;
pub mod theme;
