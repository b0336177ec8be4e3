// CullTracker - core/mod.rs
//
// Core business logic layer: tournament model, weight arithmetic, exports.
// Dependencies: serde, chrono, regex, csv.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod model;
pub mod weight;
