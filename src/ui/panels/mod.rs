// CullTracker - ui/panels/mod.rs

pub mod about;
pub mod cull_prompt;
pub mod start;
pub mod summary;
pub mod tracker;
