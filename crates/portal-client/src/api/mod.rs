// crates/portal-client/src/api/mod.rs
// Typed endpoint bindings, one module per backend area

pub mod admin;
pub mod dashboard;
pub mod groups;
pub mod haiku;
pub mod study_activities;
pub mod study_sessions;
pub mod words;

pub use admin::ResetEndpoint;
pub use haiku::HaikuPages;
