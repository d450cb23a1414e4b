//! Settings domain - portal preferences saved one toggle at a time
//!
//! Settings have no edit mode or snapshot: each change goes straight to the
//! member API and the caller keeps its old value if the call fails.

pub mod actions;

pub use actions::{update_setting, update_settings};
