//! User Interface module
//!
//! Terminal UI using ratatui: level bar, action tabs and award popups.

pub mod app;
pub mod form;

pub use app::App;
pub use form::{FormAction, TextForm};
