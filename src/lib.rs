//! LivreMente - a terminal self-tracking companion
//!
//! Habit check-ins, thought records and exposure ladders, tied together by
//! an XP/level progression that rewards every completed action.

pub mod progression;
pub mod profile;
pub mod config;
pub mod feedback;
pub mod audio;
pub mod actions;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use config::ProgressionConfig;
pub use profile::{UserId, UserProfile};
pub use progression::{Advance, AwardSource};
pub use session::{Session, SharedSession};
