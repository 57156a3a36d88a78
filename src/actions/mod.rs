//! Action sources
//!
//! The user-facing features that report completed actions to the
//! progression session. Each operation returns the `AwardSource` to grant,
//! or nothing when the action earns no XP.

pub mod habits;
pub mod journal;
pub mod exposure;
pub mod chat;
pub mod reflection;
pub mod records;

use thiserror::Error;

pub use habits::{Habit, HabitStatus};
pub use journal::{Distortion, Journal, ThoughtDraft, ThoughtRecord};
pub use exposure::{ExposureLadder, ExposureStep, MAX_SUDS};
pub use chat::{ChatClient, ChatError, ChatTurn, Conversation, Speaker};
pub use reflection::{DailyReflection, WIN_COUNT};
pub use records::UserRecords;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("No exposure step with id {0}")]
    UnknownStep(u64),
}
