//! Ephemeral award feedback
//!
//! Popups, level bar pulse and level-up celebration, all timed against an
//! injectable clock.

pub mod clock;
pub mod countdown;
pub mod emitter;

pub use clock::{Clock, MonotonicClock, ManualClock};
pub use countdown::Countdown;
pub use emitter::{FeedbackEmitter, LevelUpBanner, Origin, PopupId, XpPopup};
