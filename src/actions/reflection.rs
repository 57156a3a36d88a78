//! Daily reflection
//!
//! One gratitude line and three wins of the day. Kept for the user's own
//! review, it earns no XP.

use serde::{Deserialize, Serialize};

/// Number of wins asked for each day
pub const WIN_COUNT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyReflection {
    pub gratitude: String,
    pub wins: [String; WIN_COUNT],
}

impl DailyReflection {
    /// Replace the whole entry, trimming surrounding whitespace
    pub fn update(&mut self, gratitude: &str, wins: [&str; WIN_COUNT]) {
        self.gratitude = gratitude.trim().to_string();
        for (slot, win) in self.wins.iter_mut().zip(wins) {
            *slot = win.trim().to_string();
        }
    }

    /// Wins written so far
    pub fn filled_wins(&self) -> impl Iterator<Item = &str> {
        self.wins.iter().map(String::as_str).filter(|w| !w.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.gratitude.is_empty() && self.filled_wins().next().is_none()
    }
}
