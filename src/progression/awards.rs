//! Award table
//!
//! Fixed XP grants for each user action that completes.

use serde::{Deserialize, Serialize};

/// Actions that grant XP when they complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AwardSource {
    /// A habit switched on for the day (switching off grants nothing)
    HabitActivated,
    /// A thought record was filed in the journal
    ThoughtRecordFiled,
    /// An exposure step was marked as done
    ExposureValidated,
    /// A chat message got a reply from the assistant
    ChatReply,
    /// The daily consult prompt was opened
    DailyConsult,
}

impl AwardSource {
    pub const ALL: [AwardSource; 5] = [
        AwardSource::HabitActivated,
        AwardSource::ThoughtRecordFiled,
        AwardSource::ExposureValidated,
        AwardSource::ChatReply,
        AwardSource::DailyConsult,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AwardSource::HabitActivated => "Habit",
            AwardSource::ThoughtRecordFiled => "Thought record",
            AwardSource::ExposureValidated => "Exposure step",
            AwardSource::ChatReply => "Chat",
            AwardSource::DailyConsult => "Daily consult",
        }
    }
}

/// XP granted per source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardTable {
    pub habit_activated: u64,
    pub thought_record_filed: u64,
    pub exposure_validated: u64,
    pub chat_reply: u64,
    pub daily_consult: u64,
}

impl Default for AwardTable {
    fn default() -> Self {
        Self {
            habit_activated: 30,
            thought_record_filed: 100,
            exposure_validated: 75,
            chat_reply: 5,
            daily_consult: 200,
        }
    }
}

impl AwardTable {
    /// XP for a completed action
    pub fn amount(&self, source: AwardSource) -> u64 {
        match source {
            AwardSource::HabitActivated => self.habit_activated,
            AwardSource::ThoughtRecordFiled => self.thought_record_filed,
            AwardSource::ExposureValidated => self.exposure_validated,
            AwardSource::ChatReply => self.chat_reply,
            AwardSource::DailyConsult => self.daily_consult,
        }
    }
}
