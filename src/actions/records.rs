//! Persisted action-source data
//!
//! Habits, journal, exposure ladder and daily reflection of one user, each
//! stored under its own key next to the profile.

use crate::profile::{LocalStorage, StoreError, UserId};
use super::exposure::ExposureLadder;
use super::habits::HabitStatus;
use super::journal::Journal;
use super::reflection::DailyReflection;

pub const HABITS_RECORD: &str = "habits";
pub const JOURNAL_RECORD: &str = "rpds";
pub const EXPOSURES_RECORD: &str = "exposures";
pub const REFLECTION_RECORD: &str = "reflection";

/// Everything the action sources keep for one user
#[derive(Debug, Clone, Default)]
pub struct UserRecords {
    pub habits: HabitStatus,
    pub journal: Journal,
    pub ladder: ExposureLadder,
    pub reflection: DailyReflection,
}

impl UserRecords {
    /// Load all records, substituting empty ones for anything missing or
    /// unreadable
    pub fn load(storage: &LocalStorage, user: &UserId) -> Self {
        Self {
            habits: load_or_default(storage, user, HABITS_RECORD),
            journal: load_or_default(storage, user, JOURNAL_RECORD),
            ladder: load_or_default(storage, user, EXPOSURES_RECORD),
            reflection: load_or_default(storage, user, REFLECTION_RECORD),
        }
    }

    pub fn save_habits(&self, storage: &LocalStorage, user: &UserId) -> Result<(), StoreError> {
        storage.save(user, HABITS_RECORD, &self.habits)
    }

    pub fn save_journal(&self, storage: &LocalStorage, user: &UserId) -> Result<(), StoreError> {
        storage.save(user, JOURNAL_RECORD, &self.journal)
    }

    pub fn save_ladder(&self, storage: &LocalStorage, user: &UserId) -> Result<(), StoreError> {
        storage.save(user, EXPOSURES_RECORD, &self.ladder)
    }

    pub fn save_reflection(&self, storage: &LocalStorage, user: &UserId) -> Result<(), StoreError> {
        storage.save(user, REFLECTION_RECORD, &self.reflection)
    }
}

fn load_or_default<T>(storage: &LocalStorage, user: &UserId, record: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match storage.load(user, record) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Failed to load {} for user {}: {}, starting empty", record, user, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Habit, ThoughtDraft};
    use tempfile::TempDir;

    #[test]
    fn test_records_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let user = UserId::new("u7").unwrap();

        let mut records = UserRecords::default();
        records.habits.toggle(Habit::Mindfulness);
        records.ladder.add("Take the bus", 35).unwrap();
        records
            .journal
            .file(ThoughtDraft {
                situation: "Bus".to_string(),
                automatic_thought: "I'll panic".to_string(),
                emotion: "Fear".to_string(),
                rational_response: "I rode it last week".to_string(),
                ..ThoughtDraft::default()
            })
            .unwrap();

        records.save_habits(&storage, &user).unwrap();
        records.save_journal(&storage, &user).unwrap();
        records.save_ladder(&storage, &user).unwrap();

        let loaded = UserRecords::load(&storage, &user);
        assert_eq!(loaded.habits, records.habits);
        assert_eq!(loaded.journal, records.journal);
        assert_eq!(loaded.ladder, records.ladder);
    }

    #[test]
    fn test_reflection_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let user = UserId::new("u9").unwrap();

        let mut records = UserRecords::default();
        records.reflection.update("Quiet morning", ["Finished the report", "Called mom", ""]);
        records.save_reflection(&storage, &user).unwrap();
        assert!(storage
            .record_path(&user, REFLECTION_RECORD)
            .ends_with("user_u9_reflection.json"));

        let loaded = UserRecords::load(&storage, &user);
        assert_eq!(loaded.reflection, records.reflection);
        assert!(loaded.habits == HabitStatus::default());
    }

    #[test]
    fn test_corrupted_record_starts_empty() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let user = UserId::new("u8").unwrap();
        std::fs::write(storage.record_path(&user, HABITS_RECORD), "[[[").unwrap();

        let loaded = UserRecords::load(&storage, &user);
        assert_eq!(loaded.habits, HabitStatus::default());
    }
}
