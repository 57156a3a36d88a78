//! Per-user progression session
//!
//! Owns the in-memory profile of one user together with its store and the
//! feedback emitter. Every award goes through `Session::award`, which
//! updates memory, persists and raises feedback as one step.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ProgressionConfig;
use crate::feedback::{FeedbackEmitter, Origin};
use crate::profile::{ProfileStore, StoreError, UserId, UserProfile};
use crate::progression::{self, Advance, AwardSource};

/// Session shared between several owners; the lock serializes
/// read-modify-write of the profile
pub type SharedSession = Arc<Mutex<Session>>;

pub struct Session {
    user: UserId,
    profile: UserProfile,
    config: ProgressionConfig,
    store: Box<dyn ProfileStore>,
    feedback: FeedbackEmitter,
    /// Set when the last save failed, cleared by the next good one
    unsaved: bool,
}

impl Session {
    /// Open the session for `user`, loading its stored profile.
    ///
    /// A missing, unreadable or corrupted profile starts from the default
    /// one; the stored file is left alone until the next award.
    pub fn open(
        user: UserId,
        config: ProgressionConfig,
        store: Box<dyn ProfileStore>,
        feedback: FeedbackEmitter,
    ) -> Self {
        let profile = match store.load(&user) {
            Ok(Some(profile)) => {
                log::info!("Profile loaded for user {}", user);
                profile.normalized(&config.curve)
            }
            Ok(None) => {
                log::info!("Creating new profile for user {}", user);
                UserProfile::new(&config.curve)
            }
            Err(e) => {
                log::warn!("Failed to load profile for user {}: {}, starting fresh", user, e);
                UserProfile::new(&config.curve)
            }
        };

        Self {
            user,
            profile,
            config,
            store,
            feedback,
            unsaved: false,
        }
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn feedback(&self) -> &FeedbackEmitter {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackEmitter {
        &mut self.feedback
    }

    /// Whether the in-memory profile is ahead of storage
    pub fn has_unsaved_progress(&self) -> bool {
        self.unsaved
    }

    /// Grant `amount` XP.
    ///
    /// A failing store never loses the award: memory keeps it and the next
    /// successful save writes the whole profile.
    pub fn award(&mut self, amount: u64, origin: Option<Origin>) -> Advance {
        let advance = progression::award(&self.profile, amount, &self.config.curve);
        if amount == 0 {
            return advance;
        }

        self.profile = advance.profile.clone();
        if let Err(e) = self.persist() {
            log::warn!("Failed to save profile for user {}: {}", self.user, e);
        }

        if advance.leveled_up() {
            log::info!(
                "User {} reached level {} (+{} level(s))",
                self.user,
                self.profile.level,
                advance.levels_gained
            );
        }
        self.feedback.emit(&advance, origin);
        advance
    }

    /// Grant the table amount for a completed action
    pub fn award_for(&mut self, source: AwardSource, origin: Option<Origin>) -> Advance {
        let amount = self.config.awards.amount(source);
        log::debug!("{} completed, granting {} XP", source.name(), amount);
        self.award(amount, origin)
    }

    /// Write the current profile to the store
    pub fn persist(&mut self) -> Result<(), StoreError> {
        match self.store.save(&self.user, &self.profile) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                self.unsaved = true;
                Err(e)
            }
        }
    }

    /// Expire finished feedback; call once per frame
    pub fn update(&mut self) {
        self.feedback.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::config::FeedbackTimings;
    use crate::feedback::ManualClock;
    use crate::profile::MemoryProfileStore;

    struct BrokenStore;

    impl ProfileStore for BrokenStore {
        fn load(&self, _user: &UserId) -> Result<Option<UserProfile>, StoreError> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }

        fn save(&self, _user: &UserId, _profile: &UserProfile) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn emitter(clock: &ManualClock) -> FeedbackEmitter {
        FeedbackEmitter::new(FeedbackTimings::default(), Box::new(clock.clone()), Box::new(Silent))
    }

    fn user() -> UserId {
        UserId::new("tester").unwrap()
    }

    #[test]
    fn test_new_user_gets_default_profile() {
        let clock = ManualClock::new();
        let session = Session::open(
            user(),
            ProgressionConfig::default(),
            Box::new(MemoryProfileStore::new()),
            emitter(&clock),
        );
        assert_eq!(session.profile(), &UserProfile::default());
    }

    #[test]
    fn test_award_persists() {
        let clock = ManualClock::new();
        let store = Arc::new(MemoryProfileStore::new());
        let mut session = Session::open(
            user(),
            ProgressionConfig::default(),
            Box::new(store.clone()),
            emitter(&clock),
        );

        let advance = session.award_for(AwardSource::ThoughtRecordFiled, None);
        assert_eq!(advance.amount, 100);
        assert_eq!(store.load(&user()).unwrap().unwrap().points, 100);
        assert!(!session.has_unsaved_progress());
    }

    #[test]
    fn test_store_failure_keeps_award_in_memory() {
        let clock = ManualClock::new();
        let mut session = Session::open(
            user(),
            ProgressionConfig::default(),
            Box::new(BrokenStore),
            emitter(&clock),
        );
        assert_eq!(session.profile(), &UserProfile::default());

        session.award(480, None);
        let advance = session.award(30, None);
        assert_eq!(advance.levels_gained, 1);
        assert_eq!(session.profile().points, 10);
        assert_eq!(session.profile().level, 2);
        assert!(session.has_unsaved_progress());
        assert_eq!(session.feedback().popup_count(), 2);
    }

    #[test]
    fn test_zero_award_changes_nothing() {
        let clock = ManualClock::new();
        let store = Arc::new(MemoryProfileStore::new());
        let mut session = Session::open(
            user(),
            ProgressionConfig::default(),
            Box::new(store.clone()),
            emitter(&clock),
        );

        let advance = session.award(0, None);
        assert_eq!(advance.levels_gained, 0);
        assert_eq!(session.profile(), &UserProfile::default());
        assert!(store.is_empty());
        assert_eq!(session.feedback().popup_count(), 0);
    }

    #[test]
    fn test_feedback_expires_through_update() {
        let clock = ManualClock::new();
        let mut session = Session::open(
            user(),
            ProgressionConfig::default(),
            Box::new(MemoryProfileStore::new()),
            emitter(&clock),
        );
        session.award_for(AwardSource::DailyConsult, None);
        session.award_for(AwardSource::DailyConsult, None);
        session.award_for(AwardSource::DailyConsult, None);
        assert!(session.feedback().is_leveling_up());

        clock.advance_ms(3000);
        session.update();
        assert!(!session.feedback().is_leveling_up());
        assert_eq!(session.feedback().popup_count(), 0);
    }

    #[test]
    fn test_shared_session_serializes_awards() {
        let store = Arc::new(MemoryProfileStore::new());
        let shared = Session::open(
            user(),
            ProgressionConfig::default(),
            Box::new(store.clone()),
            FeedbackEmitter::quiet(FeedbackTimings::default()),
        )
        .into_shared();

        for _ in 0..10 {
            shared.lock().award_for(AwardSource::ChatReply, None);
        }
        assert_eq!(shared.lock().profile().points, 50);
        assert_eq!(store.load(&user()).unwrap().unwrap().points, 50);
    }
}
