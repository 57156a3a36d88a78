//! Award feedback
//!
//! Turns award outcomes into "+N XP" popups, a level bar pulse, a level-up
//! celebration and achievement cues. None of it touches persisted state.

use std::time::Duration;

use crate::audio::{Cue, CuePlayer, Silent};
use crate::config::FeedbackTimings;
use crate::progression::Advance;

use super::clock::{Clock, MonotonicClock};
use super::countdown::Countdown;

/// Screen cell where a popup is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    pub x: u16,
    pub y: u16,
}

impl Origin {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Unique popup handle, issued in award order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId(pub u64);

/// A floating "+N XP" marker
#[derive(Debug, Clone, PartialEq)]
pub struct XpPopup {
    pub id: PopupId,
    pub amount: u64,
    pub origin: Origin,
    window: Countdown,
}

impl XpPopup {
    /// How far the popup has floated, 0.0 - 1.0
    pub fn rise(&self, now: Duration) -> f32 {
        self.window.progress(now)
    }
}

/// Level-up celebration state
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpBanner {
    /// Level reached
    pub level: u32,
    /// Levels crossed by the award that raised the banner
    pub levels_gained: u32,
    window: Countdown,
}

/// Owns every piece of transient award feedback
pub struct FeedbackEmitter {
    clock: Box<dyn Clock>,
    cues: Box<dyn CuePlayer>,
    timings: FeedbackTimings,
    popups: Vec<XpPopup>,
    next_popup_id: u64,
    pulse: Option<Countdown>,
    level_up: Option<LevelUpBanner>,
    default_origin: Origin,
}

impl FeedbackEmitter {
    pub fn new(timings: FeedbackTimings, clock: Box<dyn Clock>, cues: Box<dyn CuePlayer>) -> Self {
        Self {
            clock,
            cues,
            timings,
            popups: Vec::new(),
            next_popup_id: 0,
            pulse: None,
            level_up: None,
            default_origin: Origin::default(),
        }
    }

    /// Real clock, no sound
    pub fn quiet(timings: FeedbackTimings) -> Self {
        Self::new(timings, Box::new(MonotonicClock::new()), Box::new(Silent))
    }

    pub fn timings(&self) -> &FeedbackTimings {
        &self.timings
    }

    /// Where popups go when the caller supplies no origin
    pub fn set_default_origin(&mut self, origin: Origin) {
        self.default_origin = origin;
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Record feedback for one award.
    ///
    /// Zero awards produce nothing. Returns the new popup's id.
    pub fn emit(&mut self, advance: &Advance, origin: Option<Origin>) -> Option<PopupId> {
        if advance.amount == 0 {
            return None;
        }

        let now = self.clock.now();
        self.prune(now);

        let id = PopupId(self.next_popup_id);
        self.next_popup_id += 1;
        self.popups.push(XpPopup {
            id,
            amount: advance.amount,
            origin: origin.unwrap_or(self.default_origin),
            window: Countdown::new(now, self.timings.popup()),
        });

        self.pulse = Some(Countdown::new(now, self.timings.pulse()));
        self.cues.play(Cue::for_award(advance.amount, self.timings.major_tone_threshold));

        if advance.leveled_up() {
            self.level_up = Some(LevelUpBanner {
                level: advance.profile.level,
                levels_gained: advance.levels_gained,
                window: Countdown::new(now, self.timings.level_up()),
            });
            self.cues.play(Cue::LevelUp);
        }

        Some(id)
    }

    /// Drop everything whose window has closed
    pub fn update(&mut self) {
        let now = self.clock.now();
        self.prune(now);
    }

    fn prune(&mut self, now: Duration) {
        self.popups.retain(|popup| popup.window.is_active(now));
        if self.pulse.is_some_and(|pulse| !pulse.is_active(now)) {
            self.pulse = None;
        }
        if self.level_up.as_ref().is_some_and(|banner| !banner.window.is_active(now)) {
            self.level_up = None;
        }
    }

    /// Popups still on screen, oldest first
    pub fn popups(&self) -> impl Iterator<Item = &XpPopup> {
        let now = self.clock.now();
        self.popups.iter().filter(move |popup| popup.window.is_active(now))
    }

    pub fn popup_count(&self) -> usize {
        self.popups().count()
    }

    /// Level bar highlight after an award
    pub fn is_gaining_xp(&self) -> bool {
        let now = self.clock.now();
        self.pulse.is_some_and(|pulse| pulse.is_active(now))
    }

    pub fn is_leveling_up(&self) -> bool {
        self.level_up().is_some()
    }

    pub fn level_up(&self) -> Option<&LevelUpBanner> {
        let now = self.clock.now();
        self.level_up.as_ref().filter(|banner| banner.window.is_active(now))
    }
}
