//! Daily habit check-ins

use serde::{Deserialize, Serialize};

use crate::progression::AwardSource;

/// Tracked daily habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Habit {
    Sleep,
    Nutrition,
    Exercise,
    Mindfulness,
    NaturalLight,
    Hydration,
}

impl Habit {
    pub const ALL: [Habit; 6] = [
        Habit::NaturalLight,
        Habit::Hydration,
        Habit::Sleep,
        Habit::Exercise,
        Habit::Nutrition,
        Habit::Mindfulness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Habit::Sleep => "Restful Sleep",
            Habit::Nutrition => "Nutrition",
            Habit::Exercise => "Movement",
            Habit::Mindfulness => "Mindfulness",
            Habit::NaturalLight => "Natural Light",
            Habit::Hydration => "Hydration",
        }
    }
}

/// Today's check-ins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitStatus {
    pub sleep: bool,
    pub nutrition: bool,
    pub exercise: bool,
    pub mindfulness: bool,
    pub natural_light: bool,
    pub hydration: bool,
}

impl HabitStatus {
    pub fn is_done(&self, habit: Habit) -> bool {
        match habit {
            Habit::Sleep => self.sleep,
            Habit::Nutrition => self.nutrition,
            Habit::Exercise => self.exercise,
            Habit::Mindfulness => self.mindfulness,
            Habit::NaturalLight => self.natural_light,
            Habit::Hydration => self.hydration,
        }
    }

    fn slot(&mut self, habit: Habit) -> &mut bool {
        match habit {
            Habit::Sleep => &mut self.sleep,
            Habit::Nutrition => &mut self.nutrition,
            Habit::Exercise => &mut self.exercise,
            Habit::Mindfulness => &mut self.mindfulness,
            Habit::NaturalLight => &mut self.natural_light,
            Habit::Hydration => &mut self.hydration,
        }
    }

    /// Flip a habit; only switching it on earns XP
    pub fn toggle(&mut self, habit: Habit) -> Option<AwardSource> {
        let slot = self.slot(habit);
        *slot = !*slot;
        slot.then_some(AwardSource::HabitActivated)
    }

    pub fn completed_count(&self) -> usize {
        Habit::ALL.iter().filter(|h| self.is_done(**h)).count()
    }
}
