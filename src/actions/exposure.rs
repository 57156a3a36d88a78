//! Graded exposure ladder
//!
//! Steps are rated on the SUDS scale (0 - 100). Only validating a pending
//! step earns XP; creating or editing one does not.

use serde::{Deserialize, Serialize};

use crate::progression::AwardSource;
use super::ActionError;

/// Highest SUDS rating
pub const MAX_SUDS: u8 = 100;

/// One rung of the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureStep {
    pub id: u64,
    pub behavior: String,
    /// Expected discomfort, SUDS
    pub rating: u8,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExposureLadder {
    steps: Vec<ExposureStep>,
}

impl ExposureLadder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pending step and return its id
    pub fn add(&mut self, behavior: &str, rating: u8) -> Result<u64, ActionError> {
        let behavior = behavior.trim();
        if behavior.is_empty() {
            return Err(ActionError::MissingField("behavior"));
        }

        let id = self.steps.iter().map(|s| s.id).max().map_or(1, |max| max + 1);
        self.steps.push(ExposureStep {
            id,
            behavior: behavior.to_string(),
            rating: rating.min(MAX_SUDS),
            completed: false,
        });
        Ok(id)
    }

    /// Change a step's text and rating, keeping its completion state
    pub fn edit(&mut self, id: u64, behavior: &str, rating: u8) -> Result<(), ActionError> {
        let behavior = behavior.trim();
        if behavior.is_empty() {
            return Err(ActionError::MissingField("behavior"));
        }
        let step = self.get_mut(id)?;
        step.behavior = behavior.to_string();
        step.rating = rating.min(MAX_SUDS);
        Ok(())
    }

    /// Mark a step done; a step already done earns nothing
    pub fn validate(&mut self, id: u64) -> Result<Option<AwardSource>, ActionError> {
        let step = self.get_mut(id)?;
        if step.completed {
            return Ok(None);
        }
        step.completed = true;
        Ok(Some(AwardSource::ExposureValidated))
    }

    pub fn get(&self, id: u64) -> Option<&ExposureStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut ExposureStep, ActionError> {
        self.steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ActionError::UnknownStep(id))
    }

    /// Steps in insertion order
    pub fn steps(&self) -> &[ExposureStep] {
        &self.steps
    }

    /// Pending steps, easiest first
    pub fn pending(&self) -> Vec<&ExposureStep> {
        let mut pending: Vec<_> = self.steps.iter().filter(|s| !s.completed).collect();
        pending.sort_by_key(|s| (s.rating, s.id));
        pending
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_awards_once() {
        let mut ladder = ExposureLadder::new();
        let id = ladder.add("Talk to a stranger for 2 minutes", 60).unwrap();

        assert_eq!(ladder.validate(id), Ok(Some(AwardSource::ExposureValidated)));
        assert_eq!(ladder.validate(id), Ok(None));
        assert!(ladder.get(id).unwrap().completed);
    }

    #[test]
    fn test_edit_keeps_state() {
        let mut ladder = ExposureLadder::new();
        let id = ladder.add("Call the clinic", 40).unwrap();
        ladder.validate(id).unwrap();
        ladder.edit(id, "Call the clinic and book", 150).unwrap();

        let step = ladder.get(id).unwrap();
        assert_eq!(step.behavior, "Call the clinic and book");
        assert_eq!(step.rating, MAX_SUDS);
        assert!(step.completed);
    }

    #[test]
    fn test_unknown_step() {
        let mut ladder = ExposureLadder::new();
        assert_eq!(ladder.validate(9), Err(ActionError::UnknownStep(9)));
        assert_eq!(ladder.edit(9, "x", 10), Err(ActionError::UnknownStep(9)));
    }

    #[test]
    fn test_empty_behavior_rejected() {
        let mut ladder = ExposureLadder::new();
        assert_eq!(ladder.add("  ", 10), Err(ActionError::MissingField("behavior")));
        assert!(ladder.is_empty());
    }

    #[test]
    fn test_pending_sorted_by_rating() {
        let mut ladder = ExposureLadder::new();
        let hard = ladder.add("Give a talk", 90).unwrap();
        let easy = ladder.add("Eat alone in a cafe", 20).unwrap();
        let done = ladder.add("Ask a question", 30).unwrap();
        ladder.validate(done).unwrap();

        let order: Vec<u64> = ladder.pending().iter().map(|s| s.id).collect();
        assert_eq!(order, vec![easy, hard]);
    }
}
