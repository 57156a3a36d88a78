//! Thought records (RPD journal)

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::progression::AwardSource;
use super::ActionError;

/// Cognitive distortions a thought can be labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distortion {
    Catastrophizing,
    MindReading,
    Overgeneralization,
    DisqualifyingThePositive,
    EmotionalReasoning,
    AllOrNothing,
    ShouldStatements,
}

impl Distortion {
    pub const ALL: [Distortion; 7] = [
        Distortion::Catastrophizing,
        Distortion::MindReading,
        Distortion::Overgeneralization,
        Distortion::DisqualifyingThePositive,
        Distortion::EmotionalReasoning,
        Distortion::AllOrNothing,
        Distortion::ShouldStatements,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Distortion::Catastrophizing => "Catastrophizing",
            Distortion::MindReading => "Mind Reading",
            Distortion::Overgeneralization => "Overgeneralization",
            Distortion::DisqualifyingThePositive => "Disqualifying the Positive",
            Distortion::EmotionalReasoning => "Emotional Reasoning",
            Distortion::AllOrNothing => "All or Nothing",
            Distortion::ShouldStatements => "Should / Have to",
        }
    }

    /// Next label in the list, wrapping to none after the last
    pub fn cycle(current: Option<Distortion>) -> Option<Distortion> {
        match current {
            None => Some(Distortion::ALL[0]),
            Some(d) => {
                let idx = Distortion::ALL.iter().position(|x| *x == d).unwrap_or(0);
                Distortion::ALL.get(idx + 1).copied()
            }
        }
    }
}

/// One filed thought record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub id: u64,
    /// Unix seconds when the record was filed
    pub recorded_at: u64,
    pub situation: String,
    pub automatic_thought: String,
    #[serde(default)]
    pub distortion: Option<Distortion>,
    pub emotion: String,
    /// Emotional load, 0 - 100
    pub intensity: u8,
    pub rational_response: String,
    #[serde(default)]
    pub outcome: String,
}

/// Form contents before filing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtDraft {
    pub situation: String,
    pub automatic_thought: String,
    pub distortion: Option<Distortion>,
    pub emotion: String,
    pub intensity: u8,
    pub rational_response: String,
    pub outcome: String,
}

impl Default for ThoughtDraft {
    fn default() -> Self {
        Self {
            situation: String::new(),
            automatic_thought: String::new(),
            distortion: None,
            emotion: String::new(),
            intensity: 50,
            rational_response: String::new(),
            outcome: String::new(),
        }
    }
}

impl ThoughtDraft {
    /// Required fields are situation, thought, emotion and rational response
    pub fn validate(&self) -> Result<(), ActionError> {
        let required = [
            ("situation", &self.situation),
            ("automatic thought", &self.automatic_thought),
            ("emotion", &self.emotion),
            ("rational response", &self.rational_response),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ActionError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// Filed records, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    records: Vec<ThoughtRecord>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a completed draft; filing is what earns XP
    pub fn file(&mut self, draft: ThoughtDraft) -> Result<AwardSource, ActionError> {
        draft.validate()?;

        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let id = self.records.iter().map(|r| r.id).max().map_or(1, |max| max + 1);

        self.records.insert(
            0,
            ThoughtRecord {
                id,
                recorded_at,
                situation: draft.situation.trim().to_string(),
                automatic_thought: draft.automatic_thought.trim().to_string(),
                distortion: draft.distortion,
                emotion: draft.emotion.trim().to_string(),
                intensity: draft.intensity.min(100),
                rational_response: draft.rational_response.trim().to_string(),
                outcome: draft.outcome.trim().to_string(),
            },
        );
        Ok(AwardSource::ThoughtRecordFiled)
    }

    pub fn records(&self) -> &[ThoughtRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
