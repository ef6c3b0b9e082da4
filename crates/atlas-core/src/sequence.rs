//! Named sequences
//!
//! A [`SoloSequence`] is a reusable list of units for one dancer; it does
//! not know which role dances it. A [`PartnerSequence`] pairs what lead and
//! follow do on each beat.

use serde::{Deserialize, Serialize};

use crate::state::{PartnerState, PartnerStepUnit};
use crate::step::Foot;
use crate::unit::StepUnit;
use crate::Result;

/// The lead's first step is with the left foot, so weight starts on the right.
pub const LEAD_INITIAL_WEIGHT: Foot = Foot::Right;

/// The follow's first step is with the right foot, so weight starts on the left.
pub const FOLLOW_INITIAL_WEIGHT: Foot = Foot::Left;

/// Which side of the partnership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DancerRole {
    Lead,
    Follow,
}

impl DancerRole {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Lead => Self::Follow,
            Self::Follow => Self::Lead,
        }
    }

    /// Weight foot this role starts a partner sequence on
    pub fn initial_weight(&self) -> Foot {
        match self {
            Self::Lead => LEAD_INITIAL_WEIGHT,
            Self::Follow => FOLLOW_INITIAL_WEIGHT,
        }
    }
}

/// Units danced by one dancer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloSequence {
    /// Set by the store when saved; `None` for curated and generated sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub units: Vec<StepUnit>,
}

impl SoloSequence {
    pub fn new(units: Vec<StepUnit>) -> Self {
        Self {
            id: None,
            title: None,
            units,
        }
    }

    pub fn titled(title: impl Into<String>, units: Vec<StepUnit>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            units,
        }
    }

    /// Weight foot after dancing every unit from `start`
    pub fn end_foot(&self, start: Foot) -> Result<Foot> {
        self.units
            .iter()
            .try_fold(start, |foot, unit| unit.compute_post_state(foot))
    }

    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self
                .units
                .iter()
                .map(StepUnit::label)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Lead and follow units, beat by beat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerSequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub beats: Vec<PartnerStepUnit>,
}

impl PartnerSequence {
    pub fn new(beats: Vec<PartnerStepUnit>) -> Self {
        Self {
            id: None,
            title: None,
            beats,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Units danced by one role, as a solo sequence
    pub fn sequence_for(&self, role: DancerRole) -> SoloSequence {
        let units = self
            .beats
            .iter()
            .map(|beat| match role {
                DancerRole::Lead => beat.lead.clone(),
                DancerRole::Follow => beat.follow.clone(),
            })
            .collect();
        SoloSequence {
            id: None,
            title: self.title.clone(),
            units,
        }
    }

    pub fn lead_sequence(&self) -> SoloSequence {
        self.sequence_for(DancerRole::Lead)
    }

    pub fn follow_sequence(&self) -> SoloSequence {
        self.sequence_for(DancerRole::Follow)
    }

    /// Weights after every beat, starting from the opening convention
    pub fn end_state(&self) -> Result<PartnerState> {
        self.beats
            .iter()
            .try_fold(PartnerState::opening(), |state, beat| beat.apply(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    #[test]
    fn test_solo_end_foot_folds_units() {
        let seq = SoloSequence::new(vec![
            StepUnit::one(Step::FORWARD),
            StepUnit::two(Step::BACKWARD, None, Step::FORWARD),
        ]);
        assert_eq!(seq.end_foot(Foot::Left).unwrap(), Foot::Left);

        let seq = SoloSequence::new(vec![StepUnit::three(Step::SIDE, None, Step::SIDE)]);
        assert_eq!(seq.end_foot(Foot::Left).unwrap(), Foot::Right);
    }

    #[test]
    fn test_empty_solo_sequence_keeps_foot() {
        let seq = SoloSequence::new(vec![]);
        assert_eq!(seq.end_foot(Foot::Right).unwrap(), Foot::Right);
    }

    #[test]
    fn test_role_initial_weights() {
        assert_eq!(DancerRole::Lead.initial_weight(), Foot::Right);
        assert_eq!(DancerRole::Follow.initial_weight(), Foot::Left);
        assert_eq!(DancerRole::Lead.opposite(), DancerRole::Follow);
    }

    #[test]
    fn test_partner_projections() {
        let forward = StepUnit::two(Step::FORWARD, None, Step::BACKWARD);
        let backward = StepUnit::two(Step::BACKWARD, None, Step::FORWARD);
        let seq = PartnerSequence::new(vec![
            PartnerStepUnit::new(backward.clone(), forward.clone()),
            PartnerStepUnit::new(forward.clone(), backward.clone()),
        ])
        .with_title("Linear Basic");

        assert_eq!(seq.lead_sequence().units, vec![backward.clone(), forward.clone()]);
        assert_eq!(seq.follow_sequence().units, vec![forward, backward]);
        assert_eq!(seq.lead_sequence().title.as_deref(), Some("Linear Basic"));
    }

    #[test]
    fn test_partner_end_state() {
        let basic = StepUnit::two(Step::IN_PLACE, None, Step::IN_PLACE);
        let one_beat =
            PartnerSequence::new(vec![PartnerStepUnit::new(basic.clone(), basic.clone())]);
        assert_eq!(one_beat.end_state().unwrap(), PartnerState::new(Foot::Left, Foot::Right));

        let two_beats = PartnerSequence::new(vec![
            PartnerStepUnit::new(basic.clone(), basic.clone()),
            PartnerStepUnit::new(basic.clone(), basic),
        ]);
        assert_eq!(two_beats.end_state().unwrap(), PartnerState::opening());
    }
}
