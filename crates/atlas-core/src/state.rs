//! Dancer State Machine
//!
//! A state is either one dancer (solo) or a lead/follow pair (partner).
//! No transition edges are stored: whether a state can take a figure is
//! computed from the figure's declared type and the feet it accepts.
//!
//! ```text
//! Solo(Left)  ⇄  Solo(Right)                 via Figure::Solo
//! Partner(l, f) → Partner(l', f')            via Figure::Partner
//! ```

use serde::{Deserialize, Serialize};

use crate::sequence::{FOLLOW_INITIAL_WEIGHT, LEAD_INITIAL_WEIGHT};
use crate::step::Foot;
use crate::unit::StepUnit;
use crate::{Error, Result};

/// A single dancer's weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoloState {
    pub foot: Foot,
}

impl SoloState {
    pub fn new(foot: Foot) -> Self {
        Self { foot }
    }
}

/// Lead and follow weights. The two dancers are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerState {
    pub lead: SoloState,
    pub follow: SoloState,
}

impl PartnerState {
    pub fn new(lead: Foot, follow: Foot) -> Self {
        Self {
            lead: SoloState::new(lead),
            follow: SoloState::new(follow),
        }
    }

    /// Weights before the first beat: lead steps off with the left foot,
    /// follow with the right.
    pub fn opening() -> Self {
        Self::new(LEAD_INITIAL_WEIGHT, FOLLOW_INITIAL_WEIGHT)
    }
}

/// Whether a figure is danced alone or by a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Solo,
    Partner,
}

/// What the lead and the follow do on the same beat
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerStepUnit {
    pub lead: StepUnit,
    pub follow: StepUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PartnerStepUnit {
    pub fn new(lead: StepUnit, follow: StepUnit) -> Self {
        Self {
            lead,
            follow,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn accepts(&self, state: &PartnerState) -> bool {
        self.lead.valid_entry_feet().contains(&state.lead.foot)
            && self.follow.valid_entry_feet().contains(&state.follow.foot)
    }

    /// Move both dancers through their units
    pub fn apply(&self, state: PartnerState) -> Result<PartnerState> {
        Ok(PartnerState::new(
            self.lead.compute_post_state(state.lead.foot)?,
            self.follow.compute_post_state(state.follow.foot)?,
        ))
    }

    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("{} / {}", self.lead.label(), self.follow.label()),
        }
    }
}

/// A unit tagged with the shape of state it is danced from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "unit", rename_all = "lowercase")]
pub enum Figure {
    Solo(StepUnit),
    Partner(PartnerStepUnit),
}

impl Figure {
    pub fn step_type(&self) -> StepType {
        match self {
            Self::Solo(_) => StepType::Solo,
            Self::Partner(_) => StepType::Partner,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Solo(unit) => unit.label(),
            Self::Partner(pair) => pair.label(),
        }
    }
}

impl From<StepUnit> for Figure {
    fn from(unit: StepUnit) -> Self {
        Self::Solo(unit)
    }
}

impl From<PartnerStepUnit> for Figure {
    fn from(pair: PartnerStepUnit) -> Self {
        Self::Partner(pair)
    }
}

/// Dancer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum State {
    Solo(SoloState),
    Partner(PartnerState),
}

impl State {
    pub fn solo(foot: Foot) -> Self {
        Self::Solo(SoloState::new(foot))
    }

    pub fn partner(lead: Foot, follow: Foot) -> Self {
        Self::Partner(PartnerState::new(lead, follow))
    }

    /// Both solo states
    pub fn all_solo() -> Vec<State> {
        Foot::ALL.into_iter().map(State::solo).collect()
    }

    /// All four partner states, lead foot varying slowest
    pub fn all_partner() -> Vec<State> {
        Foot::ALL
            .into_iter()
            .flat_map(|lead| {
                Foot::ALL
                    .into_iter()
                    .map(move |follow| State::partner(lead, follow))
            })
            .collect()
    }

    pub fn step_type(&self) -> StepType {
        match self {
            Self::Solo(_) => StepType::Solo,
            Self::Partner(_) => StepType::Partner,
        }
    }

    /// Weight feet present in this state (one for solo, lead then follow for partner)
    pub fn feet(&self) -> Vec<Foot> {
        match self {
            Self::Solo(solo) => vec![solo.foot],
            Self::Partner(pair) => vec![pair.lead.foot, pair.follow.foot],
        }
    }

    /// Check whether this state can take the figure: same shape, and every
    /// foot in the state is one the figure's units accept.
    pub fn can_transition_to(&self, figure: &Figure) -> bool {
        match (self, figure) {
            (Self::Solo(solo), Figure::Solo(unit)) => {
                unit.valid_entry_feet().contains(&solo.foot)
            }
            (Self::Partner(pair), Figure::Partner(units)) => units.accepts(pair),
            _ => false,
        }
    }

    /// Dance the figure from this state
    pub fn apply_transition(&self, figure: &Figure) -> Result<State> {
        if !self.can_transition_to(figure) {
            return Err(Error::InvalidTransition {
                from: self.to_string(),
                unit: figure.label(),
            });
        }

        match (self, figure) {
            (Self::Solo(solo), Figure::Solo(unit)) => {
                Ok(State::solo(unit.compute_post_state(solo.foot)?))
            }
            (Self::Partner(pair), Figure::Partner(units)) => {
                Ok(State::Partner(units.apply(*pair)?))
            }
            _ => Err(Error::InvalidTransition {
                from: self.to_string(),
                unit: figure.label(),
            }),
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solo(solo) => write!(f, "Weight on {}", solo.foot),
            Self::Partner(pair) => {
                write!(f, "Lead: {}, Follow: {}", pair.lead.foot, pair.follow.foot)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    fn basic() -> StepUnit {
        StepUnit::two(Step::IN_PLACE, None, Step::IN_PLACE)
    }

    #[test]
    fn test_solo_rejects_partner_figure() {
        let figure = Figure::Partner(PartnerStepUnit::new(basic(), basic()));
        for foot in Foot::ALL {
            assert!(!State::solo(foot).can_transition_to(&figure));
        }
    }

    #[test]
    fn test_partner_rejects_solo_figure() {
        let figure = Figure::Solo(basic());
        for state in State::all_partner() {
            assert!(!state.can_transition_to(&figure));
        }
    }

    #[test]
    fn test_solo_transition_flips() {
        let figure = Figure::Solo(basic());
        let next = State::solo(Foot::Left).apply_transition(&figure).unwrap();
        assert_eq!(next, State::solo(Foot::Right));
    }

    #[test]
    fn test_partner_transition_flips_both() {
        let figure = Figure::Partner(PartnerStepUnit::new(
            basic(),
            StepUnit::one(Step::FORWARD),
        ));
        let next = State::Partner(PartnerState::opening())
            .apply_transition(&figure)
            .unwrap();
        assert_eq!(next, State::partner(Foot::Left, Foot::Right));
    }

    #[test]
    fn test_invalid_transition_errors() {
        let figure = Figure::Partner(PartnerStepUnit::new(basic(), basic()));
        let result = State::solo(Foot::Left).apply_transition(&figure);
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn test_state_space() {
        assert_eq!(State::all_solo().len(), 2);
        let partners = State::all_partner();
        assert_eq!(partners.len(), 4);
        assert_eq!(partners[0], State::partner(Foot::Left, Foot::Left));
        assert_eq!(partners[3], State::partner(Foot::Right, Foot::Right));
    }

    #[test]
    fn test_opening_convention() {
        let opening = PartnerState::opening();
        assert_eq!(opening.lead.foot, Foot::Right);
        assert_eq!(opening.follow.foot, Foot::Left);
    }

    #[test]
    fn test_display() {
        assert_eq!(State::solo(Foot::Left).to_string(), "Weight on LEFT");
        assert_eq!(
            State::partner(Foot::Right, Foot::Left).to_string(),
            "Lead: RIGHT, Follow: LEFT"
        );
    }
}
