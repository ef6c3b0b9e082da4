//! Step units - the reusable figures sequences are built from
//!
//! ```text
//! DistanceOne     step                      1 transfer
//! DistanceTwo     first · middle · last     middle defaults to in place;
//!                                           the first foot does not travel again
//! DistanceThree   first · (in place) · last the first foot travels again on `last`
//! ```
//!
//! Every unit ends on the foot opposite the one it started on. The end foot
//! is computed by folding each atomic transfer, and a fold that comes back
//! to the starting foot is reported as [`Error::InvariantViolation`].

use serde::{Deserialize, Serialize};

use crate::step::{Direction, Foot, Rotation, Step};
use crate::{Error, Result};

/// A grouping of 1-3 steps
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepUnit {
    DistanceOne {
        step: Step,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation: Option<Rotation>,
    },
    DistanceTwo {
        first: Step,
        middle: Step,
        last: Step,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation: Option<Rotation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dominant_starting_foot: Option<Foot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// The middle transfer is always in place and is not stored.
    DistanceThree {
        first: Step,
        last: Step,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation: Option<Rotation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dominant_starting_foot: Option<Foot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl StepUnit {
    /// Single weight change
    pub fn one(step: Step) -> Self {
        Self::DistanceOne {
            step,
            rotation: None,
        }
    }

    /// Double: weight returns to the first stepping foot. A missing middle
    /// step is taken in place.
    pub fn two(first: Step, middle: Option<Step>, last: Step) -> Self {
        Self::DistanceTwo {
            first,
            middle: middle.unwrap_or(Step::IN_PLACE),
            last,
            rotation: None,
            dominant_starting_foot: None,
            title: None,
        }
    }

    /// Triple: the first stepping foot travels again on the last step.
    /// Whatever is passed as `middle` is discarded.
    pub fn three(first: Step, _middle: Option<Step>, last: Step) -> Self {
        Self::DistanceThree {
            first,
            last,
            rotation: None,
            dominant_starting_foot: None,
            title: None,
        }
    }

    pub fn with_rotation(mut self, value: Rotation) -> Self {
        match &mut self {
            Self::DistanceOne { rotation, .. }
            | Self::DistanceTwo { rotation, .. }
            | Self::DistanceThree { rotation, .. } => *rotation = Some(value),
        }
        self
    }

    /// Set the title. Single steps carry no title and are returned unchanged.
    pub fn with_title(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::DistanceOne { .. } => {}
            Self::DistanceTwo { title, .. } | Self::DistanceThree { title, .. } => {
                *title = Some(value.into())
            }
        }
        self
    }

    /// Set the conventional starting foot. Not enforced; single steps ignore it.
    pub fn with_dominant_starting_foot(mut self, foot: Foot) -> Self {
        match &mut self {
            Self::DistanceOne { .. } => {}
            Self::DistanceTwo {
                dominant_starting_foot,
                ..
            }
            | Self::DistanceThree {
                dominant_starting_foot,
                ..
            } => *dominant_starting_foot = Some(foot),
        }
        self
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            Self::DistanceOne { .. } => UnitKind::One,
            Self::DistanceTwo { .. } => UnitKind::Two,
            Self::DistanceThree { .. } => UnitKind::Three,
        }
    }

    /// The atomic steps, in order. Three-step units always report an
    /// in-place middle.
    pub fn steps(&self) -> Vec<Step> {
        match self {
            Self::DistanceOne { step, .. } => vec![*step],
            Self::DistanceTwo {
                first, middle, last, ..
            } => vec![*first, *middle, *last],
            Self::DistanceThree { first, last, .. } => vec![*first, Step::IN_PLACE, *last],
        }
    }

    pub fn step_count(&self) -> usize {
        self.kind().step_count()
    }

    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            Self::DistanceOne { rotation, .. }
            | Self::DistanceTwo { rotation, .. }
            | Self::DistanceThree { rotation, .. } => *rotation,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::DistanceOne { .. } => None,
            Self::DistanceTwo { title, .. } | Self::DistanceThree { title, .. } => {
                title.as_deref()
            }
        }
    }

    pub fn dominant_starting_foot(&self) -> Option<Foot> {
        match self {
            Self::DistanceOne { .. } => None,
            Self::DistanceTwo {
                dominant_starting_foot,
                ..
            }
            | Self::DistanceThree {
                dominant_starting_foot,
                ..
            } => *dominant_starting_foot,
        }
    }

    /// Title if set, otherwise a name built from the step directions
    pub fn label(&self) -> String {
        if let Some(title) = self.title() {
            return title.to_string();
        }
        match self {
            Self::DistanceOne { step, .. } => format!("Single {}", step.direction.label()),
            Self::DistanceTwo { first, last, .. } => {
                format!("Double {}-{}", first.direction.label(), last.direction.label())
            }
            Self::DistanceThree { first, last, .. } => {
                format!("Triple {}-{}", first.direction.label(), last.direction.label())
            }
        }
    }

    /// Foot bearing weight after the whole unit.
    pub fn compute_post_state(&self, starting_foot: Foot) -> Result<Foot> {
        fold_transfers(&self.steps(), starting_foot)
    }

    /// Units are foot-agnostic: any foot can start them.
    pub fn can_transition_from(&self, _foot: Foot) -> bool {
        true
    }

    pub fn valid_entry_feet(&self) -> [Foot; 2] {
        Foot::ALL
    }
}

/// Apply each step's transfer in order and check the result left the
/// starting foot.
pub(crate) fn fold_transfers(steps: &[Step], start: Foot) -> Result<Foot> {
    let end = steps
        .iter()
        .fold(start, |foot, step| step.ending_foot(foot));

    if end == start {
        return Err(Error::InvariantViolation { start, end });
    }
    Ok(end)
}

/// Shape of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    #[serde(alias = "distance_one")]
    One,
    #[serde(alias = "distance_two")]
    Two,
    #[serde(alias = "distance_three")]
    Three,
}

impl UnitKind {
    /// Number of atomic transfers a unit of this kind performs
    pub fn step_count(&self) -> usize {
        match self {
            Self::One => 1,
            Self::Two | Self::Three => 3,
        }
    }

    /// How many directions a definition may list for this kind
    fn accepted_lengths(&self) -> std::ops::RangeInclusive<usize> {
        match self {
            Self::One => 1..=1,
            Self::Two | Self::Three => 2..=3,
        }
    }
}

/// One explicit weight transfer in a unit definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Foot,
    pub to: Foot,
}

/// Serialized form of a step unit, as written in catalog files.
///
/// `steps` lists directions. For `two` and `three`, two directions mean
/// first and last with an implied in-place middle. The optional `transfers`
/// trace spells out the weight foot before and after each atomic step and
/// is checked against the unit when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    pub kind: UnitKind,
    pub steps: Vec<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfers: Option<Vec<Transfer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_starting_foot: Option<Foot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TryFrom<UnitDef> for StepUnit {
    type Error = Error;

    fn try_from(def: UnitDef) -> Result<Self> {
        let name = def.title.clone().unwrap_or_else(|| format!("{:?}", def.kind));

        if def.steps.is_empty() || def.steps.len() > 3 {
            return Err(Error::MalformedStepUnit(format!(
                "{}: a unit holds 1-3 steps, found {}",
                name,
                def.steps.len()
            )));
        }
        if !def.kind.accepted_lengths().contains(&def.steps.len()) {
            return Err(Error::MalformedStepUnit(format!(
                "{}: {:?} unit cannot be built from {} steps",
                name,
                def.kind,
                def.steps.len()
            )));
        }

        if def.kind == UnitKind::One
            && (def.title.is_some() || def.dominant_starting_foot.is_some())
        {
            return Err(Error::MalformedStepUnit(format!(
                "{}: single steps take no title or dominant_starting_foot",
                name
            )));
        }

        let steps: Vec<Step> = def.steps.iter().copied().map(Step::from).collect();
        let first = steps[0];
        let last = steps[steps.len() - 1];
        let middle = if steps.len() == 3 { Some(steps[1]) } else { None };

        let mut unit = match def.kind {
            UnitKind::One => StepUnit::one(first),
            UnitKind::Two => StepUnit::two(first, middle, last),
            UnitKind::Three => StepUnit::three(first, middle, last),
        };
        if let Some(rotation) = def.rotation {
            unit = unit.with_rotation(rotation);
        }
        if let Some(foot) = def.dominant_starting_foot {
            unit = unit.with_dominant_starting_foot(foot);
        }
        if let Some(title) = def.title {
            unit = unit.with_title(title);
        }

        if let Some(transfers) = &def.transfers {
            check_transfers(&name, &unit, transfers)?;
        }

        Ok(unit)
    }
}

/// Check an explicit transfer trace: one entry per atomic step, each step
/// changing feet, each step starting where the previous one ended.
fn check_transfers(name: &str, unit: &StepUnit, transfers: &[Transfer]) -> Result<()> {
    if transfers.len() != unit.step_count() {
        return Err(Error::MalformedStepUnit(format!(
            "{}: {} transfers listed for {} steps",
            name,
            transfers.len(),
            unit.step_count()
        )));
    }

    for (i, transfer) in transfers.iter().enumerate() {
        if transfer.from == transfer.to {
            return Err(Error::MalformedStepUnit(format!(
                "{}: step {} keeps weight on {}",
                name, i, transfer.from
            )));
        }
        if let Some(next) = transfers.get(i + 1) {
            if transfer.to != next.from {
                return Err(Error::MalformedStepUnit(format!(
                    "{}: step {} ends on {}, but step {} starts on {}",
                    name,
                    i,
                    transfer.to,
                    i + 1,
                    next.from
                )));
            }
        }
    }

    let start = transfers[0].from;
    let end = transfers[transfers.len() - 1].to;
    let computed = unit.compute_post_state(start)?;
    if computed != end {
        return Err(Error::MalformedStepUnit(format!(
            "{}: trace ends on {}, unit ends on {}",
            name, end, computed
        )));
    }
    Ok(())
}
