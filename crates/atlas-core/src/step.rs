//! Steps and their primitives
//!
//! A step is one weight transfer. It never says which foot it starts on:
//! whatever foot carries weight before, the other one carries it after.

use serde::{Deserialize, Serialize};

/// Which foot is bearing weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    /// Both feet, left first
    pub const ALL: [Foot; 2] = [Foot::Left, Foot::Right];

    /// Get the other foot
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Upper-case name used in displays ("LEFT" / "RIGHT")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

impl std::fmt::Display for Foot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Foot {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(crate::Error::Config(format!("unknown foot: {}", other))),
        }
    }
}

/// Direction of travel for a step
///
/// Older catalogs split sideways travel into `left` and `right`; both
/// load as [`Direction::Side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    #[serde(alias = "left", alias = "right")]
    Side,
    InPlace,
}

impl Direction {
    /// Every direction, in declaration order
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Side,
        Direction::InPlace,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Backward => "Backward",
            Self::Side => "Side",
            Self::InPlace => "In Place",
        }
    }
}

/// Body rotation carried by a step unit. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[serde(rename = "90")]
    Quarter,
    #[serde(rename = "180")]
    Half,
    #[serde(rename = "270")]
    ThreeQuarter,
    #[serde(rename = "360")]
    Full,
}

impl Rotation {
    /// Rotation in degrees
    pub fn degrees(&self) -> u16 {
        match self {
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
            Self::Full => 360,
        }
    }
}

/// A single atomic weight transfer.
///
/// Steps are plain values: two steps with the same direction are the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub direction: Direction,
}

impl Step {
    pub const FORWARD: Step = Step::new(Direction::Forward);
    pub const BACKWARD: Step = Step::new(Direction::Backward);
    pub const SIDE: Step = Step::new(Direction::Side);
    pub const IN_PLACE: Step = Step::new(Direction::InPlace);

    pub const fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Foot bearing weight after this step, given the foot bearing it before.
    pub fn ending_foot(&self, starting_foot: Foot) -> Foot {
        starting_foot.opposite()
    }
}

impl From<Direction> for Step {
    fn from(direction: Direction) -> Self {
        Self::new(direction)
    }
}
