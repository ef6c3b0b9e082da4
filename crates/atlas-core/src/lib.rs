//! # Movement Atlas Core
//!
//! Foot-weight state machine and sequence generator for partner and solo dance.
//!
//! ## The Model
//!
//! ```text
//!   Step            one weight transfer, always to the other foot
//!     │
//!     ▼
//!   StepUnit        1-3 steps (single / double / triple "basic")
//!     │             always ends on the foot opposite its start
//!     ▼
//!   State           Solo(foot) or Partner(lead foot, follow foot)
//!     │
//!     ▼
//!   Generator       every sequence of units reachable within max depth
//! ```
//!
//! ## Flow
//!
//! 1. **CATALOG**: curated defaults or a user catalog file supply the units
//! 2. **GENERATE**: bounded depth-first walk from a starting foot or state
//! 3. **QUERY**: entry/exit states and compatible next units for introspection
//! 4. **STORE**: named sequences are saved and listed through [`SequenceStore`]

pub mod catalog;
pub mod config;
pub mod generator;
pub mod query;
pub mod sequence;
pub mod state;
pub mod step;
pub mod store;
pub mod unit;

pub use catalog::{Catalog, CatalogEntry, Difficulty};
pub use config::AtlasConfig;
pub use generator::{compatible_next, generate, Generator, Sequence, Stance, DEFAULT_MAX_DEPTH};
pub use query::{entry_feet, entry_states, exit_feet, exit_states};
pub use sequence::{
    DancerRole, PartnerSequence, SoloSequence, FOLLOW_INITIAL_WEIGHT, LEAD_INITIAL_WEIGHT,
};
pub use state::{Figure, PartnerState, PartnerStepUnit, SoloState, State, StepType};
pub use step::{Direction, Foot, Rotation, Step};
pub use store::{
    available_partner_sequences, available_solo_sequences, MemoryStore, SequenceStore, Stored,
};
pub use unit::{StepUnit, UnitDef, UnitKind};

/// Result type for atlas-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in atlas-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid transition: {from} cannot take {unit}")]
    InvalidTransition { from: String, unit: String },

    #[error("Invariant violation: unit starting on {start} ended on {end}")]
    InvariantViolation { start: Foot, end: Foot },

    #[error("Malformed step unit: {0}")]
    MalformedStepUnit(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
