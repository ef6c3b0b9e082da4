//! Entry and exit views for a single unit or figure.
//!
//! Entries are the feet (or states) a unit can be started from; exits are
//! where each entry ends up.

use crate::state::{Figure, State};
use crate::step::Foot;
use crate::unit::StepUnit;
use crate::Result;

/// Feet the unit can be started from
pub fn entry_feet(unit: &StepUnit) -> Vec<Foot> {
    unit.valid_entry_feet()
        .into_iter()
        .filter(|&foot| unit.can_transition_from(foot))
        .collect()
}

/// End foot for each entry foot, in the same order
pub fn exit_feet(unit: &StepUnit) -> Result<Vec<Foot>> {
    entry_feet(unit)
        .into_iter()
        .map(|foot| unit.compute_post_state(foot))
        .collect()
}

/// States of the figure's shape that can take it
pub fn entry_states(figure: &Figure) -> Vec<State> {
    let candidates = match figure {
        Figure::Solo(_) => State::all_solo(),
        Figure::Partner(_) => State::all_partner(),
    };
    candidates
        .into_iter()
        .filter(|state| state.can_transition_to(figure))
        .collect()
}

/// State reached from each entry state, in the same order
pub fn exit_states(figure: &Figure) -> Result<Vec<State>> {
    entry_states(figure)
        .iter()
        .map(|state| state.apply_transition(figure))
        .collect()
}
