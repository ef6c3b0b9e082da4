//! Sequence generation - bounded depth-first enumeration.
//!
//! Starting from a foot (or a full dancer state), every unit in the catalog
//! that the current stance accepts is tried in catalog order, and the walk
//! continues from the resulting stance until `max_depth` units have been
//! added. Every prefix is reported, not only the longest ones:
//!
//! ```text
//! catalog [a, b], depth 2:
//!   [a]  [a a]  [a b]  [b]  [b a]  [b b]
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::state::{Figure, State};
use crate::step::Foot;
use crate::unit::StepUnit;
use crate::Result;

/// Sequence length used when callers don't pick one
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Something the generator can walk: a weight configuration that accepts
/// some units and moves to a new configuration when one is danced.
pub trait Stance:
    Copy + PartialEq + std::fmt::Debug + std::fmt::Display + Serialize + DeserializeOwned
{
    type Unit: Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned;

    /// Whether `unit` can be danced from here
    fn accepts(&self, unit: &Self::Unit) -> bool;

    /// Stance after dancing `unit`
    fn advance(&self, unit: &Self::Unit) -> Result<Self>;
}

impl Stance for Foot {
    type Unit = StepUnit;

    fn accepts(&self, unit: &StepUnit) -> bool {
        unit.can_transition_from(*self)
    }

    fn advance(&self, unit: &StepUnit) -> Result<Self> {
        unit.compute_post_state(*self)
    }
}

impl Stance for State {
    type Unit = Figure;

    fn accepts(&self, figure: &Figure) -> bool {
        self.can_transition_to(figure)
    }

    fn advance(&self, figure: &Figure) -> Result<Self> {
        self.apply_transition(figure)
    }
}

/// One enumerated prefix with the stance it started and ended on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Sequence<S: Stance> {
    pub units: Vec<S::Unit>,
    pub start: S,
    pub end: S,
}

impl<S: Stance> Sequence<S> {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Units from the catalog that can be danced from `from`, in catalog order
pub fn compatible_next<S: Stance>(from: &S, catalog: &[S::Unit]) -> Vec<S::Unit> {
    catalog
        .iter()
        .filter(|unit| from.accepts(unit))
        .cloned()
        .collect()
}

/// Enumerate every sequence of at most `max_depth` units reachable from `start`.
pub fn generate<S: Stance>(
    start: S,
    catalog: &[S::Unit],
    max_depth: usize,
) -> Result<Vec<Sequence<S>>> {
    Generator::new(max_depth).run(start, catalog)
}

/// Bounded sequence generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    max_depth: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Generator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &crate::AtlasConfig) -> Self {
        Self::new(config.max_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Run the enumeration.
    ///
    /// Results are in pre-order: each sequence is followed by all of its
    /// extensions before its next sibling. Any error from a unit aborts the
    /// whole run.
    pub fn run<S: Stance>(&self, start: S, catalog: &[S::Unit]) -> Result<Vec<Sequence<S>>> {
        let span = tracing::debug_span!(
            "generate",
            start = %start,
            max_depth = self.max_depth,
            catalog = catalog.len()
        );
        let _enter = span.enter();

        let mut sequences = Vec::new();
        let mut path = Vec::with_capacity(self.max_depth);
        self.walk(start, start, catalog, &mut path, &mut sequences)?;

        tracing::debug!(count = sequences.len(), "generation complete");
        Ok(sequences)
    }

    /// Extend `path` by one unit in every compatible way.
    ///
    /// A prefix is recorded as soon as it is formed, so reaching the depth
    /// limit or a stance nothing accepts just ends the branch.
    fn walk<S: Stance>(
        &self,
        start: S,
        current: S,
        catalog: &[S::Unit],
        path: &mut Vec<S::Unit>,
        sequences: &mut Vec<Sequence<S>>,
    ) -> Result<()> {
        if path.len() >= self.max_depth {
            return Ok(());
        }

        for unit in catalog.iter().filter(|unit| current.accepts(unit)) {
            let next = current.advance(unit)?;
            path.push(unit.clone());
            sequences.push(Sequence {
                units: path.clone(),
                start,
                end: next,
            });
            self.walk(start, next, catalog, path, sequences)?;
            path.pop();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PartnerStepUnit;
    use crate::step::Step;
    use crate::Error;

    fn in_place() -> StepUnit {
        StepUnit::one(Step::IN_PLACE)
    }

    fn mixed_catalog() -> Vec<StepUnit> {
        vec![
            StepUnit::one(Step::IN_PLACE),
            StepUnit::two(Step::FORWARD, None, Step::FORWARD),
            StepUnit::three(Step::FORWARD, None, Step::BACKWARD),
        ]
    }

    #[test]
    fn test_empty_catalog() {
        for foot in Foot::ALL {
            for depth in 0..4 {
                assert!(generate(foot, &[], depth).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_zero_depth() {
        assert!(generate(Foot::Left, &mixed_catalog(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_unit_depth_two() {
        let unit = in_place();
        let result = generate(Foot::Left, &[unit.clone()], 2).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].units, vec![unit.clone()]);
        assert_eq!(result[0].end, Foot::Right);
        assert_eq!(result[1].units, vec![unit.clone(), unit]);
        assert_eq!(result[1].end, Foot::Left);
    }

    #[test]
    fn test_in_place_depth_three() {
        let result = generate(Foot::Left, &[in_place()], 3).unwrap();

        let summary: Vec<(usize, Foot)> = result.iter().map(|s| (s.len(), s.end)).collect();
        assert_eq!(
            summary,
            vec![(1, Foot::Right), (2, Foot::Left), (3, Foot::Right)]
        );
        assert!(result.iter().all(|s| s.start == Foot::Left));
    }

    #[test]
    fn test_mixed_catalog_depth_one() {
        let catalog = mixed_catalog();
        let result = generate(Foot::Left, &catalog, 1).unwrap();

        assert_eq!(result.len(), 3);
        for (sequence, unit) in result.iter().zip(&catalog) {
            assert_eq!(sequence.units, vec![unit.clone()]);
            assert_eq!(sequence.end, Foot::Right);
        }
    }

    #[test]
    fn test_bounded_length_and_count() {
        let catalog = mixed_catalog();
        let depth = 3;
        let result = generate(Foot::Right, &catalog, depth).unwrap();

        assert!(result.iter().all(|s| !s.is_empty() && s.len() <= depth));
        // 3 + 9 + 27 prefixes
        assert_eq!(result.len(), 39);
    }

    #[test]
    fn test_pre_order() {
        let a = StepUnit::one(Step::FORWARD);
        let b = StepUnit::one(Step::BACKWARD);
        let result = generate(Foot::Left, &[a.clone(), b.clone()], 2).unwrap();

        let orders: Vec<Vec<StepUnit>> = result.into_iter().map(|s| s.units).collect();
        assert_eq!(
            orders,
            vec![
                vec![a.clone()],
                vec![a.clone(), a.clone()],
                vec![a.clone(), b.clone()],
                vec![b.clone()],
                vec![b.clone(), a.clone()],
                vec![b.clone(), b],
            ]
        );
    }

    #[test]
    fn test_end_foot_matches_parity() {
        for sequence in generate(Foot::Left, &mixed_catalog(), 4).unwrap() {
            let expected = if sequence.len() % 2 == 1 {
                Foot::Right
            } else {
                Foot::Left
            };
            assert_eq!(sequence.end, expected);
        }
    }

    #[test]
    fn test_deterministic() {
        let catalog = mixed_catalog();
        let first = generate(Foot::Left, &catalog, 3).unwrap();
        let second = generate(Foot::Left, &catalog, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_state_generation_filters_by_shape() {
        let basic = StepUnit::two(Step::IN_PLACE, None, Step::IN_PLACE);
        let catalog = vec![
            Figure::Solo(basic.clone()),
            Figure::Partner(PartnerStepUnit::new(basic.clone(), basic)),
        ];

        let solo = generate(State::solo(Foot::Left), &catalog, 2).unwrap();
        assert_eq!(solo.len(), 2);
        assert!(solo
            .iter()
            .all(|s| s.units.iter().all(|f| matches!(f, Figure::Solo(_)))));

        let partner = generate(State::partner(Foot::Right, Foot::Left), &catalog, 1).unwrap();
        assert_eq!(partner.len(), 1);
        assert_eq!(partner[0].end, State::partner(Foot::Left, Foot::Right));
    }

    #[test]
    fn test_compatible_next() {
        let basic = StepUnit::two(Step::IN_PLACE, None, Step::IN_PLACE);
        let catalog = vec![
            Figure::Partner(PartnerStepUnit::new(basic.clone(), basic.clone())),
            Figure::Solo(basic.clone()),
        ];
        let next = compatible_next(&State::solo(Foot::Right), &catalog);
        assert_eq!(next, vec![Figure::Solo(basic)]);

        assert_eq!(compatible_next(&Foot::Left, &mixed_catalog()).len(), 3);
    }

    /// Stance whose unit `0` is broken
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Counter(u8);

    impl std::fmt::Display for Counter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Stance for Counter {
        type Unit = u8;

        fn accepts(&self, _unit: &u8) -> bool {
            true
        }

        fn advance(&self, unit: &u8) -> Result<Self> {
            if *unit == 0 {
                return Err(Error::InvariantViolation {
                    start: Foot::Left,
                    end: Foot::Left,
                });
            }
            Ok(Counter(self.0 + unit))
        }
    }

    #[test]
    fn test_error_aborts_generation() {
        let result = generate(Counter(0), &[1, 0], 3);
        assert!(matches!(result, Err(Error::InvariantViolation { .. })));

        let ok = generate(Counter(0), &[1, 2], 2).unwrap();
        assert_eq!(ok.len(), 6);
        assert_eq!(ok[1].end, Counter(2));
    }
}
