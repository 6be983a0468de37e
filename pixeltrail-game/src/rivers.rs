//! River-crossing resolution.
//!
//! A crossing either resolves shallow (automatic pass) or deep, in which
//! case an external decision picks one of the crossing options and a single
//! roll settles it. Deep resolution is a pure function of the decision,
//! the roll, the supplies on hand, and the capability flags; the only
//! randomness a drowning needs (which member goes under) is drawn by the
//! caller afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    FLOAT_SUCCESS_MIN_ROLL, FORD_FAILURE_FOOD_LOSS, FORD_SUCCESS_MIN_ROLL,
    GENERIC_FAILURE_FOOD_LOSS, GUIDE_FOOD_COST, LOG_CROSSING_BOTCHED, LOG_CROSSING_DROWNED,
    LOG_CROSSING_FLOATED, LOG_CROSSING_FORD_SWAMPED, LOG_CROSSING_FORDED,
    LOG_CROSSING_GUIDE_BROKE, LOG_CROSSING_GUIDE_HIRED, LOG_CROSSING_RAFTED,
    LOG_CROSSING_SHALLOW, RAFT_PARTS_COST, SHALLOW_DEPTH_MAX,
};
use crate::state::{FeatureFlags, GameState, Resource, Supplies};

/// Player-facing options at a deep crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingChoice {
    Ford,
    Float,
    BuildRaft,
    HireGuide,
}

impl CrossingChoice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ford => "ford",
            Self::Float => "float",
            Self::BuildRaft => "build raft",
            Self::HireGuide => "hire guide",
        }
    }

    /// Options offered to the decision prompt under the given flags.
    #[must_use]
    pub fn offered(features: &FeatureFlags) -> Vec<Self> {
        let mut options = vec![Self::Ford, Self::Float, Self::BuildRaft];
        if features.hire_guide {
            options.push(Self::HireGuide);
        }
        options
    }
}

impl fmt::Display for CrossingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrossingChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ford" => Ok(Self::Ford),
            "float" => Ok(Self::Float),
            "build raft" | "raft" => Ok(Self::BuildRaft),
            "hire guide" | "guide" => Ok(Self::HireGuide),
            _ => Err(()),
        }
    }
}

/// First classification of a triggered crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthClass {
    Shallow,
    Deep,
}

#[must_use]
pub fn classify_depth(depth: f64) -> DepthClass {
    if depth < SHALLOW_DEPTH_MAX {
        DepthClass::Shallow
    } else {
        DepthClass::Deep
    }
}

/// Resolved result of a deep crossing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeepOutcome {
    /// Ford succeeded; the crossing completes at no cost.
    Forded,
    /// Ford failed against the current; supplies washed away.
    FordSwamped,
    /// Float succeeded.
    Floated,
    /// Float tipped the wagon; one member drowns (caller picks whom).
    Drowning,
    /// A raft was built from one spare part.
    Rafted,
    /// A guide was paid in food and led the party across.
    GuideHired,
    /// Guide wanted food the party does not have; nothing happens today.
    GuideUnaffordable,
    /// Unrecognized choice or failed precondition; the generic failure.
    Botched,
}

impl DeepOutcome {
    #[must_use]
    pub(crate) const fn log_key(self) -> &'static str {
        match self {
            Self::Forded => LOG_CROSSING_FORDED,
            Self::FordSwamped => LOG_CROSSING_FORD_SWAMPED,
            Self::Floated => LOG_CROSSING_FLOATED,
            Self::Drowning => LOG_CROSSING_DROWNED,
            Self::Rafted => LOG_CROSSING_RAFTED,
            Self::GuideHired => LOG_CROSSING_GUIDE_HIRED,
            Self::GuideUnaffordable => LOG_CROSSING_GUIDE_BROKE,
            Self::Botched => LOG_CROSSING_BOTCHED,
        }
    }
}

/// Outcome of one whole crossing, shallow or deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingOutcome {
    Shallow,
    Deep(DeepOutcome),
}

/// Resolve a deep crossing. Pure: the same `(choice, roll, supplies,
/// features)` always yields the same outcome. `None` stands for an
/// unrecognized decision string.
#[must_use]
pub fn resolve_deep(
    choice: Option<CrossingChoice>,
    roll: f64,
    supplies: &Supplies,
    features: &FeatureFlags,
) -> DeepOutcome {
    match choice {
        Some(CrossingChoice::Ford) => {
            if roll >= FORD_SUCCESS_MIN_ROLL {
                DeepOutcome::Forded
            } else {
                DeepOutcome::FordSwamped
            }
        }
        Some(CrossingChoice::Float) => {
            if roll >= FLOAT_SUCCESS_MIN_ROLL {
                DeepOutcome::Floated
            } else {
                DeepOutcome::Drowning
            }
        }
        Some(CrossingChoice::BuildRaft) if supplies.parts >= RAFT_PARTS_COST => DeepOutcome::Rafted,
        Some(CrossingChoice::HireGuide) if features.hire_guide => {
            if supplies.food >= GUIDE_FOOD_COST {
                DeepOutcome::GuideHired
            } else {
                DeepOutcome::GuideUnaffordable
            }
        }
        _ => DeepOutcome::Botched,
    }
}

/// Apply a shallow crossing to the ledger. Returns the message key.
pub fn apply_shallow(state: &mut GameState) -> &'static str {
    state.rivers_crossed += 1;
    state.push_log(LOG_CROSSING_SHALLOW);
    LOG_CROSSING_SHALLOW
}

/// Apply a non-drowning deep outcome to the ledger. Returns the message
/// key. `Drowning` carries an extra random draw and a funeral pause, so
/// the engine handles it separately; passing it here only records the log.
pub fn apply_deep(state: &mut GameState, outcome: DeepOutcome) -> &'static str {
    match outcome {
        DeepOutcome::Forded | DeepOutcome::Floated | DeepOutcome::Drowning => {}
        DeepOutcome::FordSwamped => {
            state.supplies.consume(Resource::Food, FORD_FAILURE_FOOD_LOSS);
        }
        DeepOutcome::Rafted => {
            state.supplies.consume(Resource::Parts, RAFT_PARTS_COST);
        }
        DeepOutcome::GuideHired => {
            state.supplies.consume(Resource::Food, GUIDE_FOOD_COST);
            state.rivers_crossed += 1;
        }
        DeepOutcome::GuideUnaffordable => {}
        DeepOutcome::Botched => {
            state
                .supplies
                .consume(Resource::Food, GENERIC_FAILURE_FOOD_LOSS);
        }
    }
    let key = outcome.log_key();
    state.push_log(key);
    key
}

/// Pick which member drowns: uniform over the whole party, dead or alive.
#[must_use]
pub fn pick_victim(party_size: usize, rng: &mut impl Rng) -> usize {
    debug_assert!(party_size > 0);
    rng.gen_range(0..party_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn supplies() -> Supplies {
        Supplies {
            food: 100,
            ammo: 10,
            oxen: 4,
            parts: 2,
            meds: 1,
        }
    }

    fn state_with(supplies: Supplies) -> GameState {
        GameState::new("Ada", vec!["Boone".to_string()], supplies, 7)
    }

    #[test]
    fn depth_point_two_is_shallow() {
        assert_eq!(classify_depth(0.2), DepthClass::Shallow);
        assert_eq!(classify_depth(0.3), DepthClass::Deep);
        assert_eq!(classify_depth(0.9), DepthClass::Deep);
    }

    #[test]
    fn shallow_crossing_is_free() {
        let mut state = state_with(supplies());
        let before = state.supplies;
        apply_shallow(&mut state);
        assert_eq!(state.rivers_crossed, 1);
        assert_eq!(state.supplies, before);
    }

    #[test]
    fn ford_splits_on_roll() {
        let flags = FeatureFlags::default();
        let s = supplies();
        assert_eq!(
            resolve_deep(Some(CrossingChoice::Ford), 0.4, &s, &flags),
            DeepOutcome::Forded
        );
        assert_eq!(
            resolve_deep(Some(CrossingChoice::Ford), 0.39, &s, &flags),
            DeepOutcome::FordSwamped
        );
    }

    #[test]
    fn float_splits_on_roll() {
        let flags = FeatureFlags::default();
        let s = supplies();
        assert_eq!(
            resolve_deep(Some(CrossingChoice::Float), 0.6, &s, &flags),
            DeepOutcome::Floated
        );
        assert_eq!(
            resolve_deep(Some(CrossingChoice::Float), 0.59, &s, &flags),
            DeepOutcome::Drowning
        );
    }

    #[test]
    fn raft_needs_a_spare_part() {
        let flags = FeatureFlags::default();
        let with_parts = supplies();
        assert_eq!(
            resolve_deep(Some(CrossingChoice::BuildRaft), 0.0, &with_parts, &flags),
            DeepOutcome::Rafted
        );
        let no_parts = Supplies {
            parts: 0,
            ..supplies()
        };
        assert_eq!(
            resolve_deep(Some(CrossingChoice::BuildRaft), 0.0, &no_parts, &flags),
            DeepOutcome::Botched
        );
    }

    #[test]
    fn raft_without_parts_costs_generic_failure_food() {
        let mut state = state_with(Supplies {
            parts: 0,
            ..supplies()
        });
        let outcome = resolve_deep(
            Some(CrossingChoice::BuildRaft),
            0.5,
            &state.supplies,
            &state.features,
        );
        apply_deep(&mut state, outcome);
        assert_eq!(state.supplies.food, 80);
        assert_eq!(state.supplies.parts, 0);
    }

    #[test]
    fn guide_costs_food_and_counts_the_crossing() {
        let mut state = state_with(supplies());
        let outcome = resolve_deep(
            Some(CrossingChoice::HireGuide),
            0.0,
            &state.supplies,
            &state.features,
        );
        assert_eq!(outcome, DeepOutcome::GuideHired);
        apply_deep(&mut state, outcome);
        assert_eq!(state.supplies.food, 90);
        assert_eq!(state.rivers_crossed, 1);
    }

    #[test]
    fn broke_guide_attempt_is_a_free_no_op() {
        let mut state = state_with(Supplies {
            food: 9,
            ..supplies()
        });
        let outcome = resolve_deep(
            Some(CrossingChoice::HireGuide),
            0.0,
            &state.supplies,
            &state.features,
        );
        assert_eq!(outcome, DeepOutcome::GuideUnaffordable);
        apply_deep(&mut state, outcome);
        assert_eq!(state.supplies.food, 9);
        assert_eq!(state.rivers_crossed, 0);
    }

    #[test]
    fn guide_option_gated_by_feature_flag() {
        let flags = FeatureFlags::classic();
        assert_eq!(
            resolve_deep(Some(CrossingChoice::HireGuide), 0.9, &supplies(), &flags),
            DeepOutcome::Botched
        );
        assert_eq!(CrossingChoice::offered(&flags).len(), 3);
        assert_eq!(CrossingChoice::offered(&FeatureFlags::default()).len(), 4);
    }

    #[test]
    fn unrecognized_choice_loses_food() {
        let mut state = state_with(supplies());
        let outcome = resolve_deep(None, 0.95, &state.supplies, &state.features);
        assert_eq!(outcome, DeepOutcome::Botched);
        apply_deep(&mut state, outcome);
        assert_eq!(state.supplies.food, 80);
    }

    #[test]
    fn generic_failure_floors_food_at_zero() {
        let mut state = state_with(Supplies {
            food: 5,
            ..supplies()
        });
        apply_deep(&mut state, DeepOutcome::Botched);
        assert_eq!(state.supplies.food, 0);
    }

    #[test]
    fn resolution_is_deterministic_for_same_inputs() {
        let flags = FeatureFlags::default();
        let s = supplies();
        for &(choice, roll) in &[
            (Some(CrossingChoice::Ford), 0.17),
            (Some(CrossingChoice::Float), 0.83),
            (Some(CrossingChoice::BuildRaft), 0.5),
            (None, 0.5),
        ] {
            let first = resolve_deep(choice, roll, &s, &flags);
            let second = resolve_deep(choice, roll, &s, &flags);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn victim_index_stays_in_party() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..64 {
            assert!(pick_victim(5, &mut rng) < 5);
        }
    }

    #[test]
    fn choice_strings_parse_like_the_prompt() {
        assert_eq!("ford".parse(), Ok(CrossingChoice::Ford));
        assert_eq!(" Build Raft ".parse(), Ok(CrossingChoice::BuildRaft));
        assert_eq!("hire guide".parse(), Ok(CrossingChoice::HireGuide));
        assert!("swim".parse::<CrossingChoice>().is_err());
    }
}
