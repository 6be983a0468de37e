//! One-day travel advancement: consumption, mileage, terminal checks,
//! and the landmark readout along the 2000-mile trail.
//!
//! A day either travels normally or is displaced by a river encounter.
//! River days consume no food and advance neither `day` nor `miles`; the
//! crossing replaces that day's travel resolution entirely.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANCILLARY_EVENT_CHANCE, DAILY_BASE_MILES, FOOD_PER_MOUTH_PER_DAY, LANDMARK_ALMOST_THERE,
    LANDMARK_FRONTIER, LANDMARK_MISSOURI, LANDMARK_PLAINS, LANDMARK_ROCKIES, LANDMARK_WILDERNESS,
    LOG_DAY_TRAVELED, MILES_PER_OX, RIVER_CHANCE,
};
use crate::state::{GameState, LossCause, Resource};

/// Coarse phase of the whole game, owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Idle,
    RiverCrossing,
    Hunting,
    GameOver,
    Victory,
}

impl GamePhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// What a single `advance_day` call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOutcome {
    /// A river blocks the trail; the day is suspended until the crossing
    /// resolves. No day/mile/food movement happens.
    RiverAhead,
    /// An ordinary day on the trail.
    Traveled(TravelReport),
    /// Terminal loss. The persisted snapshot has been cleared.
    Tragedy(LossCause),
    /// Terminal win at the end of the trail. Snapshot cleared.
    Arrived,
}

/// Accounting for one normal travel day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelReport {
    pub day: u32,
    pub miles_gained: u32,
    pub food_consumed: u32,
    /// Whether the 10% ancillary event hook fired after travel.
    pub event_triggered: bool,
}

/// Whether today's travel runs into a river, for the given unit draw.
#[must_use]
pub fn river_triggered(draw: f64) -> bool {
    draw < RIVER_CHANCE
}

/// Whether the optional ancillary event fires, for the given unit draw.
#[must_use]
pub fn ancillary_event_triggered(draw: f64) -> bool {
    draw < ANCILLARY_EVENT_CHANCE
}

/// Advance one normal (river-free) day. `r` is the day's unit draw:
/// miles gained are `floor(10 + r * oxen * 5)`, so a team with no oxen
/// still crawls 10-14 miles. Terminal conditions are NOT checked here.
pub fn travel_normal_day(state: &mut GameState, r: f64) -> TravelReport {
    debug_assert!((0.0..1.0).contains(&r));
    let mouths = u32::try_from(state.party_size()).unwrap_or(u32::MAX);
    let food_needed = mouths.saturating_mul(FOOD_PER_MOUTH_PER_DAY);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let miles_gained =
        (DAILY_BASE_MILES + r * f64::from(state.supplies.oxen) * MILES_PER_OX).floor() as u32;

    state.day += 1;
    state.miles += miles_gained;
    let food_consumed = state.supplies.consume(Resource::Food, food_needed);
    state.push_log(LOG_DAY_TRAVELED);

    TravelReport {
        day: state.day,
        miles_gained,
        food_consumed,
        event_triggered: false,
    }
}

/// Terminal check after a travel day. Loss takes precedence over the win
/// when both hold at once.
#[must_use]
pub fn check_terminal(state: &GameState) -> Option<DayOutcome> {
    if let Some(cause) = state.loss_cause() {
        return Some(DayOutcome::Tragedy(cause));
    }
    if state.is_won() {
        return Some(DayOutcome::Arrived);
    }
    None
}

/// Landmark message key for a mileage readout.
#[must_use]
pub const fn landmark_for_miles(miles: u32) -> &'static str {
    if miles > 1_800 {
        LANDMARK_ALMOST_THERE
    } else if miles > 1_500 {
        LANDMARK_ROCKIES
    } else if miles > 1_000 {
        LANDMARK_PLAINS
    } else if miles > 500 {
        LANDMARK_MISSOURI
    } else if miles > 100 {
        LANDMARK_FRONTIER
    } else {
        LANDMARK_WILDERNESS
    }
}
