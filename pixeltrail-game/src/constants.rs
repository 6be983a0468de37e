//! Centralized balance and tuning constants for Pixel Trail game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub const LOG_JOURNEY_BEGINS: &str = "log.journey.begins";
pub const LOG_DAY_TRAVELED: &str = "log.day.traveled";
pub const LOG_CROSSING_APPROACH: &str = "log.crossing.approach";
pub const LOG_CROSSING_SHALLOW: &str = "log.crossing.shallow";
pub const LOG_CROSSING_FORDED: &str = "log.crossing.forded";
pub const LOG_CROSSING_FORD_SWAMPED: &str = "log.crossing.ford-swamped";
pub const LOG_CROSSING_FLOATED: &str = "log.crossing.floated";
pub const LOG_CROSSING_DROWNED: &str = "log.crossing.drowned";
pub const LOG_CROSSING_FUNERAL: &str = "log.crossing.funeral";
pub const LOG_CROSSING_RAFTED: &str = "log.crossing.rafted";
pub const LOG_CROSSING_GUIDE_HIRED: &str = "log.crossing.guide-hired";
pub const LOG_CROSSING_GUIDE_BROKE: &str = "log.crossing.guide-broke";
pub const LOG_CROSSING_BOTCHED: &str = "log.crossing.botched";
pub const LOG_GAME_TRAGEDY: &str = "log.game.tragedy";
pub const LOG_GAME_ARRIVED: &str = "log.game.arrived";
pub const LOG_HUNT_BEGINS: &str = "log.hunt.begins";
pub const LOG_HUNT_BEAR_DOWN: &str = "log.hunt.bear-down";
pub const LOG_HUNT_SUMMARY: &str = "log.hunt.summary";

// Landmark keys ------------------------------------------------------------
pub const LANDMARK_WILDERNESS: &str = "landmark.wilderness";
pub const LANDMARK_FRONTIER: &str = "landmark.frontier";
pub const LANDMARK_MISSOURI: &str = "landmark.missouri";
pub const LANDMARK_PLAINS: &str = "landmark.plains";
pub const LANDMARK_ROCKIES: &str = "landmark.rockies";
pub const LANDMARK_ALMOST_THERE: &str = "landmark.almost-there";

// Travel parameters --------------------------------------------------------
pub(crate) const TRAIL_GOAL_MILES: u32 = 2_000;
pub(crate) const RIVER_CHANCE: f64 = 0.15;
pub(crate) const FOOD_PER_MOUTH_PER_DAY: u32 = 2;
pub(crate) const DAILY_BASE_MILES: f64 = 10.0;
pub(crate) const MILES_PER_OX: f64 = 5.0;
pub(crate) const ANCILLARY_EVENT_CHANCE: f64 = 0.1;

// Crossing tuning ----------------------------------------------------------
pub(crate) const SHALLOW_DEPTH_MAX: f64 = 0.3;
pub(crate) const FORD_SUCCESS_MIN_ROLL: f64 = 0.4;
pub(crate) const FLOAT_SUCCESS_MIN_ROLL: f64 = 0.6;
pub(crate) const FORD_FAILURE_FOOD_LOSS: u32 = 30;
pub(crate) const GENERIC_FAILURE_FOOD_LOSS: u32 = 20;
pub(crate) const GUIDE_FOOD_COST: u32 = 10;
pub(crate) const RAFT_PARTS_COST: u32 = 1;

// Party tuning -------------------------------------------------------------
pub(crate) const FULL_HEALTH: u8 = 100;

// Hunt tuning --------------------------------------------------------------
pub(crate) const HUNT_VIEW_WIDTH: f32 = 640.0;
pub(crate) const HUNT_VIEW_HEIGHT: f32 = 400.0;
pub(crate) const HUNT_AMMO_LIMIT: u8 = 5;
pub(crate) const HUNT_ROSTER: usize = 5;
pub(crate) const HUNT_CLASSIC_ROSTER: usize = 3;
pub(crate) const HUNT_BUCK_WEIGHT: f64 = 0.7;
pub(crate) const HUNT_BEAR_CHANCE: f64 = 0.25;
pub(crate) const HUNT_SPAWN_SPACING: f32 = 150.0;
pub(crate) const HUNT_SPAWN_Y_BASE: f32 = 180.0;
pub(crate) const HUNT_SPAWN_Y_SPREAD: f32 = 80.0;
pub(crate) const HUNT_SPEED_BASE: f32 = 1.5;
pub(crate) const HUNT_SPEED_SPREAD: f32 = 1.5;
pub(crate) const HUNT_WRAP_X_SPREAD: f32 = 100.0;
pub(crate) const BEAR_SPAWN_X_SPREAD: f32 = 300.0;
pub(crate) const BEAR_SPAWN_Y_BASE: f32 = 200.0;
pub(crate) const BEAR_SPAWN_Y_SPREAD: f32 = 60.0;
pub(crate) const BEAR_SPEED: f32 = 1.2;
pub(crate) const CROSSHAIR_STEP: f32 = 10.0;
/// Ticks between the final shot landing and the session closing out,
/// roughly 800ms at a 60Hz tick.
pub(crate) const HUNT_CLOSING_TICKS: u8 = 48;
pub(crate) const FOOD_PER_DOE: u32 = 50;
pub(crate) const FOOD_PER_BUCK: u32 = 80;
pub(crate) const FOOD_PER_BEAR: u32 = 150;

// Outfitting ---------------------------------------------------------------
pub(crate) const TOTAL_BUDGET_CENTS: i64 = 50_000;
pub(crate) const PRICE_FOOD_CENTS: i64 = 100;
pub(crate) const PRICE_AMMO_CENTS: i64 = 200;
pub(crate) const PRICE_OXEN_CENTS: i64 = 4_000;
pub(crate) const PRICE_PARTS_CENTS: i64 = 2_000;
pub(crate) const PRICE_MEDS_CENTS: i64 = 2_500;
