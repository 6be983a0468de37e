//! The hunting minigame: a bounded real-time session of drifting targets,
//! a crosshair, and a fixed ammo pouch.
//!
//! The session is ephemeral. It is spawned when the player enters the
//! hunt, ticks while the hunt view is displayed, and is discarded after
//! its summary is folded back into the game state.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    BEAR_SPAWN_X_SPREAD, BEAR_SPAWN_Y_BASE, BEAR_SPAWN_Y_SPREAD, BEAR_SPEED, CROSSHAIR_STEP,
    FOOD_PER_BEAR, FOOD_PER_BUCK, FOOD_PER_DOE, HUNT_AMMO_LIMIT, HUNT_BEAR_CHANCE,
    HUNT_BUCK_WEIGHT, HUNT_CLASSIC_ROSTER, HUNT_CLOSING_TICKS, HUNT_ROSTER, HUNT_SPAWN_SPACING,
    HUNT_SPAWN_Y_BASE, HUNT_SPAWN_Y_SPREAD, HUNT_SPEED_BASE, HUNT_SPEED_SPREAD, HUNT_VIEW_HEIGHT,
    HUNT_VIEW_WIDTH, HUNT_WRAP_X_SPREAD,
};
use crate::state::FeatureFlags;

/// What kind of animal a target is. Size class and food reward derive
/// from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarryKind {
    Doe,
    Buck,
    Bear,
}

impl QuarryKind {
    #[must_use]
    pub const fn food_reward(self) -> u32 {
        match self {
            Self::Doe => FOOD_PER_DOE,
            Self::Buck => FOOD_PER_BUCK,
            Self::Bear => FOOD_PER_BEAR,
        }
    }

    /// Sprite pixel unit and scale, straight from the pixel art metrics.
    const fn pixel_metrics(self) -> (f32, f32) {
        match self {
            Self::Doe => (4.0, 2.0),
            Self::Buck => (5.0, 2.0),
            Self::Bear => (5.0, 3.0),
        }
    }

    /// Hitbox width: four body units wide.
    #[must_use]
    pub const fn body_width(self) -> f32 {
        let (px, scale) = self.pixel_metrics();
        px * 4.0 * scale
    }

    /// Hitbox height: three body units plus the leg row.
    #[must_use]
    pub const fn body_height(self) -> f32 {
        let (px, scale) = self.pixel_metrics();
        (px * 3.0 + 1.0) * scale
    }
}

/// One animal drifting across the hunt viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub kind: QuarryKind,
    pub hit: bool,
}

impl Target {
    /// Axis-aligned hitbox test against a crosshair position.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x
            && x <= self.x + self.kind.body_width()
            && y >= self.y
            && y <= self.y + self.kind.body_height()
    }
}

/// Crosshair position inside the hunt viewport. Both input modes move
/// the same crosshair and may interleave freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crosshair {
    pub x: f32,
    pub y: f32,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self {
            x: HUNT_VIEW_WIDTH / 2.0,
            y: HUNT_VIEW_HEIGHT / 2.0,
        }
    }
}

/// Relative crosshair movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Spawn parameters for one hunting session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HuntConfig {
    pub roster: usize,
    /// Weighted buck/doe draw instead of a uniform deer roster.
    pub weighted: bool,
    /// Chance of one extra high-value bear target.
    pub bear_chance: f64,
    pub ammo_limit: u8,
    pub closing_ticks: u8,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            roster: HUNT_ROSTER,
            weighted: true,
            bear_chance: HUNT_BEAR_CHANCE,
            ammo_limit: HUNT_AMMO_LIMIT,
            closing_ticks: HUNT_CLOSING_TICKS,
        }
    }
}

impl HuntConfig {
    /// The earlier revision: three uniform deer, no bear.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            roster: HUNT_CLASSIC_ROSTER,
            weighted: false,
            bear_chance: 0.0,
            ammo_limit: HUNT_AMMO_LIMIT,
            closing_ticks: HUNT_CLOSING_TICKS,
        }
    }

    #[must_use]
    pub fn for_features(features: &FeatureFlags) -> Self {
        if features.bonus_quarry {
            Self::default()
        } else {
            Self::classic()
        }
    }
}

/// Per-kind kill counts and the total food brought back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntTally {
    pub does: u32,
    pub bucks: u32,
    pub bears: u32,
    pub food_gained: u32,
}

impl HuntTally {
    fn record(&mut self, kind: QuarryKind) {
        match kind {
            QuarryKind::Doe => self.does += 1,
            QuarryKind::Buck => self.bucks += 1,
            QuarryKind::Bear => self.bears += 1,
        }
        self.food_gained += kind.food_reward();
    }
}

/// End-of-session summary pushed back into the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntSummary {
    pub tally: HuntTally,
    pub ammo_used: u8,
    pub hits: u8,
}

/// What one trigger pull produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotReport {
    /// False when the pouch was already empty or the session was over.
    pub fired: bool,
    /// Number of targets downed by this shot (overlaps allowed).
    pub kills: u8,
    pub food_gained: u32,
    pub bear_taken: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntStatus {
    Active,
    /// Final display delay after the session's end condition hit.
    Closing { ticks_left: u8 },
    Ended,
}

/// One live hunting encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntSession {
    pub targets: SmallVec<[Target; 8]>,
    pub crosshair: Crosshair,
    pub ammo_used: u8,
    pub hits: u8,
    ammo_limit: u8,
    closing_ticks: u8,
    status: HuntStatus,
    tally: HuntTally,
}

impl HuntSession {
    /// Spawn a fresh roster off the right edge of the viewport.
    #[must_use]
    pub fn spawn(cfg: &HuntConfig, rng: &mut impl Rng) -> Self {
        let mut targets: SmallVec<[Target; 8]> = SmallVec::new();
        for i in 0..cfg.roster {
            #[allow(clippy::cast_precision_loss)]
            let x = HUNT_VIEW_WIDTH + i as f32 * HUNT_SPAWN_SPACING;
            let kind = if cfg.weighted && rng.gen_range(0.0..1.0) < HUNT_BUCK_WEIGHT {
                QuarryKind::Buck
            } else {
                QuarryKind::Doe
            };
            targets.push(Target {
                x,
                y: HUNT_SPAWN_Y_BASE + rng.gen_range(0.0..1.0f32) * HUNT_SPAWN_Y_SPREAD,
                speed: HUNT_SPEED_BASE + rng.gen_range(0.0..1.0f32) * HUNT_SPEED_SPREAD,
                kind,
                hit: false,
            });
        }

        if cfg.bear_chance > 0.0 && rng.gen_range(0.0..1.0) < cfg.bear_chance {
            targets.push(Target {
                x: HUNT_VIEW_WIDTH + rng.gen_range(0.0..1.0f32) * BEAR_SPAWN_X_SPREAD,
                y: BEAR_SPAWN_Y_BASE + rng.gen_range(0.0..1.0f32) * BEAR_SPAWN_Y_SPREAD,
                speed: BEAR_SPEED,
                kind: QuarryKind::Bear,
                hit: false,
            });
        }

        Self {
            targets,
            crosshair: Crosshair::default(),
            ammo_used: 0,
            hits: 0,
            ammo_limit: cfg.ammo_limit,
            closing_ticks: cfg.closing_ticks,
            status: HuntStatus::Active,
            tally: HuntTally::default(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> HuntStatus {
        self.status
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.status, HuntStatus::Ended)
    }

    #[must_use]
    pub const fn ammo_left(&self) -> u8 {
        self.ammo_limit.saturating_sub(self.ammo_used)
    }

    /// Advance one frame: live targets drift left and wrap to a fresh
    /// off-screen-right entry; hit targets stay down where they fell.
    /// Also counts down the closing delay once the session is over.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if let HuntStatus::Closing { ticks_left } = self.status {
            self.status = match ticks_left.checked_sub(1) {
                Some(left) if left > 0 => HuntStatus::Closing { ticks_left: left },
                _ => HuntStatus::Ended,
            };
        }

        for target in &mut self.targets {
            if target.hit {
                continue;
            }
            target.x -= target.speed;
            if target.x < -target.kind.body_width() {
                target.x = HUNT_VIEW_WIDTH + rng.gen_range(0.0..1.0f32) * HUNT_WRAP_X_SPREAD;
                target.y = HUNT_SPAWN_Y_BASE + rng.gen_range(0.0..1.0f32) * HUNT_SPAWN_Y_SPREAD;
            }
        }
    }

    /// Absolute crosshair positioning (pointer input), clamped to the
    /// viewport.
    pub fn aim_at(&mut self, x: f32, y: f32) {
        self.crosshair.x = x.clamp(0.0, HUNT_VIEW_WIDTH);
        self.crosshair.y = y.clamp(0.0, HUNT_VIEW_HEIGHT);
    }

    /// Relative step movement (directional input), clamped to the
    /// viewport.
    pub fn nudge(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.crosshair.y = (self.crosshair.y - CROSSHAIR_STEP).max(0.0),
            Direction::Down => {
                self.crosshair.y = (self.crosshair.y + CROSSHAIR_STEP).min(HUNT_VIEW_HEIGHT);
            }
            Direction::Left => self.crosshair.x = (self.crosshair.x - CROSSHAIR_STEP).max(0.0),
            Direction::Right => {
                self.crosshair.x = (self.crosshair.x + CROSSHAIR_STEP).min(HUNT_VIEW_WIDTH);
            }
        }
    }

    /// Fire at the current crosshair position. Consumes one ammo and
    /// downs every still-live target whose hitbox contains the
    /// crosshair. A no-op once ammo is exhausted or the session ended.
    pub fn shoot(&mut self) -> ShotReport {
        if !matches!(self.status, HuntStatus::Active) || self.ammo_used >= self.ammo_limit {
            return ShotReport::default();
        }
        self.ammo_used += 1;

        let mut report = ShotReport {
            fired: true,
            ..ShotReport::default()
        };
        let (cx, cy) = (self.crosshair.x, self.crosshair.y);
        for target in &mut self.targets {
            if target.hit || !target.contains(cx, cy) {
                continue;
            }
            target.hit = true;
            self.hits += 1;
            self.tally.record(target.kind);
            report.kills += 1;
            report.food_gained += target.kind.food_reward();
            if matches!(target.kind, QuarryKind::Bear) {
                report.bear_taken = true;
            }
        }

        let all_down = usize::from(self.hits) == self.targets.len();
        if self.ammo_used >= self.ammo_limit || all_down {
            self.status = HuntStatus::Closing {
                ticks_left: self.closing_ticks,
            };
        }
        report
    }

    #[must_use]
    pub const fn summary(&self) -> HuntSummary {
        HuntSummary {
            tally: self.tally,
            ammo_used: self.ammo_used,
            hits: self.hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0xBEA2)
    }

    fn session(cfg: &HuntConfig) -> HuntSession {
        HuntSession::spawn(cfg, &mut rng())
    }

    #[test]
    fn default_spawn_has_roster_and_maybe_bear() {
        let s = session(&HuntConfig::default());
        let bears = s
            .targets
            .iter()
            .filter(|t| matches!(t.kind, QuarryKind::Bear))
            .count();
        assert!(bears <= 1);
        assert_eq!(s.targets.len(), HUNT_ROSTER + bears);
        assert!(s.targets.iter().all(|t| t.x >= HUNT_VIEW_WIDTH));
        assert!(s.targets.iter().all(|t| !t.hit));
    }

    #[test]
    fn classic_spawn_is_three_uniform_deer() {
        let s = session(&HuntConfig::classic());
        assert_eq!(s.targets.len(), 3);
        assert!(s.targets.iter().all(|t| matches!(t.kind, QuarryKind::Doe)));
    }

    #[test]
    fn config_follows_feature_flags() {
        let rich = HuntConfig::for_features(&FeatureFlags::default());
        assert!(rich.weighted);
        let plain = HuntConfig::for_features(&FeatureFlags::classic());
        assert!(!plain.weighted);
        assert_eq!(plain.roster, 3);
    }

    #[test]
    fn tick_drifts_live_targets_left() {
        let mut s = session(&HuntConfig::classic());
        let before: Vec<f32> = s.targets.iter().map(|t| t.x).collect();
        s.tick(&mut rng());
        for (target, x0) in s.targets.iter().zip(before) {
            assert!(target.x < x0);
        }
    }

    #[test]
    fn offscreen_target_wraps_to_right_reentry() {
        let mut s = session(&HuntConfig::classic());
        s.targets[0].x = -s.targets[0].kind.body_width() - 1.0;
        s.tick(&mut rng());
        assert!(s.targets[0].x >= HUNT_VIEW_WIDTH);
        assert!(s.targets[0].y >= HUNT_SPAWN_Y_BASE);
    }

    #[test]
    fn hit_targets_stay_down_in_place() {
        let mut s = session(&HuntConfig::classic());
        s.targets[0].hit = true;
        let (x0, y0) = (s.targets[0].x, s.targets[0].y);
        s.tick(&mut rng());
        assert!((s.targets[0].x - x0).abs() < f32::EPSILON);
        assert!((s.targets[0].y - y0).abs() < f32::EPSILON);
    }

    #[test]
    fn one_shot_downs_every_overlapping_target() {
        let mut s = session(&HuntConfig::classic());
        // Stack two deer on the same spot and aim dead center.
        s.targets[0].x = 100.0;
        s.targets[0].y = 200.0;
        s.targets[1].x = 100.0;
        s.targets[1].y = 200.0;
        s.aim_at(105.0, 205.0);
        let report = s.shoot();
        assert!(report.fired);
        assert_eq!(report.kills, 2);
        assert_eq!(report.food_gained, 2 * FOOD_PER_DOE);
        assert_eq!(s.hits, 2);
        assert_eq!(s.ammo_used, 1);
    }

    #[test]
    fn miss_still_costs_ammo() {
        let mut s = session(&HuntConfig::classic());
        s.aim_at(0.0, 0.0);
        let report = s.shoot();
        assert!(report.fired);
        assert_eq!(report.kills, 0);
        assert_eq!(s.ammo_used, 1);
        assert_eq!(s.hits, 0);
    }

    #[test]
    fn ammo_exhaustion_closes_the_session() {
        let mut s = session(&HuntConfig::classic());
        s.aim_at(0.0, 0.0);
        for _ in 0..HUNT_AMMO_LIMIT {
            assert!(s.shoot().fired);
        }
        assert!(matches!(s.status(), HuntStatus::Closing { .. }));
        // The pouch is empty: further pulls are no-ops.
        assert!(!s.shoot().fired);
        assert_eq!(s.ammo_used, HUNT_AMMO_LIMIT);
        assert_eq!(s.ammo_left(), 0);
    }

    #[test]
    fn last_round_hit_still_ends_at_ammo_limit() {
        let mut s = session(&HuntConfig::classic());
        s.aim_at(0.0, 0.0);
        for _ in 0..HUNT_AMMO_LIMIT - 1 {
            s.shoot();
        }
        assert!(matches!(s.status(), HuntStatus::Active));
        s.targets[0].x = 300.0;
        s.targets[0].y = 200.0;
        s.aim_at(305.0, 205.0);
        let report = s.shoot();
        assert_eq!(report.kills, 1);
        assert!(
            matches!(s.status(), HuntStatus::Closing { .. }),
            "session must close at the ammo limit even with live targets left"
        );
    }

    #[test]
    fn all_targets_down_closes_early() {
        let mut s = session(&HuntConfig::classic());
        for i in 0..s.targets.len() {
            s.targets[i].x = 200.0;
            s.targets[i].y = 200.0;
        }
        s.aim_at(205.0, 205.0);
        let report = s.shoot();
        assert_eq!(usize::from(report.kills), s.targets.len());
        assert!(matches!(s.status(), HuntStatus::Closing { .. }));
        assert_eq!(s.ammo_used, 1);
    }

    #[test]
    fn closing_delay_counts_down_to_ended() {
        let mut s = session(&HuntConfig {
            closing_ticks: 3,
            ..HuntConfig::classic()
        });
        s.aim_at(0.0, 0.0);
        for _ in 0..HUNT_AMMO_LIMIT {
            s.shoot();
        }
        let mut r = rng();
        s.tick(&mut r);
        s.tick(&mut r);
        assert!(!s.is_over());
        s.tick(&mut r);
        assert!(s.is_over());
    }

    #[test]
    fn hits_never_exceed_ammo_times_targets() {
        let mut s = session(&HuntConfig::default());
        let mut r = rng();
        for _ in 0..200 {
            s.tick(&mut r);
            let x = r.gen_range(0.0..HUNT_VIEW_WIDTH);
            let y = r.gen_range(0.0..HUNT_VIEW_HEIGHT);
            s.aim_at(x, y);
            s.shoot();
            if s.is_over() {
                break;
            }
        }
        assert!(usize::from(s.hits) <= s.targets.len());
        assert!(s.ammo_used <= HUNT_AMMO_LIMIT);
    }

    #[test]
    fn crosshair_inputs_interleave_and_clamp() {
        let mut s = session(&HuntConfig::classic());
        s.aim_at(-50.0, 999.0);
        assert!((s.crosshair.x - 0.0).abs() < f32::EPSILON);
        assert!((s.crosshair.y - HUNT_VIEW_HEIGHT).abs() < f32::EPSILON);
        s.nudge(Direction::Up);
        assert!((s.crosshair.y - (HUNT_VIEW_HEIGHT - CROSSHAIR_STEP)).abs() < f32::EPSILON);
        s.nudge(Direction::Left);
        assert!((s.crosshair.x - 0.0).abs() < f32::EPSILON, "clamped at edge");
        s.aim_at(320.0, 200.0);
        s.nudge(Direction::Right);
        assert!((s.crosshair.x - 330.0).abs() < f32::EPSILON);
    }

    #[test]
    fn summary_reflects_the_tally() {
        let mut s = session(&HuntConfig::classic());
        s.targets[0].x = 100.0;
        s.targets[0].y = 100.0;
        s.aim_at(102.0, 102.0);
        s.shoot();
        let summary = s.summary();
        assert_eq!(summary.tally.does, 1);
        assert_eq!(summary.tally.food_gained, FOOD_PER_DOE);
        assert_eq!(summary.ammo_used, 1);
        assert_eq!(summary.hits, 1);
    }

    #[test]
    fn hitbox_metrics_match_sprite_sizes() {
        assert!((QuarryKind::Bear.body_width() - 60.0).abs() < f32::EPSILON);
        assert!((QuarryKind::Bear.body_height() - 48.0).abs() < f32::EPSILON);
        assert!((QuarryKind::Buck.body_width() - 40.0).abs() < f32::EPSILON);
        assert!((QuarryKind::Doe.body_width() - 32.0).abs() < f32::EPSILON);
        assert!((QuarryKind::Doe.body_height() - 26.0).abs() < f32::EPSILON);
    }
}
