//! The top-level game controller.
//!
//! `TrailEngine` owns the single mutable `GameState` snapshot, the seeded
//! RNG, and the pending-resolution bookkeeping. It composes the travel
//! simulator and the hunting session, persists at every checkpoint (end
//! of day, end of crossing, end of hunt), and talks to the host through
//! the collaborator traits declared in the crate root.
//!
//! Re-entry discipline: while a river crossing awaits resolution, or a
//! hunting session is live, `advance_day` is rejected. The host's delay
//! between the "approaching river" frame and the crossing outcome is
//! modeled by the explicit `advance_day` / `resolve_crossing` split; the
//! funeral pause runs inside resolution via `Notifier::notify_pause`.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    LOG_CROSSING_APPROACH, LOG_CROSSING_DROWNED, LOG_CROSSING_FUNERAL, LOG_GAME_ARRIVED,
    LOG_GAME_TRAGEDY, LOG_HUNT_BEAR_DOWN, LOG_HUNT_BEGINS, LOG_HUNT_SUMMARY, LOG_JOURNEY_BEGINS,
};
use crate::hunt::{Direction, HuntConfig, HuntSession, HuntSummary, ShotReport};
use crate::rivers::{
    self, CrossingChoice, CrossingOutcome, DeepOutcome, DepthClass, classify_depth, resolve_deep,
};
use crate::state::{FeatureFlags, GameState, Resource};
use crate::store::{Outfit, budget_cents};
use crate::travel::{self, DayOutcome, GamePhase};
use crate::{DecisionPrompt, GameStorage, Notifier, Presenter};

/// Optional ancillary-event collaborator, fired on 10% of travel days.
/// Absent by default; absence means the draw is skipped entirely.
pub type EventHook = Box<dyn FnMut(&mut GameState)>;

#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("storage operation failed: {0}")]
    Storage(#[source] E),
    #[error("a river crossing is still resolving")]
    ResolutionPending,
    #[error("a hunting session is in progress")]
    HuntInProgress,
    #[error("no hunting session is active")]
    NoHuntActive,
    #[error("no crossing is awaiting resolution")]
    NoPendingCrossing,
    #[error("no game in progress")]
    NoActiveGame,
    #[error("outfit costs {cost_cents} cents against a budget of {budget_cents}")]
    BudgetExceeded { cost_cents: i64, budget_cents: i64 },
}

/// How one full crossing resolved, as reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingReport {
    pub outcome: CrossingOutcome,
    /// Index of the drowned member, when the float tipped the wagon.
    pub victim: Option<usize>,
}

/// Top-level driver composing the travel simulator and hunting session.
pub struct TrailEngine<S, U>
where
    S: GameStorage,
    U: Presenter + DecisionPrompt + Notifier,
{
    storage: S,
    ui: U,
    state: Option<GameState>,
    phase: GamePhase,
    pending_crossing: bool,
    hunt: Option<HuntSession>,
    rng: ChaCha20Rng,
    features: FeatureFlags,
    event_hook: Option<EventHook>,
}

impl<S, U> TrailEngine<S, U>
where
    S: GameStorage,
    U: Presenter + DecisionPrompt + Notifier,
{
    #[must_use]
    pub fn new(storage: S, ui: U) -> Self {
        Self {
            storage,
            ui,
            state: None,
            phase: GamePhase::Idle,
            pending_crossing: false,
            hunt: None,
            rng: ChaCha20Rng::seed_from_u64(0),
            features: FeatureFlags::default(),
            event_hook: None,
        }
    }

    /// Select which historical feature revision new games use.
    #[must_use]
    pub const fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Install the optional ancillary event collaborator.
    pub fn set_event_hook(&mut self, hook: EventHook) {
        self.event_hook = Some(hook);
    }

    #[must_use]
    pub const fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub const fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn hunt(&self) -> Option<&HuntSession> {
        self.hunt.as_ref()
    }

    #[must_use]
    pub const fn crossing_pending(&self) -> bool {
        self.pending_crossing
    }

    /// Landmark message key for the current position, if a run is live.
    #[must_use]
    pub fn landmark(&self) -> Option<&'static str> {
        self.state
            .as_ref()
            .map(|state| travel::landmark_for_miles(state.miles))
    }

    /// Start a fresh run. The outfit must pass the departure budget gate.
    ///
    /// # Errors
    ///
    /// Returns `BudgetExceeded` for an over-budget outfit, or a storage
    /// error if the initial snapshot cannot be persisted.
    pub fn new_game(
        &mut self,
        player: impl Into<String>,
        companions: Vec<String>,
        outfit: Outfit,
        seed: u64,
    ) -> Result<(), EngineError<S::Error>> {
        if !outfit.within_budget() {
            return Err(EngineError::BudgetExceeded {
                cost_cents: outfit.cost_cents(),
                budget_cents: budget_cents(),
            });
        }
        let mut state = GameState::new(player, companions, outfit.into(), seed)
            .with_features(self.features);
        state.push_log(LOG_JOURNEY_BEGINS);
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self.storage.save(&state).map_err(EngineError::Storage)?;
        self.ui.notify(LOG_JOURNEY_BEGINS);
        self.ui.render_frame(&state);
        self.state = Some(state);
        self.phase = GamePhase::Idle;
        self.pending_crossing = false;
        self.hunt = None;
        Ok(())
    }

    /// Resume from the persisted snapshot. An absent save is "start
    /// fresh", never an error; returns whether a run was restored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage layer itself fails.
    pub fn resume(&mut self) -> Result<bool, anyhow::Error> {
        let Some(state) = self.storage.load().map_err(anyhow::Error::new)? else {
            return Ok(false);
        };
        // Reseed on the day counter so a resumed run does not replay the
        // original day-one draws.
        self.rng = ChaCha20Rng::seed_from_u64(state.seed ^ (u64::from(state.day) << 32));
        debug!("resumed run: day {} at {} miles", state.day, state.miles);
        self.ui.render_frame(&state);
        self.state = Some(state);
        self.phase = GamePhase::Idle;
        self.pending_crossing = false;
        self.hunt = None;
        Ok(true)
    }

    /// Drop the current run and its persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the snapshot cannot be cleared.
    pub fn abandon(&mut self) -> Result<(), EngineError<S::Error>> {
        self.storage.clear().map_err(EngineError::Storage)?;
        self.state = None;
        self.hunt = None;
        self.pending_crossing = false;
        self.phase = GamePhase::Idle;
        Ok(())
    }

    /// Advance one travel day. Either the day travels normally, a river
    /// encounter suspends it (resolve with [`Self::resolve_crossing`]),
    /// or the run ends.
    ///
    /// # Errors
    ///
    /// Rejected while a crossing is pending or a hunt is live; storage
    /// errors propagate from the persistence checkpoint.
    pub fn advance_day(&mut self) -> Result<DayOutcome, EngineError<S::Error>> {
        self.ensure_unblocked()?;
        let state = self.state.as_mut().ok_or(EngineError::NoActiveGame)?;

        let trigger = self.rng.gen_range(0.0..1.0);
        if travel::river_triggered(trigger) {
            state.on_river = true;
            state.push_log(LOG_CROSSING_APPROACH);
            self.pending_crossing = true;
            self.phase = GamePhase::RiverCrossing;
            self.ui.notify(LOG_CROSSING_APPROACH);
            self.ui.render_frame(state);
            return Ok(DayOutcome::RiverAhead);
        }

        let r = self.rng.gen_range(0.0..1.0);
        let mut report = travel::travel_normal_day(state, r);
        debug!(
            "day {}: +{} miles, -{} food",
            report.day, report.miles_gained, report.food_consumed
        );

        if let Some(terminal) = travel::check_terminal(state) {
            return self.finish_run(terminal);
        }

        if self.event_hook.is_some() {
            let draw = self.rng.gen_range(0.0..1.0);
            if travel::ancillary_event_triggered(draw) {
                if let Some(hook) = self.event_hook.as_mut() {
                    hook(state);
                }
                report.event_triggered = true;
            }
        }

        self.storage.save(state).map_err(EngineError::Storage)?;
        self.ui.render_frame(state);
        self.phase = GamePhase::Idle;
        Ok(DayOutcome::Traveled(report))
    }

    /// Complete a suspended river crossing: classify the depth, prompt
    /// for a decision when deep, apply the outcome, and persist. The
    /// funeral pause after a drowning runs through `notify_pause` before
    /// the day's resolution completes.
    ///
    /// # Errors
    ///
    /// Returns `NoPendingCrossing` when no crossing is suspended, or a
    /// storage error from the persistence checkpoint.
    pub fn resolve_crossing(&mut self) -> Result<CrossingReport, EngineError<S::Error>> {
        if !self.pending_crossing {
            return Err(EngineError::NoPendingCrossing);
        }
        let state = self.state.as_mut().ok_or(EngineError::NoActiveGame)?;

        let depth = self.rng.gen_range(0.0..1.0);
        let report = match classify_depth(depth) {
            DepthClass::Shallow => {
                let key = rivers::apply_shallow(state);
                self.ui.notify(key);
                CrossingReport {
                    outcome: CrossingOutcome::Shallow,
                    victim: None,
                }
            }
            DepthClass::Deep => {
                let options = CrossingChoice::offered(&state.features);
                let answer = self.ui.ask_choice(&options);
                let choice = answer.parse::<CrossingChoice>().ok();
                let roll = self.rng.gen_range(0.0..1.0);
                let outcome = resolve_deep(choice, roll, &state.supplies, &state.features);
                let victim = if outcome == DeepOutcome::Drowning {
                    let victim = rivers::pick_victim(state.party_size(), &mut self.rng);
                    state.strike_down(victim);
                    state.push_log(LOG_CROSSING_DROWNED);
                    self.ui.notify(LOG_CROSSING_DROWNED);
                    // Mourning pause; completes after the host's delay.
                    self.ui.notify_pause(LOG_CROSSING_FUNERAL);
                    state.push_log(LOG_CROSSING_FUNERAL);
                    Some(victim)
                } else {
                    let key = rivers::apply_deep(state, outcome);
                    self.ui.notify(key);
                    None
                };
                CrossingReport {
                    outcome: CrossingOutcome::Deep(outcome),
                    victim,
                }
            }
        };

        state.on_river = false;
        self.pending_crossing = false;
        self.phase = GamePhase::Idle;
        self.storage.save(state).map_err(EngineError::Storage)?;
        self.ui.render_frame(state);
        Ok(report)
    }

    /// Enter the hunting minigame. The travel view suspends; day
    /// advancement is rejected until the session ends.
    ///
    /// # Errors
    ///
    /// Rejected while a crossing is pending or a hunt is already live.
    pub fn start_hunt(&mut self) -> Result<(), EngineError<S::Error>> {
        self.ensure_unblocked()?;
        let state = self.state.as_mut().ok_or(EngineError::NoActiveGame)?;
        state.push_log(LOG_HUNT_BEGINS);
        let cfg = HuntConfig::for_features(&state.features);
        let session = HuntSession::spawn(&cfg, &mut self.rng);
        self.ui.notify(LOG_HUNT_BEGINS);
        self.ui.render_hunt_frame(&session);
        self.hunt = Some(session);
        self.phase = GamePhase::Hunting;
        Ok(())
    }

    /// Advance the hunt by one frame. Returns the end-of-session summary
    /// once the closing delay elapses; at that point the session has
    /// already been folded into the game state and persisted.
    ///
    /// # Errors
    ///
    /// Returns `NoHuntActive` outside a session, or a storage error from
    /// the end-of-hunt checkpoint.
    pub fn hunt_tick(&mut self) -> Result<Option<HuntSummary>, EngineError<S::Error>> {
        let session = self.hunt.as_mut().ok_or(EngineError::NoHuntActive)?;
        session.tick(&mut self.rng);
        if session.is_over() {
            let summary = session.summary();
            self.finish_hunt(summary)?;
            return Ok(Some(summary));
        }
        self.ui.render_hunt_frame(session);
        Ok(None)
    }

    /// Absolute crosshair positioning (pointer input).
    ///
    /// # Errors
    ///
    /// Returns `NoHuntActive` outside a session.
    pub fn hunt_aim(&mut self, x: f32, y: f32) -> Result<(), EngineError<S::Error>> {
        let session = self.hunt.as_mut().ok_or(EngineError::NoHuntActive)?;
        session.aim_at(x, y);
        self.ui.render_hunt_frame(session);
        Ok(())
    }

    /// Relative crosshair step (directional input).
    ///
    /// # Errors
    ///
    /// Returns `NoHuntActive` outside a session.
    pub fn hunt_nudge(&mut self, direction: Direction) -> Result<(), EngineError<S::Error>> {
        let session = self.hunt.as_mut().ok_or(EngineError::NoHuntActive)?;
        session.nudge(direction);
        self.ui.render_hunt_frame(session);
        Ok(())
    }

    /// Fire at the current crosshair position. Food rewards are credited
    /// to the ledger as each hit lands.
    ///
    /// # Errors
    ///
    /// Returns `NoHuntActive` outside a session.
    pub fn hunt_shoot(&mut self) -> Result<ShotReport, EngineError<S::Error>> {
        let session = self.hunt.as_mut().ok_or(EngineError::NoHuntActive)?;
        let report = session.shoot();
        if report.food_gained > 0 {
            let state = self.state.as_mut().ok_or(EngineError::NoActiveGame)?;
            state.supplies.credit(Resource::Food, report.food_gained);
            if report.bear_taken {
                state.push_log(LOG_HUNT_BEAR_DOWN);
                self.ui.notify(LOG_HUNT_BEAR_DOWN);
            }
        }
        if let Some(session) = self.hunt.as_ref() {
            self.ui.render_hunt_frame(session);
        }
        Ok(report)
    }

    fn finish_hunt(&mut self, summary: HuntSummary) -> Result<(), EngineError<S::Error>> {
        self.hunt = None;
        let state = self.state.as_mut().ok_or(EngineError::NoActiveGame)?;
        state.push_log(LOG_HUNT_SUMMARY);
        debug!(
            "hunt over: {} hits for {} lbs",
            summary.hits, summary.tally.food_gained
        );
        self.ui.notify(LOG_HUNT_SUMMARY);
        self.storage.save(state).map_err(EngineError::Storage)?;
        self.ui.render_frame(state);
        self.phase = GamePhase::Idle;
        Ok(())
    }

    fn finish_run(&mut self, outcome: DayOutcome) -> Result<DayOutcome, EngineError<S::Error>> {
        let (key, phase) = match outcome {
            DayOutcome::Tragedy(_) => (LOG_GAME_TRAGEDY, GamePhase::GameOver),
            DayOutcome::Arrived => (LOG_GAME_ARRIVED, GamePhase::Victory),
            DayOutcome::RiverAhead | DayOutcome::Traveled(_) => return Ok(outcome),
        };
        if let Some(state) = self.state.as_mut() {
            state.push_log(key);
        }
        self.ui.notify(key);
        // Terminal transitions destroy the snapshot; the next session
        // starts fresh.
        self.storage.clear().map_err(EngineError::Storage)?;
        self.state = None;
        self.pending_crossing = false;
        self.phase = phase;
        Ok(outcome)
    }

    const fn ensure_unblocked(&self) -> Result<(), EngineError<S::Error>> {
        if self.pending_crossing {
            return Err(EngineError::ResolutionPending);
        }
        if self.hunt.is_some() {
            return Err(EngineError::HuntInProgress);
        }
        Ok(())
    }
}
