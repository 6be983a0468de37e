//! Pixel Trail Game Engine
//!
//! Platform-agnostic core game logic for the Pixel Trail survival game.
//! This crate provides the supply ledger, travel simulation, river
//! crossings, and the hunting minigame without UI or platform-specific
//! dependencies. Hosts plug in persistence, presentation, decisions, and
//! notifications through the collaborator traits below.

pub mod constants;
pub mod engine;
pub mod hunt;
pub mod rivers;
pub mod seed;
pub mod state;
pub mod store;
pub mod travel;

// Re-export commonly used types
pub use engine::{CrossingReport, EngineError, EventHook, TrailEngine};
pub use hunt::{
    Crosshair, Direction, HuntConfig, HuntSession, HuntStatus, HuntSummary, HuntTally, QuarryKind,
    ShotReport, Target,
};
pub use rivers::{
    CrossingChoice, CrossingOutcome, DeepOutcome, DepthClass, classify_depth, pick_victim,
    resolve_deep,
};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use state::{FeatureFlags, GameState, LossCause, Resource, Supplies};
pub use store::{Outfit, budget_cents, price_cents};
pub use travel::{DayOutcome, GamePhase, TravelReport, landmark_for_miles};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the current game snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save(&self, snapshot: &GameState) -> Result<(), Self::Error>;

    /// Load the persisted snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be loaded.
    fn load(&self) -> Result<Option<GameState>, Self::Error>;

    /// Delete the persisted snapshot. Deleting an absent snapshot is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Trait for the host's display surface. Called whenever the engine has
/// a fresh frame worth showing; implementations decide what a "frame"
/// looks like.
pub trait Presenter {
    /// Show the travel view for the given state.
    fn render_frame(&mut self, state: &GameState);

    /// Show the hunt view for a live session.
    fn render_hunt_frame(&mut self, session: &HuntSession);
}

/// Trait for asking the player to pick a crossing option. The returned
/// string is parsed leniently; anything unrecognized resolves as the
/// generic botched attempt.
pub trait DecisionPrompt {
    fn ask_choice(&mut self, options: &[CrossingChoice]) -> String;
}

/// Trait for player-facing notifications. Keys are the `LOG_*` message
/// identifiers from [`constants`]; the host owns the actual wording.
pub trait Notifier {
    /// Fire-and-forget notification.
    fn notify(&mut self, key: &str);

    /// Notification that holds the game (e.g. the funeral after a
    /// drowning). The engine continues once this returns.
    fn notify_pause(&mut self, key: &str);
}
