//! Root game state aggregate and the supply/party ledger.
//!
//! `GameState` is the single snapshot the controller owns and persists.
//! Every field round-trips through serde losslessly; nothing here is
//! derived or recomputed on load.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::{FULL_HEALTH, TRAIL_GOAL_MILES};

/// A countable supply category carried by the wagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Food,
    Ammo,
    Oxen,
    Parts,
    Meds,
}

impl Resource {
    pub const ALL: [Self; 5] = [Self::Food, Self::Ammo, Self::Oxen, Self::Parts, Self::Meds];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Ammo => "ammo",
            Self::Oxen => "oxen",
            Self::Parts => "parts",
            Self::Meds => "meds",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "ammo" => Ok(Self::Ammo),
            "oxen" => Ok(Self::Oxen),
            "parts" => Ok(Self::Parts),
            "meds" => Ok(Self::Meds),
            _ => Err(()),
        }
    }
}

/// Supply counts. All operations saturate at zero; a count can never go
/// negative no matter how large the requested consumption is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub food: u32,
    pub ammo: u32,
    pub oxen: u32,
    pub parts: u32,
    pub meds: u32,
}

impl Supplies {
    #[must_use]
    pub const fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Food => self.food,
            Resource::Ammo => self.ammo,
            Resource::Oxen => self.oxen,
            Resource::Parts => self.parts,
            Resource::Meds => self.meds,
        }
    }

    const fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Food => &mut self.food,
            Resource::Ammo => &mut self.ammo,
            Resource::Oxen => &mut self.oxen,
            Resource::Parts => &mut self.parts,
            Resource::Meds => &mut self.meds,
        }
    }

    /// Consume up to `amount` units, clamping at zero.
    /// Returns the quantity actually removed.
    pub const fn consume(&mut self, resource: Resource, amount: u32) -> u32 {
        let slot = self.slot_mut(resource);
        let taken = if *slot < amount { *slot } else { amount };
        *slot -= taken;
        taken
    }

    /// Credit `amount` units back to the ledger.
    pub const fn credit(&mut self, resource: Resource, amount: u32) {
        let slot = self.slot_mut(resource);
        *slot = slot.saturating_add(amount);
    }
}

/// Capability flags selecting between the two historical feature revisions
/// of the game. The default enables the superset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Offer the "hire guide" option at deep river crossings.
    pub hire_guide: bool,
    /// Weighted buck/doe spawns plus the chance of a bonus bear target.
    pub bonus_quarry: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            hire_guide: true,
            bonus_quarry: true,
        }
    }
}

impl FeatureFlags {
    /// Flags matching the earlier, simpler revision: no guide option and
    /// a uniform three-deer hunt roster.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            hire_guide: false,
            bonus_quarry: false,
        }
    }
}

/// Why a run ended in defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossCause {
    Starved,
    OxenGone,
    PartyLost,
}

/// The single root aggregate for one run of the trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: String,
    pub companions: Vec<String>,
    pub supplies: Supplies,
    /// Health percentages, index 0 is the player, index `i + 1` is
    /// `companions[i]`. Zero means dead.
    pub party_health: SmallVec<[u8; 8]>,
    pub day: u32,
    pub miles: u32,
    pub rivers_crossed: u32,
    /// Transient flag set while a river crossing is mid-resolution.
    pub on_river: bool,
    pub seed: u64,
    #[serde(default)]
    pub features: FeatureFlags,
    /// Message-key journal of everything notable that happened this run.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl GameState {
    #[must_use]
    pub fn new(
        player: impl Into<String>,
        companions: Vec<String>,
        supplies: Supplies,
        seed: u64,
    ) -> Self {
        let player = player.into();
        let party_health = std::iter::repeat_n(FULL_HEALTH, 1 + companions.len()).collect();
        Self {
            player,
            companions,
            supplies,
            party_health,
            day: 0,
            miles: 0,
            rivers_crossed: 0,
            on_river: false,
            seed,
            features: FeatureFlags::default(),
            logs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Player plus companions.
    #[must_use]
    pub fn party_size(&self) -> usize {
        1 + self.companions.len()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.party_health.iter().filter(|hp| **hp > 0).count()
    }

    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.party_health.iter().all(|hp| *hp == 0)
    }

    /// Name of party member `index`; index 0 is the player.
    #[must_use]
    pub fn member_name(&self, index: usize) -> Option<&str> {
        if index == 0 {
            Some(self.player.as_str())
        } else {
            self.companions.get(index - 1).map(String::as_str)
        }
    }

    /// Reduce a member's health, clamping at zero. Out-of-range indices
    /// are ignored.
    pub fn apply_damage(&mut self, member: usize, amount: u8) {
        if let Some(hp) = self.party_health.get_mut(member) {
            *hp = hp.saturating_sub(amount);
        }
    }

    /// Kill a member outright. Out-of-range indices are ignored.
    pub fn strike_down(&mut self, member: usize) {
        if let Some(hp) = self.party_health.get_mut(member) {
            *hp = 0;
        }
    }

    /// Restore a member's health, clamping at the full-health cap.
    pub fn heal(&mut self, member: usize, amount: u8) {
        if let Some(hp) = self.party_health.get_mut(member) {
            if *hp > 0 {
                *hp = hp.saturating_add(amount).min(FULL_HEALTH);
            }
        }
    }

    /// Loss gate: no food, no oxen, or an entirely dead party.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.loss_cause().is_some()
    }

    #[must_use]
    pub fn loss_cause(&self) -> Option<LossCause> {
        if self.supplies.food == 0 {
            Some(LossCause::Starved)
        } else if self.supplies.oxen == 0 {
            Some(LossCause::OxenGone)
        } else if self.all_dead() {
            Some(LossCause::PartyLost)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.miles >= TRAIL_GOAL_MILES
    }

    pub fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }
}
