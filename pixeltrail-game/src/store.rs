//! Outfitting prices and the departure budget gate.
//!
//! Prices are in cents to avoid floating-point issues. The gate runs
//! before `GameState` creation; an outfit over budget is rejected as a
//! soft error, never a panic.

use serde::{Deserialize, Serialize};

use crate::constants::{
    PRICE_AMMO_CENTS, PRICE_FOOD_CENTS, PRICE_MEDS_CENTS, PRICE_OXEN_CENTS, PRICE_PARTS_CENTS,
    TOTAL_BUDGET_CENTS,
};
use crate::state::{Resource, Supplies};

/// Unit price for one resource, in cents.
#[must_use]
pub const fn price_cents(resource: Resource) -> i64 {
    match resource {
        Resource::Food => PRICE_FOOD_CENTS,
        Resource::Ammo => PRICE_AMMO_CENTS,
        Resource::Oxen => PRICE_OXEN_CENTS,
        Resource::Parts => PRICE_PARTS_CENTS,
        Resource::Meds => PRICE_MEDS_CENTS,
    }
}

/// The total departure budget, in cents.
#[must_use]
pub const fn budget_cents() -> i64 {
    TOTAL_BUDGET_CENTS
}

/// Quantities the player wants to leave with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub food: u32,
    pub ammo: u32,
    pub oxen: u32,
    pub parts: u32,
    pub meds: u32,
}

impl Outfit {
    /// Total cost of the outfit, in cents.
    #[must_use]
    pub fn cost_cents(&self) -> i64 {
        let line = |qty: u32, resource: Resource| i64::from(qty) * price_cents(resource);
        line(self.food, Resource::Food)
            + line(self.ammo, Resource::Ammo)
            + line(self.oxen, Resource::Oxen)
            + line(self.parts, Resource::Parts)
            + line(self.meds, Resource::Meds)
    }

    #[must_use]
    pub fn within_budget(&self) -> bool {
        self.cost_cents() <= TOTAL_BUDGET_CENTS
    }
}

impl From<Outfit> for Supplies {
    fn from(outfit: Outfit) -> Self {
        Self {
            food: outfit.food,
            ammo: outfit.ammo,
            oxen: outfit.oxen,
            parts: outfit.parts,
            meds: outfit.meds,
        }
    }
}
