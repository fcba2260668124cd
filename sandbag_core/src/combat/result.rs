//! HitOutcome - What a single punch did

use serde::{Deserialize, Serialize};

/// Poison applied by a punch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoisonApplication {
    /// Damage per poison tick
    pub dps: f64,
    pub duration_ms: u64,
}

/// Result of resolving one punch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HitOutcome {
    /// Random roll plus every flat bonus
    pub base: f64,
    /// Damage after increased damage, crit and jackpot, before the Awl proc
    ///
    /// Bone Unity minions copy this value.
    pub hit: f64,
    /// Extra damage from the Awl, 0 when it did not proc
    pub awl_damage: f64,
    /// Integer damage dealt to the encounter
    pub dealt: u64,

    // === Flags ===
    pub is_crit: bool,
    pub is_jackpot: bool,

    /// Poison applied by this punch, if any
    pub poison: Option<PoisonApplication>,
}

impl HitOutcome {
    /// Unrounded damage including the Awl proc
    pub fn total(&self) -> f64 {
        self.hit + self.awl_damage
    }

    pub fn awl_procced(&self) -> bool {
        self.awl_damage > 0.0
    }
}
