//! AggregateStats - Combat statistics resolved from the equipped items
//!
//! Resolution is order-sensitive and runs in three passes:
//! 1. amplifier discovery: `weapon_effect_scale` affixes on ring slots are summed
//! 2. weighted accumulation: every occupied slot is applied, weapons scaled by
//!    the amplifier
//! 3. cross-item mirroring: a Twin Mirror re-applies the opposite ring at 2x
//!
//! Pass 2 and 3 are expressed as [`StatSource`]s sorted by priority, so the
//! mirror always sees the amplifier as it stood after pass 1.

mod aggregator;

pub use aggregator::{StatAccumulator, BASE_ARROW_COUNT, BASE_CRIT_MULTIPLIER};

use crate::cadence::Cadence;
use crate::equipment::Equipment;
use crate::item::Item;
use crate::source::{GearSource, MirrorSource, StatSource};
use crate::types::{EquipmentSlot, ItemCategory, StatKind, UniqueKind};
use serde::{Deserialize, Serialize};

/// Aggregate combat statistics, recomputed on demand and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    // === Damage ===
    pub increased_damage_pct: f64,
    pub crit_chance_pct: f64,
    /// Includes the base 200%
    pub crit_multiplier_pct: f64,
    pub projectile_count: f64,
    /// Sum of equipped base damage (mirror included), never amplified
    pub flat_damage_bonus: f64,

    // === Poison ===
    pub poison_damage_pct: f64,
    pub poison_chance_pct: f64,
    pub poison_duration_pct: f64,

    // === Minions ===
    pub minion_damage_pct: f64,
    /// Share of the last hit minions deal while `damage_mirrors_player`
    pub minion_copy_damage_pct: f64,
    pub summon_count: f64,
    /// Includes the base single arrow
    pub summon_arrow_count: f64,
    pub summon_speed_bonus_pct: f64,
    pub damage_mirrors_player: bool,
    pub storm_count: u32,

    // === Rings ===
    pub weapon_effect_scale_pct: f64,
    pub jackpot_chance_pct: f64,
    pub jackpot_enabled: bool,

    // === Weapons ===
    pub awl_enabled: bool,
    /// Automatic attacks per second
    pub drill_rate: u32,
}

impl Default for AggregateStats {
    fn default() -> Self {
        StatAccumulator::new().finish()
    }
}

impl AggregateStats {
    /// Resolve the stats of an equipment set
    ///
    /// Pure: the same equipment always yields the same snapshot.
    pub fn compute(equipment: &Equipment) -> AggregateStats {
        let amplifier = amplifier_pct(equipment);
        let weapon_scale = 1.0 + amplifier / 100.0;

        let mut sources: Vec<Box<dyn StatSource + '_>> = Vec::new();
        for (slot, item) in equipment.iter() {
            let scale = match slot.category() {
                ItemCategory::Weapon => weapon_scale,
                ItemCategory::Ring => 1.0,
            };
            sources.push(Box::new(GearSource::new(slot, item, scale)));
        }
        for (slot, partner) in mirrored_partners(equipment) {
            sources.push(Box::new(MirrorSource::new(slot, partner)));
        }

        Self::from_sources(&sources)
    }

    /// Apply sources in priority order (stable for equal priorities)
    pub fn from_sources(sources: &[Box<dyn StatSource + '_>]) -> AggregateStats {
        let mut sorted: Vec<_> = sources.iter().collect();
        sorted.sort_by_key(|s| s.priority());

        let mut accumulator = StatAccumulator::new();
        for source in sorted {
            log::trace!("applying {} (priority {})", source.id(), source.priority());
            source.apply(&mut accumulator);
        }
        accumulator.finish()
    }

    /// Auto-attack cadence implied by these stats
    pub fn auto_attack_cadence(&self) -> Cadence {
        Cadence::from_rate(self.drill_rate)
    }

    /// Whether a skeleton archer is summoned
    pub fn has_minion(&self) -> bool {
        self.summon_count > 0.0
    }

    /// Multiplier applied to weapon affixes by the ring amplifier
    pub fn weapon_scale(&self) -> f64 {
        1.0 + self.weapon_effect_scale_pct / 100.0
    }

    /// Plain-text summary, one stat per line, skipping zero values
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut push = |label: &str, value: f64, suffix: &str| {
            if value != 0.0 {
                lines.push(format!("{}: {}{}", label, round2(value), suffix));
            }
        };
        push("Flat damage", self.flat_damage_bonus, "");
        push("Increased damage", self.increased_damage_pct, "%");
        push("Crit chance", self.crit_chance_pct, "%");
        push("Crit multiplier", self.crit_multiplier_pct, "%");
        push("Projectiles", self.projectile_count, "");
        push("Poison damage", self.poison_damage_pct, "%");
        push("Poison chance", self.poison_chance_pct, "%");
        push("Poison duration", self.poison_duration_pct, "%");
        push("Minion damage", self.minion_damage_pct, "%");
        push("Minion copy damage", self.minion_copy_damage_pct, "%");
        push("Skeletons", self.summon_count, "");
        push("Skeleton arrows", self.summon_arrow_count, "");
        push("Skeleton speed", self.summon_speed_bonus_pct, "%");
        push("Weapon amplifier", self.weapon_effect_scale_pct, "%");
        push("Jackpot chance", self.jackpot_chance_pct, "%");

        if self.awl_enabled {
            lines.push("Awl: enabled".to_string());
        }
        if self.drill_rate > 0 {
            lines.push(format!("Drill: {} hits/s", self.drill_rate));
        }
        if self.storm_count > 0 {
            lines.push(format!("Skeleton storm x{}", self.storm_count));
        }
        lines
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pass 1: amplifier contributed by ring slots only
fn amplifier_pct(equipment: &Equipment) -> f64 {
    ItemCategory::Ring
        .slots()
        .iter()
        .filter_map(|slot| equipment.get(*slot))
        .map(|ring| ring.stat_total(StatKind::WeaponEffectScale) as f64)
        .sum()
}

/// Ring slots holding a Twin Mirror, paired with the occupied opposite ring
fn mirrored_partners(equipment: &Equipment) -> Vec<(EquipmentSlot, &Item)> {
    ItemCategory::Ring
        .slots()
        .into_iter()
        .filter(|slot| {
            equipment
                .get(*slot)
                .and_then(Item::unique_kind)
                .map_or(false, |kind| kind == UniqueKind::TwinMirror)
        })
        .filter_map(|slot| equipment.get(slot.opposite()).map(|partner| (slot, partner)))
        .collect()
}
