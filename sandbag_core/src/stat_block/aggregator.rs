//! StatAccumulator - Collects item contributions before they become AggregateStats

use crate::stat_block::AggregateStats;
use crate::types::{StatKind, UniqueKind};

/// Crit multiplier every character starts with, in percent
pub const BASE_CRIT_MULTIPLIER: f64 = 200.0;
/// Arrows a skeleton archer fires per volley before affixes
pub const BASE_ARROW_COUNT: f64 = 1.0;

/// Accumulates stat contributions from every source
///
/// Sources add into this; [`StatAccumulator::finish`] adds the base values and
/// produces the snapshot.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    // === Damage ===
    pub increased_damage_pct: f64,
    pub crit_chance_pct: f64,
    pub crit_multiplier_pct: f64,
    pub projectile_count: f64,
    pub flat_damage_bonus: f64,

    // === Poison ===
    pub poison_damage_pct: f64,
    pub poison_chance_pct: f64,
    pub poison_duration_pct: f64,

    // === Minions ===
    pub minion_damage_pct: f64,
    pub minion_copy_damage_pct: f64,
    pub summon_count: f64,
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
    pub drill_rate: u32,
}

impl StatAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a (possibly scaled) affix value to the stat it targets
    pub fn apply_stat(&mut self, stat: StatKind, value: f64) {
        match stat {
            StatKind::IncreasedDamage => self.increased_damage_pct += value,
            StatKind::CritChance => self.crit_chance_pct += value,
            StatKind::CritMultiplier => self.crit_multiplier_pct += value,
            StatKind::Projectiles => self.projectile_count += value,
            StatKind::PoisonDamage => self.poison_damage_pct += value,
            StatKind::PoisonChance => self.poison_chance_pct += value,
            StatKind::PoisonDuration => self.poison_duration_pct += value,
            StatKind::MinionDamage => self.minion_damage_pct += value,
            StatKind::SummonSkeleton => self.summon_count += value,
            StatKind::SkeletonArrows => self.summon_arrow_count += value,
            StatKind::WeaponEffectScale => self.weapon_effect_scale_pct += value,
        }
    }

    /// Apply a unique behaviour `times` times
    ///
    /// Numeric parameters and counters are multiplied by `times`; flags are set.
    pub fn apply_unique(&mut self, kind: UniqueKind, times: u32) {
        let n = times as f64;
        match kind {
            UniqueKind::Awl => self.awl_enabled = true,
            UniqueKind::ElectricDrill { hits_per_second } => {
                self.drill_rate = self.drill_rate.saturating_add(hits_per_second.saturating_mul(times));
            }
            UniqueKind::BoneUnity { share_pct } => {
                self.damage_mirrors_player = true;
                self.minion_copy_damage_pct += share_pct as f64 * n;
            }
            UniqueKind::HornetStinger { duration_pct } => {
                self.poison_chance_pct += 100.0 * n;
                self.poison_damage_pct += 100.0 * n;
                self.poison_duration_pct += duration_pct as f64 * n;
            }
            UniqueKind::SkeletonStorm { speed_bonus_pct } => {
                self.storm_count = self.storm_count.saturating_add(times);
                self.summon_speed_bonus_pct += speed_bonus_pct as f64 * n;
            }
            UniqueKind::Jackpot { chance_pct } => {
                self.jackpot_enabled = true;
                self.jackpot_chance_pct += chance_pct as f64 * n;
            }
            // Absurdity only contributes base damage; the mirror acts in its own pass
            UniqueKind::Absurdity | UniqueKind::TwinMirror => {}
        }
    }

    /// Add base values and produce the snapshot
    pub fn finish(&self) -> AggregateStats {
        AggregateStats {
            increased_damage_pct: self.increased_damage_pct,
            crit_chance_pct: self.crit_chance_pct,
            crit_multiplier_pct: BASE_CRIT_MULTIPLIER + self.crit_multiplier_pct,
            projectile_count: self.projectile_count,
            poison_damage_pct: self.poison_damage_pct,
            poison_chance_pct: self.poison_chance_pct,
            poison_duration_pct: self.poison_duration_pct,
            minion_damage_pct: self.minion_damage_pct,
            minion_copy_damage_pct: self.minion_copy_damage_pct,
            summon_count: self.summon_count,
            summon_arrow_count: BASE_ARROW_COUNT + self.summon_arrow_count,
            summon_speed_bonus_pct: self.summon_speed_bonus_pct,
            flat_damage_bonus: self.flat_damage_bonus,
            weapon_effect_scale_pct: self.weapon_effect_scale_pct,
            jackpot_chance_pct: self.jackpot_chance_pct,
            damage_mirrors_player: self.damage_mirrors_player,
            storm_count: self.storm_count,
            awl_enabled: self.awl_enabled,
            drill_rate: self.drill_rate,
            jackpot_enabled: self.jackpot_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stat_kind_lands_in_its_field() {
        let mut acc = StatAccumulator::new();
        acc.apply_stat(StatKind::IncreasedDamage, 1.0);
        acc.apply_stat(StatKind::CritChance, 2.0);
        acc.apply_stat(StatKind::CritMultiplier, 3.0);
        acc.apply_stat(StatKind::Projectiles, 4.0);
        acc.apply_stat(StatKind::PoisonDamage, 5.0);
        acc.apply_stat(StatKind::PoisonChance, 6.0);
        acc.apply_stat(StatKind::PoisonDuration, 7.0);
        acc.apply_stat(StatKind::MinionDamage, 8.0);
        acc.apply_stat(StatKind::SummonSkeleton, 1.0);
        acc.apply_stat(StatKind::SkeletonArrows, 2.0);
        acc.apply_stat(StatKind::WeaponEffectScale, 30.0);

        let stats = acc.finish();
        assert!((stats.increased_damage_pct - 1.0).abs() < f64::EPSILON);
        assert!((stats.crit_chance_pct - 2.0).abs() < f64::EPSILON);
        assert!((stats.crit_multiplier_pct - 203.0).abs() < f64::EPSILON);
        assert!((stats.projectile_count - 4.0).abs() < f64::EPSILON);
        assert!((stats.poison_damage_pct - 5.0).abs() < f64::EPSILON);
        assert!((stats.poison_chance_pct - 6.0).abs() < f64::EPSILON);
        assert!((stats.poison_duration_pct - 7.0).abs() < f64::EPSILON);
        assert!((stats.minion_damage_pct - 8.0).abs() < f64::EPSILON);
        assert!((stats.summon_count - 1.0).abs() < f64::EPSILON);
        assert!((stats.summon_arrow_count - 3.0).abs() < f64::EPSILON);
        assert!((stats.weapon_effect_scale_pct - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hornet_guarantees_poison() {
        let mut acc = StatAccumulator::new();
        acc.apply_unique(UniqueKind::HornetStinger { duration_pct: -50 }, 1);
        let stats = acc.finish();
        assert!((stats.poison_chance_pct - 100.0).abs() < f64::EPSILON);
        assert!((stats.poison_damage_pct - 100.0).abs() < f64::EPSILON);
        assert!((stats.poison_duration_pct + 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unique_counters_scale_with_times() {
        let mut acc = StatAccumulator::new();
        acc.apply_unique(UniqueKind::SkeletonStorm { speed_bonus_pct: 40 }, 1);
        acc.apply_unique(UniqueKind::SkeletonStorm { speed_bonus_pct: 40 }, 2);
        acc.apply_unique(UniqueKind::Jackpot { chance_pct: 3 }, 2);
        acc.apply_unique(UniqueKind::ElectricDrill { hits_per_second: 6 }, 1);
        acc.apply_unique(UniqueKind::Absurdity, 1);

        let stats = acc.finish();
        assert_eq!(stats.storm_count, 3);
        assert!((stats.summon_speed_bonus_pct - 120.0).abs() < f64::EPSILON);
        assert!(stats.jackpot_enabled);
        assert!((stats.jackpot_chance_pct - 6.0).abs() < f64::EPSILON);
        assert_eq!(stats.drill_rate, 6);
        assert!(!stats.awl_enabled);
    }
}
