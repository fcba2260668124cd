//! Punch resolution

use super::{HitOutcome, PoisonApplication};
use crate::config::{CombatConstants, PoisonConstants};
use crate::stat_block::AggregateStats;
use rand::Rng;

/// Everything a punch reads besides the aggregate stats
#[derive(Debug, Clone, Copy)]
pub struct PunchContext<'a> {
    /// Character flat damage from levels
    pub character_damage: f64,
    /// Max life of the current encounter, for the Awl proc
    pub encounter_max_hp: f64,
    pub combat: &'a CombatConstants,
    pub poison: &'a PoisonConstants,
}

/// Resolve one punch against the current stats
///
/// Order: base roll, increased damage, crit, jackpot, Awl proc, poison. The
/// crit roll is always drawn; the jackpot and Awl rolls only when equipped.
pub fn resolve_punch<R: Rng + ?Sized>(
    stats: &AggregateStats,
    ctx: &PunchContext<'_>,
    rng: &mut R,
) -> HitOutcome {
    let (lo, hi) = ordered(ctx.combat.hit_roll_min, ctx.combat.hit_roll_max);
    let roll = rng.gen_range(lo..=hi) as f64;
    let base = roll + ctx.character_damage + stats.flat_damage_bonus;

    let mut hit = base * (1.0 + stats.increased_damage_pct / 100.0);

    let is_crit = rng.gen::<f64>() * 100.0 < stats.crit_chance_pct;
    if is_crit {
        hit *= stats.crit_multiplier_pct / 100.0;
    }

    let is_jackpot =
        stats.jackpot_enabled && rng.gen::<f64>() * 100.0 < stats.jackpot_chance_pct;
    if is_jackpot {
        hit *= ctx.combat.jackpot_multiplier;
    }

    let awl_damage = if stats.awl_enabled && rng.gen::<f64>() < ctx.combat.awl_chance {
        (ctx.encounter_max_hp * ctx.combat.awl_life_fraction).ceil()
    } else {
        0.0
    };

    let total = hit + awl_damage;
    let dealt = ceil_damage(total);

    let poison = if stats.poison_damage_pct > 0.0
        && rng.gen::<f64>() * 100.0 < ctx.poison.base_chance + stats.poison_chance_pct
    {
        Some(PoisonApplication {
            dps: total * stats.poison_damage_pct / 100.0,
            duration_ms: poison_duration_ms(ctx.poison.base_duration_ms, stats.poison_duration_pct),
        })
    } else {
        None
    };

    HitOutcome {
        base,
        hit,
        awl_damage,
        dealt,
        is_crit,
        is_jackpot,
        poison,
    }
}

/// Poison duration after the duration modifier, never negative
pub fn poison_duration_ms(base_ms: u64, duration_pct: f64) -> u64 {
    (base_ms as f64 * (1.0 + duration_pct / 100.0)).max(0.0).round() as u64
}

/// Damage is dealt in whole points, rounded up
pub(crate) fn ceil_damage(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.ceil() as u64
    } else {
        0
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
