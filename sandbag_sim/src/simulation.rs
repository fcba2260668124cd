//! Headless game runs
//!
//! A [`Simulation`] plays a [`GameSession`] the way a player would: tapping
//! at a steady rate, looting whatever drops and keeping upgrades.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sandbag_core::prelude::*;
use sandbag_core::HitOutcome;
use serde::Serialize;
use thiserror::Error;

/// Longest single clock advance between loot and level checks
const MAX_STEP_MS: u64 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("tap rate must be a positive number, got {0}")]
    InvalidTapRate(f64),
    #[error("tap jitter must be within 0..100 percent, got {0}")]
    InvalidJitter(f64),
    #[error("climb interval must be at least 1 defeat")]
    InvalidClimb,
}

/// How the simulated player behaves
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub duration_ms: u64,
    /// Manual punches per second; 0 leaves all damage to timers
    pub taps_per_second: f64,
    /// Random spread of the gap between taps, in percent
    pub jitter_pct: f64,
    /// Raise the encounter level after this many defeats
    pub climb_every: Option<u64>,
    pub auto_loot: bool,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            duration_ms: 60_000,
            taps_per_second: 5.0,
            jitter_pct: 10.0,
            climb_every: None,
            auto_loot: true,
            seed: 0,
        }
    }
}

/// What happened during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub elapsed_ms: u64,
    pub punches: u32,
    pub auto_punches: u32,
    pub crits: u32,
    pub jackpots: u32,
    pub awl_procs: u32,
    pub punch_damage: u64,
    pub auto_damage: u64,
    pub poison_damage: u64,
    pub minion_damage: u64,
    pub defeats: u64,
    pub items_looted: u32,
    pub uniques_looted: u32,
    pub upgrades: u32,
    pub victory: bool,
    pub character_level: u32,
    pub encounter_level: u32,
    pub gold: u64,
}

impl SimulationReport {
    /// Damage from every source, manual and automatic
    pub fn total_damage(&self) -> u64 {
        self.punch_damage + self.auto_damage + self.poison_damage + self.minion_damage
    }

    pub fn dps(&self) -> f64 {
        if self.elapsed_ms > 0 {
            self.total_damage() as f64 / (self.elapsed_ms as f64 / 1000.0)
        } else {
            0.0
        }
    }

    /// Crit rate of manual punches, in percent
    pub fn crit_rate(&self) -> f64 {
        if self.punches > 0 {
            self.crits as f64 / self.punches as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_punch(&self) -> f64 {
        if self.punches > 0 {
            self.punch_damage as f64 / self.punches as f64
        } else {
            0.0
        }
    }

    fn record_punch(&mut self, outcome: &HitOutcome) {
        self.punches += 1;
        self.punch_damage += outcome.dealt;
        if outcome.is_crit {
            self.crits += 1;
        }
        if outcome.is_jackpot {
            self.jackpots += 1;
        }
        if outcome.awl_procced() {
            self.awl_procs += 1;
        }
    }

    fn record_tick(&mut self, tick: &TickReport) {
        self.poison_damage += tick.poison_damage;
        self.minion_damage += tick.minion_damage;
        self.auto_punches += tick.auto_punches;
        self.auto_damage += tick.auto_damage;
    }
}

/// Rough damage per second of a stat snapshot, used to rank gear
pub fn expected_dps(
    stats: &AggregateStats,
    constants: &GameConstants,
    character_damage: f64,
    taps_per_second: f64,
) -> f64 {
    let combat = &constants.combat;
    let roll = (combat.hit_roll_min + combat.hit_roll_max) as f64 / 2.0;
    let mut hit = (roll + character_damage + stats.flat_damage_bonus)
        * (1.0 + stats.increased_damage_pct / 100.0);

    let crit = stats.crit_chance_pct.clamp(0.0, 100.0) / 100.0;
    hit *= 1.0 + crit * (stats.crit_multiplier_pct / 100.0 - 1.0);
    if stats.jackpot_enabled {
        let chance = stats.jackpot_chance_pct.clamp(0.0, 100.0) / 100.0;
        hit *= 1.0 + chance * (combat.jackpot_multiplier - 1.0);
    }

    let poison_chance =
        ((constants.poison.base_chance + stats.poison_chance_pct) / 100.0).clamp(0.0, 1.0);
    let poison_seconds = (constants.poison.base_duration_ms as f64
        * (1.0 + stats.poison_duration_pct / 100.0))
        .max(0.0)
        / 1000.0;
    let poison = hit * stats.poison_damage_pct.max(0.0) / 100.0 * poison_chance * poison_seconds;

    let hits_per_second = taps_per_second + stats.drill_rate as f64;
    let mut dps = (hit + poison) * hits_per_second;

    if stats.has_minion() {
        let minions = &constants.minions;
        let (arrow, arrows) = if stats.damage_mirrors_player {
            (hit * stats.minion_copy_damage_pct / 100.0, 1.0)
        } else {
            (
                minions.base_damage * (1.0 + stats.minion_damage_pct / 100.0),
                stats.summon_arrow_count.max(1.0),
            )
        };
        let (multiplier, speed) = if stats.storm_count > 0 {
            (minions.storm_multiplier, 1.0 + stats.summon_speed_bonus_pct / 100.0)
        } else {
            (1.0, 1.0)
        };
        // the archer shoots at most once per minion tick
        let volleys = speed.min(1.0) * 1000.0 / minions.tick_ms.max(1) as f64;
        dps += arrow * arrows * multiplier * volleys;
    }

    dps
}

/// A scripted player
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        if !config.taps_per_second.is_finite() || config.taps_per_second < 0.0 {
            return Err(SimError::InvalidTapRate(config.taps_per_second));
        }
        if !(0.0..100.0).contains(&config.jitter_pct) {
            return Err(SimError::InvalidJitter(config.jitter_pct));
        }
        if config.climb_every == Some(0) {
            return Err(SimError::InvalidClimb);
        }

        // tap timing draws from its own stream so it never shifts game rolls
        let rng = ChaCha8Rng::seed_from_u64(config.seed ^ 0x7a9_5eed);
        Ok(Simulation { config, rng })
    }

    /// Play `session` for the configured duration or until the boss falls
    pub fn run(&mut self, session: &mut GameSession) -> SimulationReport {
        let mut report = SimulationReport::default();
        let defeats_at_start = session.defeats();
        let mut defeats_at_climb = defeats_at_start;
        let mut until_tap = self.tap_gap();

        while report.elapsed_ms < self.config.duration_ms {
            let remaining = self.config.duration_ms - report.elapsed_ms;
            let step = until_tap.unwrap_or(u64::MAX).min(remaining).min(MAX_STEP_MS);

            let tick = session.tick(step);
            report.record_tick(&tick);
            report.elapsed_ms += step;

            if let Some(gap) = until_tap.as_mut() {
                *gap -= step;
                if *gap == 0 {
                    if let Ok(outcome) = session.punch() {
                        report.record_punch(&outcome);
                    }
                    until_tap = self.tap_gap();
                }
            }

            if !session.is_running() {
                report.victory = true;
                log::info!("victory after {} ms", report.elapsed_ms);
                break;
            }

            if self.config.auto_loot {
                self.collect_loot(session, &mut report);
            }

            if let Some(every) = self.config.climb_every {
                if session.defeats() - defeats_at_climb >= every {
                    defeats_at_climb = session.defeats();
                    if session.change_level(1).is_ok() {
                        log::debug!("climbed to level {}", session.encounter().level());
                    }
                }
            }
        }

        report.defeats = session.defeats() - defeats_at_start;
        report.character_level = session.character().level;
        report.encounter_level = session.encounter().level();
        report.gold = session.gold();
        report
    }

    /// Milliseconds until the next manual punch, `None` when not tapping
    fn tap_gap(&mut self) -> Option<u64> {
        if self.config.taps_per_second <= 0.0 {
            return None;
        }
        let base = 1000.0 / self.config.taps_per_second;
        let spread = if self.config.jitter_pct > 0.0 {
            let jitter = self.config.jitter_pct / 100.0;
            1.0 + self.rng.gen_range(-jitter..=jitter)
        } else {
            1.0
        };
        Some(((base * spread).round() as u64).max(1))
    }

    /// Loot visible drops newest first, keeping only upgrades
    fn collect_loot(&self, session: &mut GameSession, report: &mut SimulationReport) {
        loop {
            if session.inventory().is_full() {
                break;
            }
            let Some(index) = session.visible_drops().first().map(|(i, _)| *i) else {
                break;
            };
            let Ok(id) = session.loot(index) else {
                break;
            };
            report.items_looted += 1;
            self.keep_if_upgrade(session, id, report);
        }
    }

    fn keep_if_upgrade(&self, session: &mut GameSession, id: ItemId, report: &mut SimulationReport) {
        let Some(index) = session.inventory().items().iter().position(|i| i.id == id) else {
            return;
        };
        let item = session.inventory().items()[index].clone();
        if item.is_unique() {
            report.uniques_looted += 1;
        }

        let score = |equipment: &Equipment, session: &GameSession| {
            expected_dps(
                &AggregateStats::compute(equipment),
                session.constants(),
                session.character().flat_damage as f64,
                self.config.taps_per_second,
            )
        };

        let current = score(session.equipment(), session);
        let best = item
            .category
            .slots()
            .into_iter()
            .filter_map(|slot| {
                let mut candidate = session.equipment().clone();
                candidate.insert(slot, item.clone()).ok()?;
                Some((slot, score(&candidate, session)))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((slot, value)) = best.filter(|(_, value)| *value > current) {
            if session.equip(id, index, slot).is_ok() {
                report.upgrades += 1;
                log::info!("equipped '{}' in {} ({:.0} -> {:.0} dps)", item.name, slot, current, value);
            }
        }

        // the simulated player keeps no spares
        while !session.inventory().is_empty() {
            if session.discard(0).is_err() {
                break;
            }
        }
    }
}
