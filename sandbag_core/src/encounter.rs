//! Encounter - the sandbag and its hit points

use crate::config::EncounterConstants;
use rand::Rng;

/// What a batch of damage did to the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Still standing
    Hit,
    /// Reached zero life; the encounter has already been refilled
    Defeated { level: u32, max_hp: u64 },
    /// The boss fell; the run is over until resumed
    Victory,
}

#[derive(Debug, Clone)]
pub struct Encounter {
    level: u32,
    max_hp: u64,
    hp: u64,
    constants: EncounterConstants,
}

impl Encounter {
    pub fn new(level: u32, constants: EncounterConstants) -> Self {
        let mut encounter = Encounter {
            level: 1,
            max_hp: 0,
            hp: 0,
            constants,
        };
        encounter.set_level(level);
        encounter
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn hp(&self) -> u64 {
        self.hp
    }

    pub fn max_hp(&self) -> u64 {
        self.max_hp
    }

    pub fn is_boss(&self) -> bool {
        self.level == self.constants.boss_level
    }

    /// Change level (clamped to at least 1) and refill life
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
        let mut max_hp = self.level as f64 * self.constants.hp_per_level;
        if self.is_boss() {
            max_hp *= self.constants.boss_hp_multiplier;
        }
        self.max_hp = (max_hp.max(1.0)).round() as u64;
        self.refill();
    }

    pub fn refill(&mut self) {
        self.hp = self.max_hp;
    }

    /// Apply damage; a defeated non-boss encounter refills immediately
    pub fn take_damage(&mut self, amount: u64) -> DamageResult {
        self.hp = self.hp.saturating_sub(amount);
        if self.hp > 0 {
            return DamageResult::Hit;
        }
        if self.is_boss() {
            return DamageResult::Victory;
        }
        self.refill();
        DamageResult::Defeated {
            level: self.level,
            max_hp: self.max_hp,
        }
    }

    /// Price of one shop item at this level
    pub fn shop_cost(&self) -> u64 {
        self.level as u64 * self.constants.shop_cost_per_level
    }

    /// Gold-mode reward for one defeat
    pub fn roll_gold<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let lo = self.constants.gold_drop_min.min(self.constants.gold_drop_max);
        let hi = self.constants.gold_drop_min.max(self.constants.gold_drop_max);
        self.level as u64 * rng.gen_range(lo..=hi)
    }
}
