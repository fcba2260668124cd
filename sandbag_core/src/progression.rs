//! Character progression - experience and level-ups

use crate::config::ProgressionConstants;
use serde::{Deserialize, Serialize};

/// The player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub level: u32,
    pub experience: u64,
    pub required_experience: u64,
    /// Flat damage added to every punch
    pub flat_damage: u32,
}

impl Default for Character {
    fn default() -> Self {
        Self::new(&ProgressionConstants::default())
    }
}

impl Character {
    /// A fresh level-1 character
    pub fn new(constants: &ProgressionConstants) -> Self {
        Character {
            level: 1,
            experience: 0,
            required_experience: constants.first_level_xp.max(1),
            flat_damage: constants.starting_damage,
        }
    }

    /// Gain experience, levelling up as many times as it covers
    ///
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u64, constants: &ProgressionConstants) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.required_experience {
            self.experience -= self.required_experience;
            self.level += 1;
            self.flat_damage += 1;
            let next = (self.required_experience as f64 * constants.xp_growth).floor() as u64;
            // a growth below 1 must not stall or shrink the curve
            self.required_experience = next.max(self.required_experience).max(1);
            gained += 1;
        }
        if gained > 0 {
            log::info!("character reached level {} (+{} damage)", self.level, self.flat_damage);
        }
        gained
    }

    /// Fraction of the current level completed, in 0..1
    pub fn progress(&self) -> f64 {
        self.experience as f64 / self.required_experience.max(1) as f64
    }

    /// Structural sanity for restored characters
    pub fn is_valid(&self) -> bool {
        self.level >= 1 && self.required_experience >= 1 && self.experience < self.required_experience
    }
}
