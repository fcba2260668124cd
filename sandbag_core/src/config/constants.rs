//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub storage: StorageConstants,
    #[serde(default)]
    pub items: ItemConstants,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub poison: PoisonConstants,
    #[serde(default)]
    pub minions: MinionConstants,
    #[serde(default)]
    pub encounter: EncounterConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
}

impl GameConstants {
    /// Parse constants from TOML; missing sections and fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, super::ConfigError> {
        super::parse_toml(content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConstants {
    /// Hard ceiling on inventory size
    #[serde(default = "default_inventory_capacity")]
    pub inventory_capacity: usize,
    /// Oldest drops are evicted past this size
    #[serde(default = "default_drop_pool_capacity")]
    pub drop_pool_capacity: usize,
    /// How many drops the loot view shows
    #[serde(default = "default_visible_drops")]
    pub visible_drops: usize,
}

impl Default for StorageConstants {
    fn default() -> Self {
        StorageConstants {
            inventory_capacity: default_inventory_capacity(),
            drop_pool_capacity: default_drop_pool_capacity(),
            visible_drops: default_visible_drops(),
        }
    }
}

fn default_inventory_capacity() -> usize {
    20
}
fn default_drop_pool_capacity() -> usize {
    100
}
fn default_visible_drops() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConstants {
    /// Base damage per encounter level on generated items
    #[serde(default = "default_damage_per_level")]
    pub damage_per_level: f64,
}

impl Default for ItemConstants {
    fn default() -> Self {
        ItemConstants {
            damage_per_level: default_damage_per_level(),
        }
    }
}

fn default_damage_per_level() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Inclusive range of the random part of every punch
    #[serde(default = "default_hit_roll_min")]
    pub hit_roll_min: u32,
    #[serde(default = "default_hit_roll_max")]
    pub hit_roll_max: u32,
    /// Chance for the Awl to proc on a hit
    #[serde(default = "default_awl_chance")]
    pub awl_chance: f64,
    /// Fraction of encounter max life dealt by an Awl proc
    #[serde(default = "default_awl_life_fraction")]
    pub awl_life_fraction: f64,
    /// Damage multiplier of a Jackpot proc
    #[serde(default = "default_jackpot_multiplier")]
    pub jackpot_multiplier: f64,
    /// Damage history window of the damage meter
    #[serde(default = "default_meter_window_ms")]
    pub meter_window_ms: u64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            hit_roll_min: default_hit_roll_min(),
            hit_roll_max: default_hit_roll_max(),
            awl_chance: default_awl_chance(),
            awl_life_fraction: default_awl_life_fraction(),
            jackpot_multiplier: default_jackpot_multiplier(),
            meter_window_ms: default_meter_window_ms(),
        }
    }
}

fn default_hit_roll_min() -> u32 {
    10
}
fn default_hit_roll_max() -> u32 {
    20
}
fn default_awl_chance() -> f64 {
    0.1
}
fn default_awl_life_fraction() -> f64 {
    0.01
}
fn default_jackpot_multiplier() -> f64 {
    7.0
}
fn default_meter_window_ms() -> u64 {
    60_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoisonConstants {
    /// Poison chance in percent before affixes
    #[serde(default = "default_poison_base_chance")]
    pub base_chance: f64,
    #[serde(default = "default_poison_duration_ms")]
    pub base_duration_ms: u64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for PoisonConstants {
    fn default() -> Self {
        PoisonConstants {
            base_chance: default_poison_base_chance(),
            base_duration_ms: default_poison_duration_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_poison_base_chance() -> f64 {
    10.0
}
fn default_poison_duration_ms() -> u64 {
    3000
}
fn default_tick_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinionConstants {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Damage of one arrow before minion damage bonuses
    #[serde(default = "default_minion_base_damage")]
    pub base_damage: f64,
    /// Arrow damage multiplier while a Skeleton Storm is equipped
    #[serde(default = "default_storm_multiplier")]
    pub storm_multiplier: f64,
}

impl Default for MinionConstants {
    fn default() -> Self {
        MinionConstants {
            tick_ms: default_tick_ms(),
            base_damage: default_minion_base_damage(),
            storm_multiplier: default_storm_multiplier(),
        }
    }
}

fn default_minion_base_damage() -> f64 {
    10.0
}
fn default_storm_multiplier() -> f64 {
    5.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConstants {
    #[serde(default = "default_hp_per_level")]
    pub hp_per_level: f64,
    /// Level of the final boss; defeating it ends the run
    #[serde(default = "default_boss_level")]
    pub boss_level: u32,
    #[serde(default = "default_boss_hp_multiplier")]
    pub boss_hp_multiplier: f64,
    /// Shop price per encounter level
    #[serde(default = "default_shop_cost_per_level")]
    pub shop_cost_per_level: u64,
    /// Gold-mode reward is level times a roll in this inclusive range
    #[serde(default = "default_gold_drop_min")]
    pub gold_drop_min: u64,
    #[serde(default = "default_gold_drop_max")]
    pub gold_drop_max: u64,
}

impl Default for EncounterConstants {
    fn default() -> Self {
        EncounterConstants {
            hp_per_level: default_hp_per_level(),
            boss_level: default_boss_level(),
            boss_hp_multiplier: default_boss_hp_multiplier(),
            shop_cost_per_level: default_shop_cost_per_level(),
            gold_drop_min: default_gold_drop_min(),
            gold_drop_max: default_gold_drop_max(),
        }
    }
}

fn default_hp_per_level() -> f64 {
    100.0
}
fn default_boss_level() -> u32 {
    1000
}
fn default_boss_hp_multiplier() -> f64 {
    1000.0
}
fn default_shop_cost_per_level() -> u64 {
    100
}
fn default_gold_drop_min() -> u64 {
    5
}
fn default_gold_drop_max() -> u64 {
    15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience required for the first level-up
    #[serde(default = "default_first_level_xp")]
    pub first_level_xp: u64,
    /// Required experience is multiplied by this on every level-up
    #[serde(default = "default_xp_growth")]
    pub xp_growth: f64,
    /// Character flat damage at level 1
    #[serde(default = "default_starting_damage")]
    pub starting_damage: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            first_level_xp: default_first_level_xp(),
            xp_growth: default_xp_growth(),
            starting_damage: default_starting_damage(),
        }
    }
}

fn default_first_level_xp() -> u64 {
    100
}
fn default_xp_growth() -> f64 {
    1.5
}
fn default_starting_damage() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.storage.inventory_capacity, 20);
        assert_eq!(constants.storage.drop_pool_capacity, 100);
        assert!((constants.combat.awl_chance - 0.1).abs() < f64::EPSILON);
        assert!((constants.items.damage_per_level - 3.0).abs() < f64::EPSILON);
        assert_eq!(constants.encounter.boss_level, 1000);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[storage]
inventory_capacity = 5

[poison]
base_duration_ms = 4000
"#;

        let constants = GameConstants::from_toml_str(toml).unwrap();
        assert_eq!(constants.storage.inventory_capacity, 5);
        assert_eq!(constants.storage.drop_pool_capacity, 100);
        assert_eq!(constants.poison.base_duration_ms, 4000);
        assert_eq!(constants.poison.tick_ms, 1000);
        assert!((constants.minions.storm_multiplier - 5.0).abs() < f64::EPSILON);
    }
}
