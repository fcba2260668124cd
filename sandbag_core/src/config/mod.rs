//! Configuration loading from TOML files

mod catalog;
mod constants;

pub use catalog::{
    default_catalog, AffixCatalog, AffixDefinition, AffixTier, BaseDamageRule, CategoryCatalog,
    CountWeight, ParamRange, UniqueTable, UniqueVariant,
};
pub use constants::{
    CombatConstants, EncounterConstants, GameConstants, ItemConstants, MinionConstants,
    PoisonConstants, ProgressionConstants, StorageConstants,
};

use crate::types::{AffixRole, ItemCategory};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
///
/// Every variant is fatal: a catalog that fails validation must not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("{category} catalog has no {role:?} definitions")]
    EmptyPool { category: ItemCategory, role: AffixRole },
    #[error("{category} catalog has an empty affix-count distribution")]
    EmptyCountDistribution { category: ItemCategory },
    #[error("{category} catalog lists affix count {count}, expected 1 to 4")]
    InvalidAffixCount { category: ItemCategory, count: u8 },
    #[error("affix '{affix}' has no tiers")]
    NoTiers { affix: String },
    #[error("affix '{affix}' tier {tier} has inverted range {min}..={max}")]
    InvertedRange { affix: String, tier: u8, min: i64, max: i64 },
    #[error("negative or non-finite weight {weight} in {context}")]
    InvalidWeight { context: String, weight: f64 },
    #[error("{category} catalog defines '{affix}' twice")]
    DuplicateAffix { category: ItemCategory, affix: String },
    #[error("{category} unique chance {chance} is outside 0..=1")]
    InvalidUniqueChance { category: ItemCategory, chance: f64 },
    #[error("{category} unique shares sum to {sum}, expected 1")]
    UniqueSharesNotNormalized { category: ItemCategory, sum: f64 },
    #[error("unique '{name}' has inverted parameter range {min}..={max}")]
    InvertedParamRange { name: String, min: i64, max: i64 },
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
