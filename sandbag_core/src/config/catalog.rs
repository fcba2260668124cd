//! Affix catalog - per-category affix pools, tiers, count weights and unique tables

use super::ConfigError;
use crate::types::{AffixRole, ItemCategory, StatKind, UniqueTag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Tolerance when checking that unique shares sum to 1
const SHARE_TOLERANCE: f64 = 1e-6;

/// A quality band within an affix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixTier {
    /// Tier rank, smaller is better
    pub tier: u8,
    /// Inclusive lower bound
    pub min: i64,
    /// Inclusive upper bound
    pub max: i64,
    /// Selection weight within the affix
    pub weight: f64,
}

/// A rollable prefix or suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixDefinition {
    pub id: String,
    /// Label used to build item names
    pub label: String,
    pub stat: StatKind,
    /// Selection weight; the catalog default applies when absent
    #[serde(default)]
    pub weight: Option<f64>,
    pub tiers: Vec<AffixTier>,
}

impl AffixDefinition {
    /// Selection weight, falling back to `default`
    pub fn selection_weight(&self, default: f64) -> f64 {
        self.weight.unwrap_or(default)
    }
}

/// Weight of rolling a given total affix count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountWeight {
    pub count: u8,
    pub weight: f64,
}

/// How a unique item's base damage is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BaseDamageRule {
    /// The usual level-derived base damage
    Level,
    /// Level-derived base damage times `factor`
    Scaled { factor: f64 },
    /// A constant, independent of level
    Fixed { value: f64 },
}

impl Default for BaseDamageRule {
    fn default() -> Self {
        BaseDamageRule::Level
    }
}

impl BaseDamageRule {
    /// Resolve against the level-derived base damage
    pub fn resolve(&self, level_damage: f64) -> f64 {
        match *self {
            BaseDamageRule::Level => level_damage,
            BaseDamageRule::Scaled { factor } => level_damage * factor,
            BaseDamageRule::Fixed { value } => value,
        }
    }
}

/// Inclusive range a unique parameter is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: i64,
    pub max: i64,
}

/// A hand-authored unique item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueVariant {
    pub kind: UniqueTag,
    pub name: String,
    pub icon: String,
    /// Share of the unique-roll space this variant occupies
    pub share: f64,
    #[serde(default)]
    pub base_damage: BaseDamageRule,
    #[serde(default)]
    pub param: Option<ParamRange>,
}

/// Unique drop table of a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueTable {
    /// Probability that a roll produces a unique
    #[serde(default)]
    pub chance: f64,
    #[serde(default)]
    pub variants: Vec<UniqueVariant>,
}

/// Everything the generator needs for one item category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    /// Noun placed between the prefix and suffix labels
    pub base_noun: String,
    pub icon: String,
    pub count_weights: Vec<CountWeight>,
    pub prefixes: Vec<AffixDefinition>,
    pub suffixes: Vec<AffixDefinition>,
    #[serde(default)]
    pub uniques: UniqueTable,
}

impl CategoryCatalog {
    /// Definitions available for a role (synthetic affixes have no pool)
    pub fn pool(&self, role: AffixRole) -> &[AffixDefinition] {
        match role {
            AffixRole::Prefix => &self.prefixes,
            AffixRole::Suffix => &self.suffixes,
            AffixRole::Unique => &[],
        }
    }

    fn validate(&self, category: ItemCategory) -> Result<(), ConfigError> {
        for role in [AffixRole::Prefix, AffixRole::Suffix] {
            let pool = self.pool(role);
            if pool.is_empty() {
                return Err(ConfigError::EmptyPool { category, role });
            }

            let mut ids = HashSet::new();
            for def in pool {
                if !ids.insert(def.id.as_str()) {
                    return Err(ConfigError::DuplicateAffix {
                        category,
                        affix: def.id.clone(),
                    });
                }
                if let Some(weight) = def.weight {
                    check_weight(weight, || format!("affix '{}'", def.id))?;
                }
                if def.tiers.is_empty() {
                    return Err(ConfigError::NoTiers { affix: def.id.clone() });
                }
                for tier in &def.tiers {
                    if tier.min > tier.max {
                        return Err(ConfigError::InvertedRange {
                            affix: def.id.clone(),
                            tier: tier.tier,
                            min: tier.min,
                            max: tier.max,
                        });
                    }
                    check_weight(tier.weight, || format!("affix '{}' tier {}", def.id, tier.tier))?;
                }
            }
        }

        if self.count_weights.is_empty() {
            return Err(ConfigError::EmptyCountDistribution { category });
        }
        for entry in &self.count_weights {
            if !(1..=4).contains(&entry.count) {
                return Err(ConfigError::InvalidAffixCount {
                    category,
                    count: entry.count,
                });
            }
            check_weight(entry.weight, || format!("{} affix count {}", category, entry.count))?;
        }

        self.validate_uniques(category)
    }

    fn validate_uniques(&self, category: ItemCategory) -> Result<(), ConfigError> {
        let table = &self.uniques;
        if !table.chance.is_finite() || !(0.0..=1.0).contains(&table.chance) {
            return Err(ConfigError::InvalidUniqueChance {
                category,
                chance: table.chance,
            });
        }

        // A table that can never trigger may stay empty.
        if table.variants.is_empty() && table.chance == 0.0 {
            return Ok(());
        }

        for variant in &table.variants {
            check_weight(variant.share, || format!("unique '{}' share", variant.name))?;
            match (variant.kind.takes_parameter(), variant.param) {
                (true, None) => {
                    return Err(ConfigError::ValidationError(format!(
                        "unique '{}' needs a parameter range",
                        variant.name
                    )))
                }
                (_, Some(range)) if range.min > range.max => {
                    return Err(ConfigError::InvertedParamRange {
                        name: variant.name.clone(),
                        min: range.min,
                        max: range.max,
                    })
                }
                _ => {}
            }
            if let BaseDamageRule::Scaled { factor: v } | BaseDamageRule::Fixed { value: v } =
                variant.base_damage
            {
                check_weight(v, || format!("unique '{}' base damage", variant.name))?;
            }
        }

        let sum: f64 = table.variants.iter().map(|v| v.share).sum();
        if (sum - 1.0).abs() > SHARE_TOLERANCE {
            return Err(ConfigError::UniqueSharesNotNormalized { category, sum });
        }

        Ok(())
    }
}

fn check_weight(weight: f64, context: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight {
            context: context(),
            weight,
        })
    }
}

fn default_affix_weight() -> f64 {
    100.0
}

/// The full affix catalog
///
/// Built once at startup, validated, then shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixCatalog {
    /// Weight used by definitions that do not specify one
    #[serde(default = "default_affix_weight")]
    pub default_weight: f64,
    pub weapon: CategoryCatalog,
    pub ring: CategoryCatalog,
}

impl AffixCatalog {
    /// Parse and validate a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let catalog: AffixCatalog = super::parse_toml(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let catalog: AffixCatalog = super::load_toml(path)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read access by category
    pub fn category(&self, category: ItemCategory) -> &CategoryCatalog {
        match category {
            ItemCategory::Weapon => &self.weapon,
            ItemCategory::Ring => &self.ring,
        }
    }

    /// Read access by category and role
    pub fn pool(&self, category: ItemCategory, role: AffixRole) -> &[AffixDefinition] {
        self.category(category).pool(role)
    }

    /// Validate every category
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_weight(self.default_weight, || "default affix weight".to_string())?;
        for category in ItemCategory::all() {
            self.category(*category).validate(*category)?;
        }
        Ok(())
    }
}

/// The catalog shipped with the game
pub fn default_catalog() -> Result<AffixCatalog, ConfigError> {
    AffixCatalog::from_toml_str(include_str!("../../config/catalog.toml"))
}
