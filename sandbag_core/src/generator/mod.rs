//! Item generator - rolls items from the affix catalog
//!
//! A roll either takes the unique branch (a hand-authored item with one
//! synthetic affix) or draws an affix count, allocates prefix/suffix roles
//! and draws a definition, tier and value for every role.

mod unique;
pub mod weighted;

pub use unique::select_variant;
pub use weighted::{weighted_index, weighted_pick};

use crate::config::{AffixCatalog, AffixDefinition, CategoryCatalog};
use crate::item::{AffixKind, Item, ItemId, RolledAffix};
use crate::types::{AffixRole, ItemCategory, Rarity};
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

/// Most affixes of one role an item can carry
const MAX_PER_ROLE: usize = 2;

/// Default base damage per encounter level
const DEFAULT_DAMAGE_PER_LEVEL: f64 = 3.0;

/// Why a roll could not produce an item
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("encounter level must be at least 1")]
    InvalidLevel,
}

/// Rolls items against a shared, validated catalog
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: Arc<AffixCatalog>,
    damage_per_level: f64,
}

impl Generator {
    /// Create a generator owning `catalog`
    pub fn new(catalog: AffixCatalog) -> Self {
        Self::with_shared(Arc::new(catalog))
    }

    /// Create a generator over an already shared catalog
    pub fn with_shared(catalog: Arc<AffixCatalog>) -> Self {
        Generator {
            catalog,
            damage_per_level: DEFAULT_DAMAGE_PER_LEVEL,
        }
    }

    /// Override the base damage granted per encounter level
    pub fn with_damage_per_level(mut self, damage_per_level: f64) -> Self {
        self.damage_per_level = damage_per_level;
        self
    }

    pub fn catalog(&self) -> &AffixCatalog {
        &self.catalog
    }

    /// Roll one item of `category` at `level`
    pub fn roll<R: Rng + ?Sized>(
        &self,
        category: ItemCategory,
        level: u32,
        rng: &mut R,
    ) -> Result<Item, GenerateError> {
        if level == 0 {
            return Err(GenerateError::InvalidLevel);
        }

        let id = ItemId(rng.gen());
        let table = self.catalog.category(category);
        let level_damage = level as f64 * self.damage_per_level;

        if let Some(item) =
            unique::roll_unique(&table.uniques, id, category, level, level_damage, rng)
        {
            return Ok(item);
        }

        let count = weighted_pick(&table.count_weights, |c| c.weight, rng)
            .map(|c| c.count as usize)
            .unwrap_or(1);

        let (prefixes, suffixes) = self.roll_affixes(table, count, rng);

        let name = [
            prefixes.first().map(|a| a.label.as_str()).unwrap_or(""),
            table.base_noun.as_str(),
            suffixes.first().map(|a| a.label.as_str()).unwrap_or(""),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        let mut affixes = prefixes;
        affixes.extend(suffixes);

        let item = Item {
            id,
            category,
            rarity: Rarity::from_affix_count(affixes.len()),
            name,
            icon: table.icon.clone(),
            base_damage: level_damage,
            level,
            affixes,
        };

        log::debug!(
            "rolled {} {} '{}' with {} affixes at level {}",
            item.rarity,
            category,
            item.name,
            item.affixes.len(),
            level
        );

        Ok(item)
    }

    /// Allocate roles and draw up to `count` affixes, returned as (prefixes, suffixes)
    fn roll_affixes<R: Rng + ?Sized>(
        &self,
        table: &CategoryCatalog,
        count: usize,
        rng: &mut R,
    ) -> (Vec<RolledAffix>, Vec<RolledAffix>) {
        let mut prefix_pool: Vec<&AffixDefinition> = table.prefixes.iter().collect();
        let mut suffix_pool: Vec<&AffixDefinition> = table.suffixes.iter().collect();
        let mut prefixes = Vec::new();
        let mut suffixes = Vec::new();

        for _ in 0..count {
            let can_prefix = prefixes.len() < MAX_PER_ROLE && !prefix_pool.is_empty();
            let can_suffix = suffixes.len() < MAX_PER_ROLE && !suffix_pool.is_empty();

            let role = match (can_prefix, can_suffix) {
                (true, true) => {
                    if rng.gen_bool(0.5) {
                        AffixRole::Prefix
                    } else {
                        AffixRole::Suffix
                    }
                }
                (true, false) => AffixRole::Prefix,
                (false, true) => AffixRole::Suffix,
                (false, false) => break,
            };

            let (pool, rolled) = match role {
                AffixRole::Prefix => (&mut prefix_pool, &mut prefixes),
                _ => (&mut suffix_pool, &mut suffixes),
            };

            let default_weight = self.catalog.default_weight;
            let Some(index) =
                weighted_index(pool.as_slice(), |d| d.selection_weight(default_weight), rng)
            else {
                break;
            };
            let definition = pool.remove(index);
            if let Some(affix) = roll_definition(definition, role, rng) {
                rolled.push(affix);
            }
        }

        (prefixes, suffixes)
    }
}

/// Draw a tier and a value for one definition
fn roll_definition<R: Rng + ?Sized>(
    definition: &AffixDefinition,
    role: AffixRole,
    rng: &mut R,
) -> Option<RolledAffix> {
    let tier = weighted_pick(&definition.tiers, |t| t.weight, rng)?;
    let value = rng.gen_range(tier.min..=tier.max);

    Some(RolledAffix {
        id: definition.id.clone(),
        label: definition.label.clone(),
        kind: AffixKind::Stat(definition.stat),
        tier: tier.tier,
        value,
        role,
    })
}
