//! Item - A generated piece of loot and its rolled affixes

use crate::types::{AffixRole, ItemCategory, Rarity, StatKind, UniqueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identity token of a generated item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// What a rolled affix does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixKind {
    /// Adds its value to a stat total
    Stat(StatKind),
    /// Synthetic affix of a unique item
    Unique(UniqueKind),
}

/// An affix as it was rolled onto an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledAffix {
    /// Definition id (unique within its category and role)
    pub id: String,
    /// Display label of the definition
    #[serde(default)]
    pub label: String,
    pub kind: AffixKind,
    /// Tier rank drawn; 0 for synthetic affixes
    pub tier: u8,
    /// Value drawn uniformly from the tier range
    pub value: i64,
    pub role: AffixRole,
}

impl RolledAffix {
    /// Synthetic affix for a unique behaviour
    pub fn unique(kind: UniqueKind) -> Self {
        RolledAffix {
            id: kind.affix_id().to_string(),
            label: String::new(),
            kind: AffixKind::Unique(kind),
            tier: 0,
            value: kind.parameter(),
            role: AffixRole::Unique,
        }
    }

    /// The stat this affix adds to, if it is not a unique effect
    pub fn stat(&self) -> Option<StatKind> {
        match self.kind {
            AffixKind::Stat(stat) => Some(stat),
            AffixKind::Unique(_) => None,
        }
    }

    /// The unique behaviour this affix carries, if any
    pub fn unique_kind(&self) -> Option<UniqueKind> {
        match self.kind {
            AffixKind::Unique(kind) => Some(kind),
            AffixKind::Stat(_) => None,
        }
    }
}

/// A generated item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub category: ItemCategory,
    pub rarity: Rarity,
    pub name: String,
    pub icon: String,
    /// Flat damage added to every punch while equipped
    pub base_damage: f64,
    /// Encounter level the item was generated at
    pub level: u32,
    /// Prefixes first, then suffixes; a single synthetic affix on uniques
    #[serde(default)]
    pub affixes: Vec<RolledAffix>,
}

impl Item {
    /// Whether this is a hand-authored unique
    pub fn is_unique(&self) -> bool {
        self.rarity == Rarity::Unique
    }

    /// The unique behaviour of this item, if it has one
    pub fn unique_kind(&self) -> Option<UniqueKind> {
        self.affixes.iter().find_map(RolledAffix::unique_kind)
    }

    /// Affixes with the given role, in roll order
    pub fn affixes_with_role(&self, role: AffixRole) -> impl Iterator<Item = &RolledAffix> {
        self.affixes.iter().filter(move |a| a.role == role)
    }

    /// Sum of rolled values for a stat on this item (unscaled)
    pub fn stat_total(&self, stat: StatKind) -> i64 {
        self.affixes
            .iter()
            .filter(|a| a.stat() == Some(stat))
            .map(|a| a.value)
            .sum()
    }

    /// Check the structural invariants a generated item always satisfies
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for affix in &self.affixes {
            if !seen.insert(affix.id.as_str()) {
                return Err(format!("item {} repeats affix '{}'", self.id, affix.id));
            }
        }

        if self.affixes.len() > 4 {
            return Err(format!("item {} has {} affixes", self.id, self.affixes.len()));
        }

        let unique_affixes = self
            .affixes
            .iter()
            .filter(|a| a.role == AffixRole::Unique)
            .count();

        if self.is_unique() {
            if unique_affixes != 1 || self.affixes.len() != 1 {
                return Err(format!(
                    "unique item {} must carry exactly one synthetic affix",
                    self.id
                ));
            }
        } else {
            if unique_affixes != 0 {
                return Err(format!("item {} carries a unique affix", self.id));
            }
            let expected = Rarity::from_affix_count(self.affixes.len());
            if self.rarity != expected {
                return Err(format!(
                    "item {} has {} affixes but rarity {}",
                    self.id,
                    self.affixes.len(),
                    self.rarity
                ));
            }
        }

        if !self.base_damage.is_finite() || self.base_damage < 0.0 {
            return Err(format!("item {} has invalid base damage", self.id));
        }

        Ok(())
    }

    /// Plain-text tooltip: header line, unique effect lines, base damage, affix lines
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} {} [{}]", self.icon, self.name, self.rarity)];

        if let Some(kind) = self.unique_kind() {
            lines.push("Unique effect:".to_string());
            lines.extend(kind.describe().into_iter().map(|l| format!("  {}", l)));
        }

        if self.base_damage > 0.0 {
            lines.push(format!("Base damage: +{}", self.base_damage.floor()));
        }

        for affix in &self.affixes {
            if let Some(stat) = affix.stat() {
                lines.push(format!("(T{}) {}", affix.tier, stat.describe(affix.value)));
            }
        }

        lines
    }
}
