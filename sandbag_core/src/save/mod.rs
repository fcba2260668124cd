//! Persisted game state
//!
//! Only the shape of the state is defined here; where the JSON ends up is the
//! host's business. Aggregate stats, timers and the drop pool are never saved.

use crate::equipment::{Equipment, LootFilter};
use crate::item::{Item, ItemId};
use crate::progression::Character;
use crate::types::{EquipmentSlot, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("no saved game")]
    NoData,
    #[error("save data is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
    #[error("save data is invalid: {0}")]
    Invalid(String),
}

/// Visibility of one rarity in the loot filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub rarity: Rarity,
    pub shown: bool,
}

/// Everything that survives a save/restore cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub character: Character,
    pub encounter_level: u32,
    pub gold: u64,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
}

impl SaveData {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON without validating game rules
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        if json.trim().is_empty() {
            return Err(SaveError::NoData);
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the loot filter from the saved toggles
    pub fn loot_filter(&self) -> LootFilter {
        let mut filter = LootFilter::default();
        for entry in &self.filters {
            filter.set(entry.rarity, entry.shown);
        }
        filter
    }

    /// Check every game rule a restored state must satisfy
    pub fn validate(&self, inventory_capacity: usize) -> Result<(), SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::Invalid(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if !self.character.is_valid() {
            return Err(SaveError::Invalid("character state is inconsistent".to_string()));
        }
        if self.encounter_level == 0 {
            return Err(SaveError::Invalid("encounter level must be at least 1".to_string()));
        }
        if self.inventory.len() > inventory_capacity {
            return Err(SaveError::Invalid(format!(
                "{} items exceed the inventory capacity of {}",
                self.inventory.len(),
                inventory_capacity
            )));
        }

        for slot in EquipmentSlot::all() {
            if let Some(item) = self.equipment.get(*slot) {
                if item.category != slot.category() {
                    return Err(SaveError::Invalid(format!(
                        "{} item in slot {}",
                        item.category, slot
                    )));
                }
            }
        }

        let mut ids: HashSet<ItemId> = HashSet::new();
        let equipped = self.equipment.iter().map(|(_, item)| item);
        for item in self.inventory.iter().chain(equipped) {
            item.check_invariants().map_err(SaveError::Invalid)?;
            if !ids.insert(item.id) {
                return Err(SaveError::Invalid(format!("item {} is stored twice", item.id)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::test_items::{stat_item, unique_item};
    use crate::types::{ItemCategory, StatKind, UniqueKind};

    fn sample() -> SaveData {
        let mut equipment = Equipment::new();
        equipment
            .insert(
                EquipmentSlot::Ring2,
                unique_item(9, ItemCategory::Ring, UniqueKind::Jackpot { chance_pct: 3 }),
            )
            .unwrap();
        SaveData {
            version: SAVE_VERSION,
            character: Character::default(),
            encounter_level: 12,
            gold: 345,
            inventory: vec![stat_item(1, ItemCategory::Weapon, &[(StatKind::CritChance, 4)])],
            equipment,
            filters: vec![FilterEntry {
                rarity: Rarity::Magic,
                shown: false,
            }],
        }
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample();
        let json = data.to_json().unwrap();
        let back = SaveData::from_json(&json).unwrap();
        assert_eq!(back, data);
        assert!(back.validate(20).is_ok());
        assert!(!back.loot_filter().shows(Rarity::Magic));
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(matches!(SaveData::from_json("  "), Err(SaveError::NoData)));
        assert!(matches!(SaveData::from_json("{not json"), Err(SaveError::Corrupted(_))));
        assert!(matches!(SaveData::from_json(r#"{"version": 1}"#), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validation_rejects_rule_violations() {
        let mut data = sample();
        data.version = 2;
        assert!(matches!(data.validate(20), Err(SaveError::Invalid(_))));

        let mut data = sample();
        data.equipment.weapon1 = Some(stat_item(5, ItemCategory::Ring, &[]));
        assert!(data.validate(20).is_err());

        let mut data = sample();
        data.inventory.push(data.inventory[0].clone());
        assert!(data.validate(20).is_err());

        assert!(sample().validate(0).is_err());

        let mut data = sample();
        data.character.experience = data.character.required_experience;
        assert!(data.validate(20).is_err());
    }
}
