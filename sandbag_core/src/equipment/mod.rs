//! Equipment, inventory, drop pool and the lifecycle rules that move items between them

mod drops;
mod inventory;
mod loadout;

pub use drops::{DropPool, LootFilter};
pub use inventory::Inventory;
pub use loadout::{Loadout, Rejection};

use crate::item::Item;
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};

/// The four equipment slots
///
/// Serializes as a map keyed by slot name. Use [`Equipment::insert`] to keep
/// the slot/category invariant; the fields are public for construction in
/// tests and save restoration, which validates them separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon1: Option<Item>,
    #[serde(default)]
    pub weapon2: Option<Item>,
    #[serde(default)]
    pub ring1: Option<Item>,
    #[serde(default)]
    pub ring2: Option<Item>,
}

impl Equipment {
    /// Create empty equipment
    pub fn new() -> Self {
        Self::default()
    }

    /// Item in a slot
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slot_ref(slot).as_ref()
    }

    /// Whether a slot holds an item
    pub fn is_occupied(&self, slot: EquipmentSlot) -> bool {
        self.get(slot).is_some()
    }

    /// Remove and return the item in a slot
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Put `item` into `slot`, returning the previous occupant
    ///
    /// A category mismatch hands the item back untouched.
    pub fn insert(&mut self, slot: EquipmentSlot, item: Item) -> Result<Option<Item>, Item> {
        if item.category != slot.category() {
            return Err(item);
        }
        Ok(self.swap(slot, item))
    }

    /// Replace a slot's content without the category check
    fn swap(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    /// Occupied slots in resolution order
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::all()
            .iter()
            .filter_map(move |slot| self.get(*slot).map(|item| (*slot, item)))
    }

    /// First slot (primary first) of the item's category that is empty
    pub fn first_free(&self, slot_pair: [EquipmentSlot; 2]) -> Option<EquipmentSlot> {
        slot_pair.into_iter().find(|slot| !self.is_occupied(*slot))
    }

    /// Slot whose item has `id`, if equipped
    pub fn find(&self, id: crate::item::ItemId) -> Option<EquipmentSlot> {
        self.iter().find(|(_, item)| item.id == id).map(|(slot, _)| slot)
    }

    /// Every slot holds an item of its own category
    pub fn is_consistent(&self) -> bool {
        self.iter().all(|(slot, item)| item.category == slot.category())
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon1 => &self.weapon1,
            EquipmentSlot::Weapon2 => &self.weapon2,
            EquipmentSlot::Ring1 => &self.ring1,
            EquipmentSlot::Ring2 => &self.ring2,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon1 => &mut self.weapon1,
            EquipmentSlot::Weapon2 => &mut self.weapon2,
            EquipmentSlot::Ring1 => &mut self.ring1,
            EquipmentSlot::Ring2 => &mut self.ring2,
        }
    }
}
