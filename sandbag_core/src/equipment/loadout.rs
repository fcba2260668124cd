//! Loadout - single-owner item lifecycle
//!
//! Every item lives in exactly one place: the drop pool, the inventory or an
//! equipment slot. Operations move items, never clone them, and a rejected
//! operation leaves all three containers untouched.

use super::{DropPool, Equipment, Inventory};
use crate::item::{Item, ItemId};
use crate::types::{EquipmentSlot, ItemCategory};
use thiserror::Error;

/// Why a lifecycle or economy operation was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("inventory is full")]
    InventoryFull,
    #[error("{item} cannot go into slot {slot}")]
    WrongCategory { item: ItemCategory, slot: EquipmentSlot },
    #[error("no inventory item at index {0}")]
    NoInventoryItem(usize),
    #[error("no drop at index {0}")]
    NoDrop(usize),
    #[error("slot {0} is empty")]
    EmptySlot(EquipmentSlot),
    #[error("inventory index {index} no longer holds item {expected}")]
    StaleItem { index: usize, expected: ItemId },
    #[error("need {cost} gold, have {available}")]
    InsufficientGold { cost: u64, available: u64 },
    #[error("the encounter is over")]
    EncounterOver,
}

impl Rejection {
    /// Stable machine-readable reason
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InventoryFull => "inventory_full",
            Rejection::WrongCategory { .. } => "wrong_category",
            Rejection::NoInventoryItem(_) => "no_inventory_item",
            Rejection::NoDrop(_) => "no_drop",
            Rejection::EmptySlot(_) => "empty_slot",
            Rejection::StaleItem { .. } => "stale_item",
            Rejection::InsufficientGold { .. } => "insufficient_gold",
            Rejection::EncounterOver => "encounter_over",
        }
    }
}

/// Equipment, inventory and drop pool under one owner
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    pub(crate) equipment: Equipment,
    pub(crate) inventory: Inventory,
    pub(crate) drops: DropPool,
}

impl Loadout {
    /// Empty loadout with the given container sizes
    pub fn new(inventory_capacity: usize, drop_pool_capacity: usize) -> Self {
        Loadout {
            equipment: Equipment::new(),
            inventory: Inventory::with_capacity(inventory_capacity),
            drops: DropPool::with_capacity(drop_pool_capacity),
        }
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn drops(&self) -> &DropPool {
        &self.drops
    }

    /// Add a fresh drop to the pool
    pub fn add_drop(&mut self, item: Item) {
        if let Some(evicted) = self.drops.push(item) {
            log::debug!("drop pool full, evicted {} '{}'", evicted.id, evicted.name);
        }
    }

    /// Put a freshly bought item straight into the inventory
    pub fn stash(&mut self, item: Item) -> Result<(), Rejection> {
        self.inventory.push(item).map_err(|_| Rejection::InventoryFull)
    }

    /// Move the inventory item at `index` into `slot`
    ///
    /// `item_id` must match the item at `index`, so a reference taken before
    /// the inventory shifted is rejected instead of equipping the wrong item.
    /// The previous occupant of `slot`, if any, goes to the end of the inventory.
    pub fn equip(&mut self, item_id: ItemId, index: usize, slot: EquipmentSlot) -> Result<(), Rejection> {
        let item = self.inventory.get(index).ok_or(Rejection::NoInventoryItem(index))?;
        if item.id != item_id {
            return Err(Rejection::StaleItem {
                index,
                expected: item_id,
            });
        }
        if item.category != slot.category() {
            return Err(Rejection::WrongCategory {
                item: item.category,
                slot,
            });
        }

        self.place(slot, Origin::Inventory(index))
    }

    /// Move the item in `slot` to the end of the inventory
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), Rejection> {
        if !self.equipment.is_occupied(slot) {
            return Err(Rejection::EmptySlot(slot));
        }
        if self.inventory.is_full() {
            return Err(Rejection::InventoryFull);
        }
        let item = self.equipment.take(slot).ok_or(Rejection::EmptySlot(slot))?;
        if let Err(item) = self.inventory.push(item) {
            self.equipment.swap(slot, item);
            return Err(Rejection::InventoryFull);
        }
        Ok(())
    }

    /// Move the drop at `drop_index` into the inventory
    pub fn loot(&mut self, drop_index: usize) -> Result<ItemId, Rejection> {
        if self.drops.get(drop_index).is_none() {
            return Err(Rejection::NoDrop(drop_index));
        }
        if self.inventory.is_full() {
            return Err(Rejection::InventoryFull);
        }
        let item = self.drops.remove(drop_index).ok_or(Rejection::NoDrop(drop_index))?;
        let id = item.id;
        self.inventory.push(item).map_err(|_| Rejection::InventoryFull)?;
        Ok(id)
    }

    /// Move a drop straight into `slot`
    ///
    /// Needs a free inventory cell when the slot is occupied, since the
    /// incumbent is pushed to the inventory.
    pub fn loot_and_equip(&mut self, drop_index: usize, slot: EquipmentSlot) -> Result<(), Rejection> {
        let item = self.drops.get(drop_index).ok_or(Rejection::NoDrop(drop_index))?;
        if item.category != slot.category() {
            return Err(Rejection::WrongCategory {
                item: item.category,
                slot,
            });
        }
        self.place(slot, Origin::Drops(drop_index))
    }

    /// Remove and return the inventory item at `index`
    pub fn discard(&mut self, index: usize) -> Result<Item, Rejection> {
        self.inventory
            .remove(index)
            .ok_or(Rejection::NoInventoryItem(index))
    }

    /// Equip the inventory item at `index` into the first free slot of its
    /// category, or swap it into the primary slot when both are taken
    pub fn auto_assign(&mut self, index: usize) -> Result<EquipmentSlot, Rejection> {
        let item = self.inventory.get(index).ok_or(Rejection::NoInventoryItem(index))?;
        let slots = item.category.slots();
        let slot = self.equipment.first_free(slots).unwrap_or(slots[0]);
        let id = item.id;
        self.equip(id, index, slot)?;
        Ok(slot)
    }

    /// Move an item from `origin` into a slot whose category was already
    /// checked, pushing the incumbent to the end of the inventory
    ///
    /// Rejected before anything moves when the incumbent would have no cell.
    /// Taking from the inventory frees the cell it needs.
    fn place(&mut self, slot: EquipmentSlot, origin: Origin) -> Result<(), Rejection> {
        let frees_cell = matches!(origin, Origin::Inventory(_));
        if self.equipment.is_occupied(slot) && self.inventory.is_full() && !frees_cell {
            return Err(Rejection::InventoryFull);
        }

        let item = match origin {
            Origin::Inventory(index) => self
                .inventory
                .remove(index)
                .ok_or(Rejection::NoInventoryItem(index))?,
            Origin::Drops(index) => self.drops.remove(index).ok_or(Rejection::NoDrop(index))?,
        };
        if let Some(previous) = self.equipment.swap(slot, item) {
            log::debug!("swapped {} '{}' out of {}", previous.id, previous.name, slot);
            self.inventory
                .push(previous)
                .map_err(|_| Rejection::InventoryFull)?;
        }
        Ok(())
    }
}

/// Where an item being equipped comes from
#[derive(Debug, Clone, Copy)]
enum Origin {
    Inventory(usize),
    Drops(usize),
}
