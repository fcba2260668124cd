//! Inventory - ordered, bounded item storage

use crate::item::Item;
use serde::{Deserialize, Serialize};

/// Default number of inventory cells
pub const DEFAULT_CAPACITY: usize = 20;

/// Ordered list of carried items with a hard capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Inventory {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Append an item, handing it back when full
    pub fn push(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the item at `index`, shifting later items down
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the contents wholesale; fails when `items` exceeds the capacity
    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<(), Vec<Item>> {
        if items.len() > self.capacity {
            return Err(items);
        }
        self.items = items;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::test_items::stat_item;
    use crate::types::ItemCategory;

    #[test]
    fn test_capacity_is_a_hard_ceiling() {
        let mut inventory = Inventory::with_capacity(2);
        inventory.push(stat_item(1, ItemCategory::Weapon, &[])).unwrap();
        inventory.push(stat_item(2, ItemCategory::Ring, &[])).unwrap();
        assert!(inventory.is_full());

        let rejected = inventory.push(stat_item(3, ItemCategory::Ring, &[])).unwrap_err();
        assert_eq!(rejected.id.0, 3);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut inventory = Inventory::default();
        for id in 1..=3 {
            inventory.push(stat_item(id, ItemCategory::Weapon, &[])).unwrap();
        }
        assert_eq!(inventory.remove(1).unwrap().id.0, 2);
        assert_eq!(inventory.get(1).unwrap().id.0, 3);
        assert!(inventory.remove(5).is_none());
    }
}
