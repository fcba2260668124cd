//! Drop pool and loot filter

use crate::item::Item;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Per-rarity visibility toggles for the drop pool
///
/// Uniques are always shown regardless of the toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootFilter {
    hidden: Vec<Rarity>,
}

impl Default for LootFilter {
    fn default() -> Self {
        LootFilter { hidden: Vec::new() }
    }
}

impl LootFilter {
    /// Whether drops of this rarity are listed
    pub fn shows(&self, rarity: Rarity) -> bool {
        rarity == Rarity::Unique || !self.hidden.contains(&rarity)
    }

    /// Toggle a rarity; requests for uniques are ignored
    pub fn set(&mut self, rarity: Rarity, shown: bool) {
        if rarity == Rarity::Unique {
            return;
        }
        self.hidden.retain(|r| *r != rarity);
        if !shown {
            self.hidden.push(rarity);
        }
    }

    /// Toggle state of every filterable rarity
    pub fn entries(&self) -> Vec<(Rarity, bool)> {
        Rarity::filterable()
            .iter()
            .map(|r| (*r, self.shows(*r)))
            .collect()
    }
}

/// Recent drops, oldest first, bounded by evicting the oldest
#[derive(Debug, Clone, PartialEq)]
pub struct DropPool {
    drops: VecDeque<Item>,
    capacity: usize,
}

impl Default for DropPool {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}

impl DropPool {
    pub fn with_capacity(capacity: usize) -> Self {
        DropPool {
            drops: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Drop at an absolute index (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.drops.get(index)
    }

    /// Add a drop, returning the evicted oldest drop if the pool was full
    pub fn push(&mut self, item: Item) -> Option<Item> {
        let evicted = if self.drops.len() >= self.capacity {
            self.drops.pop_front()
        } else {
            None
        };
        if self.capacity > 0 {
            self.drops.push_back(item);
        }
        evicted
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        self.drops.remove(index)
    }

    pub fn clear(&mut self) {
        self.drops.clear();
    }

    /// Newest `limit` drops the filter shows, newest first, with their pool indices
    pub fn visible(&self, filter: &LootFilter, limit: usize) -> Vec<(usize, &Item)> {
        self.drops
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, item)| filter.shows(item.rarity))
            .take(limit)
            .collect()
    }
}
