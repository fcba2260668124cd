//! Prelude module for convenient imports
//!
//! ```rust
//! use sandbag_core::prelude::*;
//! ```

// Core types
pub use crate::item::{Item, ItemId};
pub use crate::types::{EquipmentSlot, ItemCategory, Rarity, StatKind, UniqueKind};

// Generation
pub use crate::config::{default_catalog, AffixCatalog, GameConstants};
pub use crate::generator::Generator;

// Resolution
pub use crate::equipment::{Equipment, Loadout, Rejection};
pub use crate::stat_block::AggregateStats;

// Game
pub use crate::cadence::Cadence;
pub use crate::session::{GameSession, TickReport};
pub use crate::save::{SaveData, SaveError};
