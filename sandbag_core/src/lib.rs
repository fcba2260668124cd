//! sandbag_core - Loot, stat resolution and combat loop for the sandbag game
//!
//! This library provides:
//! - AffixCatalog: Validated affix pools, tiers and unique tables
//! - Generator: Weighted-random item rolls
//! - AggregateStats: Equipment resolved into combat statistics
//! - Loadout: Single-owner item lifecycle (drops, inventory, equipment)
//! - GameSession: The tick-driven game built on top of all of the above

pub mod cadence;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod equipment;
pub mod generator;
pub mod item;
pub mod prelude;
pub mod progression;
pub mod save;
pub mod session;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use cadence::{Cadence, CadenceTransition, IntervalTimer};
pub use combat::{DamageMeter, HitOutcome, MinionVolley, PoisonTracker};
pub use config::{default_catalog, AffixCatalog, ConfigError, GameConstants};
pub use encounter::{DamageResult, Encounter};
pub use equipment::{DropPool, Equipment, Inventory, Loadout, LootFilter, Rejection};
pub use generator::{GenerateError, Generator};
pub use item::{AffixKind, Item, ItemId, RolledAffix};
pub use progression::Character;
pub use save::{SaveData, SaveError};
pub use session::{GameSession, TickReport};
pub use source::{GearSource, MirrorSource, StatSource};
pub use stat_block::{AggregateStats, StatAccumulator};
pub use types::{AffixRole, EquipmentSlot, ItemCategory, Rarity, StatKind, UniqueKind, UniqueTag};
