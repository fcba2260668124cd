//! Core types shared by the catalog, generator and resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Item category, which also decides which equipment slots accept the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Ring,
}

impl ItemCategory {
    /// Get all item categories
    pub fn all() -> &'static [ItemCategory] {
        &[ItemCategory::Weapon, ItemCategory::Ring]
    }

    /// Slots that accept this category, primary slot first
    pub fn slots(&self) -> [EquipmentSlot; 2] {
        match self {
            ItemCategory::Weapon => [EquipmentSlot::Weapon1, EquipmentSlot::Weapon2],
            ItemCategory::Ring => [EquipmentSlot::Ring1, EquipmentSlot::Ring2],
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCategory::Weapon => write!(f, "weapon"),
            ItemCategory::Ring => write!(f, "ring"),
        }
    }
}

/// Item rarity
///
/// Non-unique items derive their rarity from the number of rolled affixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Epic,
    Legendary,
    Unique,
}

impl Rarity {
    /// Rarity for a non-unique item carrying `count` affixes
    pub fn from_affix_count(count: usize) -> Rarity {
        match count {
            0 => Rarity::Normal,
            1 => Rarity::Magic,
            2 => Rarity::Rare,
            3 => Rarity::Epic,
            _ => Rarity::Legendary,
        }
    }

    /// Rarities a loot filter can toggle (uniques are always shown)
    pub fn filterable() -> &'static [Rarity] {
        &[
            Rarity::Normal,
            Rarity::Magic,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Normal => "normal",
            Rarity::Magic => "magic",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Unique => "unique",
        };
        f.write_str(name)
    }
}

/// Role an affix plays on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixRole {
    Prefix,
    Suffix,
    /// Synthetic affix carried by unique items
    Unique,
}

/// Equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon1,
    Weapon2,
    Ring1,
    Ring2,
}

impl EquipmentSlot {
    /// Get all equipment slots, in resolution order
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon1,
            EquipmentSlot::Weapon2,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
        ]
    }

    /// Category of item this slot accepts
    pub fn category(&self) -> ItemCategory {
        match self {
            EquipmentSlot::Weapon1 | EquipmentSlot::Weapon2 => ItemCategory::Weapon,
            EquipmentSlot::Ring1 | EquipmentSlot::Ring2 => ItemCategory::Ring,
        }
    }

    /// The other slot of the same category
    pub fn opposite(&self) -> EquipmentSlot {
        match self {
            EquipmentSlot::Weapon1 => EquipmentSlot::Weapon2,
            EquipmentSlot::Weapon2 => EquipmentSlot::Weapon1,
            EquipmentSlot::Ring1 => EquipmentSlot::Ring2,
            EquipmentSlot::Ring2 => EquipmentSlot::Ring1,
        }
    }

    /// Stable key used in save files and logs
    pub fn key(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon1 => "weapon1",
            EquipmentSlot::Weapon2 => "weapon2",
            EquipmentSlot::Ring1 => "ring1",
            EquipmentSlot::Ring2 => "ring2",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Stat targeted by a rollable affix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    IncreasedDamage,
    CritChance,
    CritMultiplier,
    Projectiles,
    PoisonDamage,
    PoisonChance,
    PoisonDuration,
    MinionDamage,
    SummonSkeleton,
    SkeletonArrows,
    /// Amplifies weapon-sourced affixes when found on a ring
    WeaponEffectScale,
}

impl StatKind {
    /// Tooltip line for a rolled value of this stat
    pub fn describe(&self, value: i64) -> String {
        match self {
            StatKind::IncreasedDamage => format!("+{}% physical damage", value),
            StatKind::CritChance => format!("+{}% critical strike chance", value),
            StatKind::CritMultiplier => format!("+{}% critical strike damage", value),
            StatKind::Projectiles => format!("+{} projectiles", value),
            StatKind::PoisonDamage => {
                format!("Poison: {}% of hit damage per second for 3s", value)
            }
            StatKind::PoisonChance => format!("+{}% poison chance", value),
            StatKind::PoisonDuration => format!("+{}% poison duration", value),
            StatKind::MinionDamage => format!("+{}% minion damage", value),
            StatKind::SummonSkeleton => "Summons a skeleton archer".to_string(),
            StatKind::SkeletonArrows => format!("+{} skeleton arrows", value),
            StatKind::WeaponEffectScale => format!("+{}% weapon effect amplification", value),
        }
    }
}

/// Closed set of unique item behaviours, each with its typed parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UniqueKind {
    /// Hits have a chance to deal a slice of the target's max life
    Awl,
    /// Punches automatically `hits_per_second` times per second
    ElectricDrill { hits_per_second: u32 },
    /// Minions copy `share_pct` of the player's last hit
    BoneUnity { share_pct: u32 },
    /// Guaranteed poison with a duration modifier
    HornetStinger { duration_pct: i32 },
    /// Skeleton archers hit harder and faster
    SkeletonStorm { speed_bonus_pct: u32 },
    /// Raw base damage and nothing else
    Absurdity,
    /// Re-applies the opposite ring at double strength
    TwinMirror,
    /// Hits have a chance to deal jackpot damage
    Jackpot { chance_pct: u32 },
}

/// Parameter-free discriminant of [`UniqueKind`], used by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueTag {
    Awl,
    ElectricDrill,
    BoneUnity,
    HornetStinger,
    SkeletonStorm,
    Absurdity,
    TwinMirror,
    Jackpot,
}

impl UniqueTag {
    /// Whether this behaviour reads a rolled parameter
    pub fn takes_parameter(&self) -> bool {
        matches!(
            self,
            UniqueTag::ElectricDrill
                | UniqueTag::BoneUnity
                | UniqueTag::HornetStinger
                | UniqueTag::SkeletonStorm
                | UniqueTag::Jackpot
        )
    }

    /// Build the typed behaviour from a rolled parameter
    ///
    /// Parameter-free kinds ignore `param`; negative values are clamped to 0 for
    /// kinds whose parameter is unsigned.
    pub fn with_parameter(&self, param: i64) -> UniqueKind {
        let unsigned = param.clamp(0, u32::MAX as i64) as u32;
        match self {
            UniqueTag::Awl => UniqueKind::Awl,
            UniqueTag::ElectricDrill => UniqueKind::ElectricDrill { hits_per_second: unsigned },
            UniqueTag::BoneUnity => UniqueKind::BoneUnity { share_pct: unsigned },
            UniqueTag::HornetStinger => UniqueKind::HornetStinger {
                duration_pct: param.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            },
            UniqueTag::SkeletonStorm => UniqueKind::SkeletonStorm { speed_bonus_pct: unsigned },
            UniqueTag::Absurdity => UniqueKind::Absurdity,
            UniqueTag::TwinMirror => UniqueKind::TwinMirror,
            UniqueTag::Jackpot => UniqueKind::Jackpot { chance_pct: unsigned },
        }
    }
}

impl UniqueKind {
    /// Discriminant without the parameter
    pub fn tag(&self) -> UniqueTag {
        match self {
            UniqueKind::Awl => UniqueTag::Awl,
            UniqueKind::ElectricDrill { .. } => UniqueTag::ElectricDrill,
            UniqueKind::BoneUnity { .. } => UniqueTag::BoneUnity,
            UniqueKind::HornetStinger { .. } => UniqueTag::HornetStinger,
            UniqueKind::SkeletonStorm { .. } => UniqueTag::SkeletonStorm,
            UniqueKind::Absurdity => UniqueTag::Absurdity,
            UniqueKind::TwinMirror => UniqueTag::TwinMirror,
            UniqueKind::Jackpot { .. } => UniqueTag::Jackpot,
        }
    }

    /// The parameter as stored in the synthetic affix value
    pub fn parameter(&self) -> i64 {
        match *self {
            UniqueKind::ElectricDrill { hits_per_second } => hits_per_second as i64,
            UniqueKind::BoneUnity { share_pct } => share_pct as i64,
            UniqueKind::HornetStinger { duration_pct } => duration_pct as i64,
            UniqueKind::SkeletonStorm { speed_bonus_pct } => speed_bonus_pct as i64,
            UniqueKind::Jackpot { chance_pct } => chance_pct as i64,
            UniqueKind::Awl | UniqueKind::Absurdity | UniqueKind::TwinMirror => 1,
        }
    }

    /// Identifier of the synthetic affix carrying this behaviour
    pub fn affix_id(&self) -> &'static str {
        match self.tag() {
            UniqueTag::Awl => "unique_awl",
            UniqueTag::ElectricDrill => "unique_electric_drill",
            UniqueTag::BoneUnity => "unique_bone_unity",
            UniqueTag::HornetStinger => "unique_hornet_stinger",
            UniqueTag::SkeletonStorm => "unique_skeleton_storm",
            UniqueTag::Absurdity => "unique_absurdity",
            UniqueTag::TwinMirror => "unique_twin_mirror",
            UniqueTag::Jackpot => "unique_jackpot",
        }
    }

    /// Tooltip lines describing the unique effect
    pub fn describe(&self) -> Vec<String> {
        match *self {
            UniqueKind::Awl => vec![
                "10% chance to deal 1% of the target's max life".to_string(),
                "Base damage 1".to_string(),
            ],
            UniqueKind::ElectricDrill { hits_per_second } => vec![
                format!("Attacks automatically {} times per second", hits_per_second),
                "Base damage 1".to_string(),
            ],
            UniqueKind::BoneUnity { share_pct } => vec![format!(
                "Minions deal {}% of your last hit instead of their own damage",
                share_pct
            )],
            UniqueKind::HornetStinger { duration_pct } => vec![
                "+100% poison chance".to_string(),
                "+100% poison damage".to_string(),
                format!("{:+}% poison duration", duration_pct),
            ],
            UniqueKind::SkeletonStorm { speed_bonus_pct } => vec![
                "Skeleton archers deal 5x damage".to_string(),
                format!("+{}% skeleton archer attack speed", speed_bonus_pct),
            ],
            UniqueKind::Absurdity => vec!["Pure, unreasonable base damage".to_string()],
            UniqueKind::TwinMirror => {
                vec!["The opposite ring's effects are applied two more times".to_string()]
            }
            UniqueKind::Jackpot { chance_pct } => {
                vec![format!("{}% chance for a hit to deal 7x damage", chance_pct)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_from_count() {
        assert_eq!(Rarity::from_affix_count(1), Rarity::Magic);
        assert_eq!(Rarity::from_affix_count(2), Rarity::Rare);
        assert_eq!(Rarity::from_affix_count(3), Rarity::Epic);
        assert_eq!(Rarity::from_affix_count(4), Rarity::Legendary);
    }

    #[test]
    fn test_slot_categories() {
        for slot in EquipmentSlot::all() {
            assert_eq!(slot.opposite().category(), slot.category());
            assert_ne!(slot.opposite(), *slot);
        }
        assert_eq!(ItemCategory::Ring.slots()[0], EquipmentSlot::Ring1);
    }

    #[test]
    fn test_unique_parameter_round_trip() {
        let drill = UniqueTag::ElectricDrill.with_parameter(7);
        assert_eq!(drill, UniqueKind::ElectricDrill { hits_per_second: 7 });
        assert_eq!(drill.parameter(), 7);
        assert_eq!(drill.tag(), UniqueTag::ElectricDrill);

        let hornet = UniqueTag::HornetStinger.with_parameter(-40);
        assert_eq!(hornet.parameter(), -40);
    }

    #[test]
    fn test_unique_kind_serialization() {
        let kind = UniqueKind::SkeletonStorm { speed_bonus_pct: 45 };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("skeleton_storm"));
        let back: UniqueKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
