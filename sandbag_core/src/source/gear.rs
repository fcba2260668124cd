//! GearSource - Stats from equipped items

use crate::item::{AffixKind, Item};
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::EquipmentSlot;

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The equipped item
    pub item: &'a Item,
    /// Multiplier on stat affix values (the ring amplifier for weapons, 1 otherwise)
    pub scale: f64,
}

impl<'a> GearSource<'a> {
    /// Create a new gear source
    pub fn new(slot: EquipmentSlot, item: &'a Item, scale: f64) -> Self {
        GearSource { slot, item, scale }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> String {
        format!("{}:{}", self.slot, self.item.id)
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for affix in &self.item.affixes {
            match affix.kind {
                AffixKind::Stat(stat) => stats.apply_stat(stat, affix.value as f64 * self.scale),
                // Unique effects are never amplified
                AffixKind::Unique(kind) => stats.apply_unique(kind, 1),
            }
        }

        stats.flat_damage_bonus += self.item.base_damage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::test_items::{stat_item, unique_item};
    use crate::types::{ItemCategory, StatKind, UniqueKind};

    #[test]
    fn test_gear_source_id() {
        let item = stat_item(0xab, ItemCategory::Weapon, &[]);
        let source = GearSource::new(EquipmentSlot::Weapon2, &item, 1.0);
        assert_eq!(source.id(), "weapon2:00000000000000ab");
    }

    #[test]
    fn test_scale_applies_to_stats_not_base_or_uniques() {
        let mut item = stat_item(1, ItemCategory::Weapon, &[(StatKind::IncreasedDamage, 20)]);
        item.base_damage = 9.0;
        let mut stats = StatAccumulator::new();
        GearSource::new(EquipmentSlot::Weapon1, &item, 1.5).apply(&mut stats);
        assert!((stats.increased_damage_pct - 30.0).abs() < f64::EPSILON);
        assert!((stats.flat_damage_bonus - 9.0).abs() < f64::EPSILON);

        let drill = unique_item(2, ItemCategory::Weapon, UniqueKind::ElectricDrill { hits_per_second: 7 });
        GearSource::new(EquipmentSlot::Weapon2, &drill, 1.5).apply(&mut stats);
        assert_eq!(stats.drill_rate, 7);
    }
}
