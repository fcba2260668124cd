//! Unique item branch of the generator

use crate::config::{UniqueTable, UniqueVariant};
use crate::item::{Item, ItemId, RolledAffix};
use crate::types::{ItemCategory, Rarity};
use rand::Rng;

/// Variant whose cumulative share contains `roll`
///
/// Falls back to the last variant when rounding leaves `roll` past the end.
pub fn select_variant(table: &UniqueTable, roll: f64) -> Option<&UniqueVariant> {
    let mut cumulative = 0.0;
    for variant in &table.variants {
        cumulative += variant.share;
        if roll < cumulative {
            return Some(variant);
        }
    }
    table.variants.last()
}

/// Roll the unique branch: `None` when the trigger check fails
pub fn roll_unique<R: Rng + ?Sized>(
    table: &UniqueTable,
    id: ItemId,
    category: ItemCategory,
    level: u32,
    level_damage: f64,
    rng: &mut R,
) -> Option<Item> {
    let trigger: f64 = rng.gen();
    if trigger >= table.chance {
        return None;
    }

    let variant = select_variant(table, rng.gen::<f64>())?;
    let param = match variant.param {
        Some(range) => rng.gen_range(range.min..=range.max),
        None => 1,
    };
    let kind = variant.kind.with_parameter(param);

    log::debug!("unique {} ({:?}) dropped at level {}", variant.name, kind, level);

    Some(Item {
        id,
        category,
        rarity: Rarity::Unique,
        name: variant.name.clone(),
        icon: variant.icon.clone(),
        base_damage: variant.base_damage.resolve(level_damage),
        level,
        affixes: vec![RolledAffix::unique(kind)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_catalog, BaseDamageRule, ParamRange};
    use crate::types::{UniqueKind, UniqueTag};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn always_table() -> UniqueTable {
        UniqueTable {
            chance: 1.0,
            variants: vec![
                UniqueVariant {
                    kind: UniqueTag::Awl,
                    name: "Awl".to_string(),
                    icon: "A".to_string(),
                    share: 0.5,
                    base_damage: BaseDamageRule::Fixed { value: 1.0 },
                    param: None,
                },
                UniqueVariant {
                    kind: UniqueTag::ElectricDrill,
                    name: "Electric Drill".to_string(),
                    icon: "D".to_string(),
                    share: 0.5,
                    base_damage: BaseDamageRule::Scaled { factor: 2.0 },
                    param: Some(ParamRange { min: 5, max: 10 }),
                },
            ],
        }
    }

    #[test]
    fn test_select_variant_partitions() {
        let table = always_table();
        assert_eq!(select_variant(&table, 0.0).unwrap().name, "Awl");
        assert_eq!(select_variant(&table, 0.49).unwrap().name, "Awl");
        assert_eq!(select_variant(&table, 0.5).unwrap().name, "Electric Drill");
        assert_eq!(select_variant(&table, 0.9999).unwrap().name, "Electric Drill");
        // rounding past the end falls back to the last variant
        assert_eq!(select_variant(&table, 1.5).unwrap().name, "Electric Drill");
    }

    #[test]
    fn test_never_triggers_at_zero_chance() {
        let mut table = always_table();
        table.chance = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(roll_unique(&table, ItemId(1), ItemCategory::Weapon, 1, 3.0, &mut rng).is_none());
        }
    }

    #[test]
    fn test_unique_items_are_fully_formed() {
        let table = always_table();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let item = roll_unique(&table, ItemId(9), ItemCategory::Weapon, 4, 12.0, &mut rng).unwrap();
            assert!(item.check_invariants().is_ok());
            match item.unique_kind().unwrap() {
                UniqueKind::Awl => assert!((item.base_damage - 1.0).abs() < f64::EPSILON),
                UniqueKind::ElectricDrill { hits_per_second } => {
                    assert!((5..=10).contains(&hits_per_second));
                    assert!((item.base_damage - 24.0).abs() < f64::EPSILON);
                }
                other => panic!("unexpected unique {:?}", other),
            }
        }
    }

    #[test]
    fn test_default_ring_table_variants() {
        let catalog = default_catalog().unwrap();
        let table = &catalog.ring.uniques;
        assert_eq!(select_variant(table, 0.1).unwrap().kind, UniqueTag::SkeletonStorm);
        assert_eq!(select_variant(table, 0.5).unwrap().kind, UniqueTag::Absurdity);
        assert_eq!(select_variant(table, 0.75).unwrap().kind, UniqueTag::TwinMirror);
        assert_eq!(select_variant(table, 0.95).unwrap().kind, UniqueTag::Jackpot);
    }
}
