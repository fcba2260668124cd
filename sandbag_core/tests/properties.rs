//! Property tests for generation, stat resolution and the item lifecycle

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sandbag_core::prelude::*;
use sandbag_core::{AffixRole, RolledAffix};
use std::collections::HashSet;

fn generator() -> Generator {
    Generator::new(default_catalog().unwrap())
}

fn category() -> impl Strategy<Value = ItemCategory> {
    prop_oneof![Just(ItemCategory::Weapon), Just(ItemCategory::Ring)]
}

fn slot() -> impl Strategy<Value = EquipmentSlot> {
    prop_oneof![
        Just(EquipmentSlot::Weapon1),
        Just(EquipmentSlot::Weapon2),
        Just(EquipmentSlot::Ring1),
        Just(EquipmentSlot::Ring2),
    ]
}

fn roll(generator: &Generator, category: ItemCategory, level: u32, seed: u64) -> Item {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generator.roll(category, level, &mut rng).unwrap()
}

fn tier_range(catalog: &AffixCatalog, item: &Item, affix: &RolledAffix) -> Option<(i64, i64)> {
    catalog
        .pool(item.category, affix.role)
        .iter()
        .find(|def| def.id == affix.id)?
        .tiers
        .iter()
        .find(|tier| tier.tier == affix.tier)
        .map(|tier| (tier.min, tier.max))
}

fn twin_mirror(id: u64) -> Item {
    Item {
        id: ItemId(id),
        category: ItemCategory::Ring,
        rarity: Rarity::Unique,
        name: "Twin Mirror".to_string(),
        icon: String::new(),
        base_damage: 0.0,
        level: 1,
        affixes: vec![RolledAffix::unique(UniqueKind::TwinMirror)],
    }
}

/// Every item id held anywhere in the loadout
fn held_ids(loadout: &Loadout) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = loadout.inventory().items().iter().map(|i| i.id).collect();
    ids.extend(loadout.equipment().iter().map(|(_, item)| item.id));
    ids.extend((0..loadout.drops().len()).filter_map(|i| loadout.drops().get(i).map(|d| d.id)));
    ids
}

#[derive(Debug, Clone)]
enum Op {
    Drop(ItemCategory),
    Loot(usize),
    Equip(usize, EquipmentSlot),
    Unequip(EquipmentSlot),
    LootAndEquip(usize, EquipmentSlot),
    Discard(usize),
    AutoAssign(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => category().prop_map(Op::Drop),
        2 => (0usize..8).prop_map(Op::Loot),
        2 => ((0usize..8), slot()).prop_map(|(i, s)| Op::Equip(i, s)),
        1 => slot().prop_map(Op::Unequip),
        1 => ((0usize..8), slot()).prop_map(|(i, s)| Op::LootAndEquip(i, s)),
        1 => (0usize..8).prop_map(Op::Discard),
        2 => (0usize..8).prop_map(Op::AutoAssign),
    ]
}

proptest! {
    #[test]
    fn prop_generated_items_are_well_formed(
        category in category(),
        level in 1u32..2000,
        seed in any::<u64>(),
    ) {
        let generator = generator();
        let item = roll(&generator, category, level, seed);

        prop_assert!(item.check_invariants().is_ok());
        prop_assert_eq!(item.category, category);
        prop_assert_eq!(item.level, level);

        let ids: HashSet<&str> = item.affixes.iter().map(|a| a.id.as_str()).collect();
        prop_assert_eq!(ids.len(), item.affixes.len());

        if !item.is_unique() {
            prop_assert_eq!(item.rarity, Rarity::from_affix_count(item.affixes.len()));
            prop_assert!(item.affixes_with_role(AffixRole::Prefix).count() <= 2);
            prop_assert!(item.affixes_with_role(AffixRole::Suffix).count() <= 2);
            prop_assert!((item.base_damage - level as f64 * 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_rolled_values_stay_in_tier(
        category in category(),
        seed in any::<u64>(),
    ) {
        let generator = generator();
        let item = roll(&generator, category, 10, seed);
        for affix in item.affixes.iter().filter(|a| a.role != AffixRole::Unique) {
            let (min, max) = tier_range(generator.catalog(), &item, affix).unwrap();
            prop_assert!(affix.value >= min && affix.value <= max);
        }
    }

    #[test]
    fn prop_compute_is_pure(seeds in proptest::array::uniform4(any::<u64>())) {
        let generator = generator();
        let mut equipment = Equipment::new();
        for (slot, seed) in EquipmentSlot::all().iter().zip(seeds) {
            let item = roll(&generator, slot.category(), 25, seed);
            equipment.insert(*slot, item).unwrap();
        }

        let first = AggregateStats::compute(&equipment);
        let second = AggregateStats::compute(&equipment.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_mirror_triples_partner_stats(seed in any::<u64>()) {
        let generator = generator();
        let ring = roll(&generator, ItemCategory::Ring, 40, seed);
        prop_assume!(!ring.is_unique());

        let mut alone = Equipment::new();
        alone.insert(EquipmentSlot::Ring1, ring.clone()).unwrap();
        let mut mirrored = alone.clone();
        mirrored.insert(EquipmentSlot::Ring2, twin_mirror(1)).unwrap();

        let single = AggregateStats::compute(&alone);
        let tripled = AggregateStats::compute(&mirrored);

        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        prop_assert!(close(tripled.poison_chance_pct, 3.0 * single.poison_chance_pct));
        prop_assert!(close(tripled.minion_damage_pct, 3.0 * single.minion_damage_pct));
        prop_assert!(close(tripled.projectile_count, 3.0 * single.projectile_count));
        prop_assert!(close(tripled.weapon_effect_scale_pct, 3.0 * single.weapon_effect_scale_pct));
        prop_assert!(close(tripled.flat_damage_bonus, 3.0 * single.flat_damage_bonus));
        prop_assert!(close(tripled.summon_count, 3.0 * single.summon_count));
    }

    #[test]
    fn prop_equip_then_unequip_restores(
        category in category(),
        seed in any::<u64>(),
    ) {
        let generator = generator();
        let item = roll(&generator, category, 5, seed);
        let id = item.id;
        let mut loadout = Loadout::new(20, 100);
        loadout.stash(item.clone()).unwrap();

        let slot = category.slots()[0];
        loadout.equip(id, 0, slot).unwrap();
        prop_assert!(loadout.inventory().is_empty());
        prop_assert_eq!(loadout.equipment().find(id), Some(slot));

        loadout.unequip(slot).unwrap();
        prop_assert_eq!(loadout.inventory().items(), &[item][..]);
        prop_assert_eq!(AggregateStats::compute(loadout.equipment()), AggregateStats::default());
    }

    #[test]
    fn prop_lifecycle_keeps_capacity_and_identity(
        seed in any::<u64>(),
        ops in proptest::collection::vec(op(), 1..80),
    ) {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut loadout = Loadout::new(4, 6);

        for op in ops {
            let before = held_ids(&loadout).len();
            let result = match op {
                Op::Drop(category) => {
                    let item = generator.roll(category, 3, &mut rng).unwrap();
                    loadout.add_drop(item);
                    Ok(())
                }
                Op::Loot(i) => loadout.loot(i).map(|_| ()),
                Op::Equip(i, slot) => match loadout.inventory().get(i).map(|item| item.id) {
                    Some(id) => loadout.equip(id, i, slot),
                    None => Ok(()),
                },
                Op::Unequip(slot) => loadout.unequip(slot),
                Op::LootAndEquip(i, slot) => loadout.loot_and_equip(i, slot),
                Op::Discard(i) => loadout.discard(i).map(|_| ()),
                Op::AutoAssign(i) => loadout.auto_assign(i).map(|_| ()),
            };

            if result.is_err() {
                prop_assert_eq!(held_ids(&loadout).len(), before);
            }
            prop_assert!(loadout.inventory().len() <= 4);
            prop_assert!(loadout.drops().len() <= 6);
            prop_assert!(loadout.equipment().is_consistent());

            let ids = held_ids(&loadout);
            let unique: HashSet<ItemId> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }
}
