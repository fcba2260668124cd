//! GameSession - single owner of all mutable game state
//!
//! Every mutation goes through `&mut GameSession`, which serializes all reads
//! and writes. Time only moves through [`GameSession::tick`], so a session
//! driven with the same seed and the same calls is fully reproducible.

use crate::cadence::{Cadence, CadenceTransition, IntervalTimer};
use crate::combat::{resolve_punch, DamageMeter, HitOutcome, PoisonTracker, PunchContext, SkeletonArcher};
use crate::config::{default_catalog, AffixCatalog, ConfigError, GameConstants};
use crate::encounter::{DamageResult, Encounter};
use crate::equipment::{Equipment, Inventory, Loadout, LootFilter, Rejection};
use crate::generator::Generator;
use crate::item::{Item, ItemId};
use crate::progression::Character;
use crate::save::{FilterEntry, SaveData, SaveError, SAVE_VERSION};
use crate::stat_block::AggregateStats;
use crate::types::{EquipmentSlot, ItemCategory, Rarity};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Last hit assumed before the first punch, for Bone Unity minions
const INITIAL_LAST_HIT: f64 = 10.0;

/// What happened during one [`GameSession::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub poison_damage: u64,
    pub minion_damage: u64,
    pub auto_punches: u32,
    pub auto_damage: u64,
    pub defeats: u32,
}

/// The whole game
pub struct GameSession {
    generator: Generator,
    constants: GameConstants,
    rng: ChaCha8Rng,

    character: Character,
    encounter: Encounter,
    gold: u64,
    gold_mode: bool,
    loadout: Loadout,
    filter: LootFilter,

    // === Timers ===
    poison_timer: IntervalTimer,
    minion_timer: IntervalTimer,
    auto_timer: IntervalTimer,
    cadence: Cadence,

    // === Combat state ===
    poisons: PoisonTracker,
    archer: SkeletonArcher,
    meter: DamageMeter,
    last_hit: f64,
    running: bool,
    clock_ms: u64,

    // === Totals ===
    total_damage: u64,
    defeats: u64,
}

impl GameSession {
    /// Start a fresh run
    pub fn new(catalog: Arc<AffixCatalog>, constants: GameConstants, seed: u64) -> Self {
        let generator =
            Generator::with_shared(catalog).with_damage_per_level(constants.items.damage_per_level);

        GameSession {
            generator,
            rng: ChaCha8Rng::seed_from_u64(seed),
            character: Character::new(&constants.progression),
            encounter: Encounter::new(1, constants.encounter.clone()),
            gold: 0,
            gold_mode: false,
            loadout: Loadout::new(
                constants.storage.inventory_capacity,
                constants.storage.drop_pool_capacity,
            ),
            filter: LootFilter::default(),
            poison_timer: IntervalTimer::started(constants.poison.tick_ms),
            minion_timer: IntervalTimer::started(constants.minions.tick_ms),
            auto_timer: IntervalTimer::new(1000),
            cadence: Cadence::Stopped,
            poisons: PoisonTracker::new(),
            archer: SkeletonArcher::new(),
            meter: DamageMeter::new(constants.combat.meter_window_ms),
            last_hit: INITIAL_LAST_HIT,
            running: true,
            clock_ms: 0,
            total_damage: 0,
            defeats: 0,
            constants,
        }
    }

    /// Fresh run with the shipped catalog and default constants
    pub fn with_defaults(seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(default_catalog()?), GameConstants::default(), seed))
    }

    // === Queries ===

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn gold_mode(&self) -> bool {
        self.gold_mode
    }

    pub fn equipment(&self) -> &Equipment {
        self.loadout.equipment()
    }

    pub fn inventory(&self) -> &Inventory {
        self.loadout.inventory()
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn loot_filter(&self) -> &LootFilter {
        &self.filter
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// Aggregate stats of the current equipment
    pub fn stats(&self) -> AggregateStats {
        AggregateStats::compute(self.loadout.equipment())
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn auto_attack_timer(&self) -> &IntervalTimer {
        &self.auto_timer
    }

    pub fn poison_timer(&self) -> &IntervalTimer {
        &self.poison_timer
    }

    pub fn minion_timer(&self) -> &IntervalTimer {
        &self.minion_timer
    }

    pub fn active_poisons(&self) -> &PoisonTracker {
        &self.poisons
    }

    /// False after the boss falls, until [`GameSession::resume`]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Session time in milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn total_damage(&self) -> u64 {
        self.total_damage
    }

    pub fn defeats(&self) -> u64 {
        self.defeats
    }

    /// The player's last hit before the Awl proc
    pub fn last_hit(&self) -> f64 {
        self.last_hit
    }

    /// Damage dealt in the meter window ending now
    pub fn meter_total(&mut self) -> u64 {
        self.meter.total(self.clock_ms)
    }

    /// Average damage per second over the meter window
    pub fn meter_dps(&mut self) -> f64 {
        self.meter.per_second(self.clock_ms)
    }

    /// Newest drops the loot filter shows, newest first, with pool indices
    pub fn visible_drops(&self) -> Vec<(usize, &Item)> {
        self.loadout
            .drops()
            .visible(&self.filter, self.constants.storage.visible_drops)
    }

    // === Settings ===

    pub fn set_gold_mode(&mut self, enabled: bool) {
        self.gold_mode = enabled;
        log::info!("gold mode {}", if enabled { "on" } else { "off" });
    }

    pub fn set_filter(&mut self, rarity: Rarity, shown: bool) {
        self.filter.set(rarity, shown);
    }

    /// Move to another encounter level (clamped to at least 1) with full life
    pub fn set_level(&mut self, level: u32) -> Result<(), Rejection> {
        if !self.running {
            return Err(self.reject(Rejection::EncounterOver));
        }
        self.encounter.set_level(level);
        log::debug!(
            "encounter level {} with {} hp",
            self.encounter.level(),
            self.encounter.max_hp()
        );
        Ok(())
    }

    /// Shift the encounter level by `delta`
    pub fn change_level(&mut self, delta: i64) -> Result<(), Rejection> {
        let level = (self.encounter.level() as i64 + delta).clamp(1, u32::MAX as i64);
        self.set_level(level as u32)
    }

    // === Item lifecycle ===

    pub fn equip(&mut self, item_id: ItemId, index: usize, slot: EquipmentSlot) -> Result<(), Rejection> {
        let result = self.loadout.equip(item_id, index, slot);
        self.after_lifecycle(result)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), Rejection> {
        let result = self.loadout.unequip(slot);
        self.after_lifecycle(result)
    }

    pub fn loot(&mut self, drop_index: usize) -> Result<ItemId, Rejection> {
        let result = self.loadout.loot(drop_index);
        result.map_err(|r| self.reject(r))
    }

    pub fn loot_and_equip(&mut self, drop_index: usize, slot: EquipmentSlot) -> Result<(), Rejection> {
        let result = self.loadout.loot_and_equip(drop_index, slot);
        self.after_lifecycle(result)
    }

    pub fn discard(&mut self, index: usize) -> Result<Item, Rejection> {
        let result = self.loadout.discard(index);
        result.map_err(|r| self.reject(r))
    }

    pub fn auto_assign(&mut self, index: usize) -> Result<EquipmentSlot, Rejection> {
        let result = self.loadout.auto_assign(index);
        self.after_lifecycle(result)
    }

    /// Buy an item of `category` at the current encounter level
    pub fn buy(&mut self, category: ItemCategory) -> Result<ItemId, Rejection> {
        let cost = self.encounter.shop_cost();
        if self.gold < cost {
            return Err(self.reject(Rejection::InsufficientGold {
                cost,
                available: self.gold,
            }));
        }
        if self.loadout.inventory().is_full() {
            return Err(self.reject(Rejection::InventoryFull));
        }

        // the encounter level is never 0, so rolling cannot fail here
        let item = match self.generator.roll(category, self.encounter.level(), &mut self.rng) {
            Ok(item) => item,
            Err(err) => {
                log::error!("shop roll failed: {}", err);
                return Err(self.reject(Rejection::EncounterOver));
            }
        };
        let id = item.id;
        self.loadout.stash(item).map_err(|r| self.reject(r))?;
        self.gold -= cost;
        log::debug!("bought {} {} for {} gold", category, id, cost);
        Ok(id)
    }

    // === Combat ===

    /// Punch the encounter once
    pub fn punch(&mut self) -> Result<HitOutcome, Rejection> {
        if !self.running {
            return Err(self.reject(Rejection::EncounterOver));
        }

        let stats = self.stats();
        let ctx = PunchContext {
            character_damage: self.character.flat_damage as f64,
            encounter_max_hp: self.encounter.max_hp() as f64,
            combat: &self.constants.combat,
            poison: &self.constants.poison,
        };
        let outcome = resolve_punch(&stats, &ctx, &mut self.rng);

        self.last_hit = outcome.hit;
        self.deal_damage(outcome.dealt);

        if let Some(poison) = outcome.poison {
            self.poisons.apply(poison.dps, poison.duration_ms, self.clock_ms);
        }

        Ok(outcome)
    }

    /// Advance session time, firing poison, minion and auto-attack timers
    ///
    /// Timers that fire at the same instant run in that fixed order.
    pub fn tick(&mut self, delta_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        let defeats_before = self.defeats;
        let mut remaining = delta_ms;

        while remaining > 0 {
            let step = [
                self.poison_timer.time_to_fire(),
                self.minion_timer.time_to_fire(),
                self.auto_timer.time_to_fire(),
            ]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(remaining)
            .min(remaining);

            self.clock_ms += step;
            remaining -= step;

            let poison_fires = self.poison_timer.advance(step);
            let minion_fires = self.minion_timer.advance(step);
            let auto_fires = self.auto_timer.advance(step);

            for _ in 0..poison_fires {
                report.poison_damage += self.poison_tick();
            }
            for _ in 0..minion_fires {
                report.minion_damage += self.minion_tick();
            }
            for _ in 0..auto_fires {
                if let Ok(outcome) = self.punch() {
                    report.auto_punches += 1;
                    report.auto_damage += outcome.dealt;
                }
            }
        }

        report.defeats = (self.defeats - defeats_before) as u32;
        report
    }

    /// Continue after the boss victory
    ///
    /// Re-arms the poison and minion timers exactly once, clears stale poison
    /// and refills the encounter. Does nothing while the run is active.
    pub fn resume(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.poisons.clear();
        self.poison_timer.start();
        self.minion_timer.start();
        if let Some(interval) = self.cadence.interval_ms() {
            self.auto_timer.restart(interval);
        }
        self.encounter.refill();
        log::info!("run resumed at level {}", self.encounter.level());
        true
    }

    // === Persistence ===

    /// Snapshot of the persisted state
    pub fn save(&self) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            character: self.character.clone(),
            encounter_level: self.encounter.level(),
            gold: self.gold,
            inventory: self.loadout.inventory().items().to_vec(),
            equipment: self.loadout.equipment().clone(),
            filters: self
                .filter
                .entries()
                .into_iter()
                .map(|(rarity, shown)| FilterEntry { rarity, shown })
                .collect(),
        }
    }

    /// Replace the persisted state from JSON
    ///
    /// `None` means nothing was stored. Everything is validated before any
    /// state changes; on error the session is untouched. A restored run
    /// starts without poison, drops or minion charge, and is running even
    /// if the previous one ended in victory.
    pub fn restore(&mut self, json: Option<&str>) -> Result<(), SaveError> {
        let json = json.ok_or(SaveError::NoData)?;
        let data = match SaveData::from_json(json) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("rejecting save: {}", err);
                return Err(err);
            }
        };
        if let Err(err) = data.validate(self.loadout.inventory().capacity()) {
            log::warn!("rejecting save: {}", err);
            return Err(err);
        }

        let filter = data.loot_filter();
        let SaveData {
            character,
            encounter_level,
            gold,
            inventory,
            equipment,
            ..
        } = data;

        self.loadout
            .inventory
            .replace_all(inventory)
            .map_err(|items| SaveError::Invalid(format!("{} items do not fit", items.len())))?;
        self.loadout.equipment = equipment;
        self.character = character;
        self.encounter.set_level(encounter_level);
        self.gold = gold;
        self.filter = filter;
        self.reset_combat();
        self.refresh_cadence();

        log::info!(
            "restored save: level {} character, encounter {}, {} gold",
            self.character.level,
            self.encounter.level(),
            self.gold
        );
        Ok(())
    }

    // === Internals ===

    /// Forget transient combat state and re-arm a finished run
    fn reset_combat(&mut self) {
        self.poisons.clear();
        self.archer = SkeletonArcher::new();
        self.last_hit = INITIAL_LAST_HIT;
        self.meter.clear();
        self.loadout.drops.clear();

        if !self.running {
            self.running = true;
            self.poison_timer.start();
            self.minion_timer.start();
            // the auto-attack timer is re-armed from scratch by refresh_cadence
            self.cadence = Cadence::Stopped;
        }
    }

    fn reject(&self, rejection: Rejection) -> Rejection {
        log::debug!("rejected ({}): {}", rejection.code(), rejection);
        rejection
    }

    fn after_lifecycle<T>(&mut self, result: Result<T, Rejection>) -> Result<T, Rejection> {
        match result {
            Ok(value) => {
                self.refresh_cadence();
                Ok(value)
            }
            Err(rejection) => Err(self.reject(rejection)),
        }
    }

    /// Recompute stats and move the auto-attack timer to the new cadence
    fn refresh_cadence(&mut self) {
        let next = self.stats().auto_attack_cadence();
        let transition = self.cadence.transition_to(next);
        self.cadence = next;

        // while the run is over the timer stays stopped; resume arms it
        if !self.running {
            return;
        }
        match transition {
            CadenceTransition::Unchanged => {}
            CadenceTransition::Start { rate } | CadenceTransition::Restart { rate } => {
                if let Some(interval) = next.interval_ms() {
                    self.auto_timer.restart(interval);
                }
                log::info!("auto-attack at {} hits/s", rate);
            }
            CadenceTransition::Stop => {
                self.auto_timer.stop();
                log::info!("auto-attack stopped");
            }
        }
    }

    fn poison_tick(&mut self) -> u64 {
        if !self.running {
            return 0;
        }
        let dps = self.poisons.tick(self.clock_ms);
        if dps <= 0.0 {
            return 0;
        }
        let amount = dps.ceil() as u64;
        self.deal_damage(amount);
        amount
    }

    fn minion_tick(&mut self) -> u64 {
        if !self.running {
            return 0;
        }
        let stats = self.stats();
        let Some(volley) = self.archer.fire(&stats, self.last_hit, &self.constants.minions) else {
            return 0;
        };

        let mut dealt = 0;
        for _ in 0..volley.arrows {
            if !self.running {
                break;
            }
            let amount = crate::combat::ceil_damage(volley.damage_per_arrow);
            self.deal_damage(amount);
            dealt += amount;
        }
        dealt
    }

    fn deal_damage(&mut self, amount: u64) {
        self.total_damage = self.total_damage.saturating_add(amount);
        self.meter.record(self.clock_ms, amount);

        match self.encounter.take_damage(amount) {
            DamageResult::Hit => {}
            DamageResult::Defeated { level, max_hp } => {
                self.defeats += 1;
                self.character.gain_experience(max_hp, &self.constants.progression);
                self.spawn_drop(level);
            }
            DamageResult::Victory => {
                self.defeats += 1;
                self.running = false;
                self.poison_timer.stop();
                self.minion_timer.stop();
                self.auto_timer.stop();
                log::info!(
                    "boss defeated after {:.1}s with {} total damage",
                    self.clock_ms as f64 / 1000.0,
                    self.total_damage
                );
            }
        }
    }

    fn spawn_drop(&mut self, level: u32) {
        if self.gold_mode {
            let amount = self.encounter.roll_gold(&mut self.rng);
            self.gold = self.gold.saturating_add(amount);
            log::debug!("gold drop: {}", amount);
            return;
        }

        let category = if self.rng.gen_bool(0.5) {
            ItemCategory::Weapon
        } else {
            ItemCategory::Ring
        };
        match self.generator.roll(category, level, &mut self.rng) {
            Ok(item) => {
                if item.is_unique() {
                    log::info!("unique drop: {} {}", item.icon, item.name);
                }
                self.loadout.add_drop(item);
            }
            Err(err) => log::error!("drop roll failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::test_items::{stat_item, unique_item};
    use crate::types::{StatKind, UniqueKind};

    fn session() -> GameSession {
        GameSession::with_defaults(42).unwrap()
    }

    fn drill(id: u64, rate: u32) -> Item {
        unique_item(id, ItemCategory::Weapon, UniqueKind::ElectricDrill { hits_per_second: rate })
    }

    fn heavy_weapon(id: u64, base_damage: f64) -> Item {
        let mut item = stat_item(id, ItemCategory::Weapon, &[]);
        item.base_damage = base_damage;
        item
    }

    #[test]
    fn test_cadence_transitions_apply_once() {
        let mut session = session();
        session.loadout.stash(drill(1, 5)).unwrap();
        session.loadout.stash(drill(2, 5)).unwrap();
        session.loadout.stash(stat_item(3, ItemCategory::Ring, &[(StatKind::CritChance, 5)])).unwrap();
        assert!(!session.auto_attack_timer().is_running());

        session.equip(ItemId(1), 0, EquipmentSlot::Weapon1).unwrap();
        assert_eq!(session.cadence(), Cadence::Running { rate: 5 });
        assert_eq!(session.auto_attack_timer().starts(), 1);
        assert_eq!(session.auto_attack_timer().interval_ms(), 200);

        // unchanged rate leaves the timer alone
        session.equip(ItemId(3), 1, EquipmentSlot::Ring1).unwrap();
        assert_eq!(session.auto_attack_timer().starts(), 1);

        session.equip(ItemId(2), 0, EquipmentSlot::Weapon2).unwrap();
        assert_eq!(session.cadence(), Cadence::Running { rate: 10 });
        assert_eq!(session.auto_attack_timer().starts(), 2);
        assert_eq!(session.auto_attack_timer().interval_ms(), 100);

        session.unequip(EquipmentSlot::Weapon2).unwrap();
        assert_eq!(session.auto_attack_timer().starts(), 3);

        session.unequip(EquipmentSlot::Weapon1).unwrap();
        assert_eq!(session.cadence(), Cadence::Stopped);
        assert!(!session.auto_attack_timer().is_running());
        assert_eq!(session.auto_attack_timer().starts(), 3);
    }

    #[test]
    fn test_drill_punches_automatically() {
        let mut session = session();
        session.set_level(500).unwrap();
        session.loadout.stash(drill(1, 5)).unwrap();
        session.auto_assign(0).unwrap();

        let report = session.tick(1000);
        assert_eq!(report.auto_punches, 5);
        assert!(report.auto_damage > 0);
        assert_eq!(session.clock_ms(), 1000);
        assert!(session.total_damage() > 0);
    }

    #[test]
    fn test_rejected_lifecycle_leaves_cadence() {
        let mut session = session();
        session.loadout.stash(drill(1, 6)).unwrap();
        let err = session.equip(ItemId(1), 0, EquipmentSlot::Ring1).unwrap_err();
        assert_eq!(err.code(), "wrong_category");
        assert_eq!(session.cadence(), Cadence::Stopped);
        assert_eq!(session.inventory().len(), 1);
    }

    #[test]
    fn test_defeat_grants_experience_and_drop() {
        let mut session = session();
        session.loadout.stash(heavy_weapon(1, 1000.0)).unwrap();
        session.auto_assign(0).unwrap();

        session.punch().unwrap();
        assert_eq!(session.defeats(), 1);
        assert_eq!(session.character().level, 2);
        assert_eq!(session.loadout().drops().len(), 1);
        assert_eq!(session.encounter().hp(), session.encounter().max_hp());
        assert_eq!(session.visible_drops().len(), 1);

        session.set_gold_mode(true);
        session.punch().unwrap();
        assert_eq!(session.loadout().drops().len(), 1);
        assert!((5..=15).contains(&session.gold()));
    }

    #[test]
    fn test_poison_ticks_until_expiry() {
        let mut session = session();
        session.set_level(100).unwrap();
        session
            .loadout
            .stash(stat_item(
                1,
                ItemCategory::Weapon,
                &[(StatKind::PoisonDamage, 100), (StatKind::PoisonChance, 100)],
            ))
            .unwrap();
        session.auto_assign(0).unwrap();

        let outcome = session.punch().unwrap();
        assert!(outcome.poison.is_some());
        assert_eq!(session.active_poisons().len(), 1);

        let first = session.tick(1000);
        assert!(first.poison_damage >= 11);
        let rest = session.tick(4000);
        assert_eq!(rest.poison_damage, first.poison_damage);
        assert!(session.active_poisons().is_empty());
    }

    #[test]
    fn test_minion_volley_each_second() {
        let mut session = session();
        session.set_level(100).unwrap();
        session
            .loadout
            .stash(stat_item(1, ItemCategory::Ring, &[(StatKind::SummonSkeleton, 1)]))
            .unwrap();
        session.auto_assign(0).unwrap();

        let report = session.tick(3000);
        assert_eq!(report.minion_damage, 30);
        assert_eq!(session.meter_total(), 30);
    }

    #[test]
    fn test_victory_stops_and_resume_rearms_once() {
        let mut session = session();
        session.set_level(1000).unwrap();
        session.loadout.stash(heavy_weapon(1, 1.0e9)).unwrap();
        session.auto_assign(0).unwrap();

        session.punch().unwrap();
        assert!(!session.is_running());
        assert!(!session.poison_timer().is_running());
        assert!(!session.minion_timer().is_running());
        assert_eq!(session.punch().unwrap_err(), Rejection::EncounterOver);
        assert_eq!(session.set_level(3).unwrap_err().code(), "encounter_over");
        assert_eq!(session.tick(5000), TickReport::default());

        assert!(session.resume());
        assert!(!session.resume());
        assert_eq!(session.poison_timer().starts(), 2);
        assert_eq!(session.minion_timer().starts(), 2);
        assert!(session.active_poisons().is_empty());
        assert_eq!(session.encounter().level(), 1000);
        assert_eq!(session.encounter().hp(), session.encounter().max_hp());
    }

    #[test]
    fn test_resume_rearms_running_cadence() {
        let mut session = session();
        session.set_level(1000).unwrap();
        session.loadout.stash(heavy_weapon(1, 1.0e9)).unwrap();
        session.loadout.stash(drill(2, 4)).unwrap();
        session.auto_assign(0).unwrap();
        session.auto_assign(0).unwrap();
        assert_eq!(session.auto_attack_timer().starts(), 1);

        session.punch().unwrap();
        assert!(!session.auto_attack_timer().is_running());
        session.resume();
        assert!(session.auto_attack_timer().is_running());
        assert_eq!(session.auto_attack_timer().starts(), 2);
    }

    #[test]
    fn test_buy() {
        let mut session = session();
        assert_eq!(session.buy(ItemCategory::Ring).unwrap_err().code(), "insufficient_gold");

        session.gold = 250;
        session.set_level(2).unwrap();
        let id = session.buy(ItemCategory::Ring).unwrap();
        assert_eq!(session.gold(), 50);
        assert_eq!(session.inventory().items()[0].id, id);
        assert_eq!(session.inventory().items()[0].level, 2);
    }

    #[test]
    fn test_buy_needs_room() {
        let mut session = session();
        session.gold = 1_000_000;
        for id in 0..20 {
            session.loadout.stash(stat_item(id, ItemCategory::Ring, &[])).unwrap();
        }
        assert_eq!(session.buy(ItemCategory::Weapon).unwrap_err(), Rejection::InventoryFull);
        assert_eq!(session.gold(), 1_000_000);
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut original = session();
        original.loadout.stash(drill(1, 7)).unwrap();
        original
            .loadout
            .stash(stat_item(2, ItemCategory::Ring, &[(StatKind::WeaponEffectScale, 30)]))
            .unwrap();
        original.loadout.stash(stat_item(3, ItemCategory::Weapon, &[])).unwrap();
        original.auto_assign(0).unwrap();
        original.auto_assign(0).unwrap();
        original.gold = 1234;
        original.set_level(17).unwrap();
        original.set_filter(Rarity::Rare, false);
        original.character.gain_experience(260, &GameConstants::default().progression);

        let json = original.save().to_json().unwrap();

        let mut restored = GameSession::with_defaults(7).unwrap();
        restored.restore(Some(&json)).unwrap();
        assert_eq!(restored.save(), original.save());
        assert_eq!(restored.stats(), original.stats());
        assert_eq!(restored.cadence(), Cadence::Running { rate: 7 });
        assert!(!restored.loot_filter().shows(Rarity::Rare));
    }

    #[test]
    fn test_bad_saves_leave_session_untouched() {
        let mut session = session();
        session.gold = 77;
        let before = session.save();

        assert!(matches!(session.restore(None), Err(SaveError::NoData)));
        assert!(matches!(session.restore(Some("{]")), Err(SaveError::Corrupted(_))));

        let mut invalid = before.clone();
        invalid.equipment.ring1 = Some(stat_item(5, ItemCategory::Weapon, &[]));
        invalid.gold = 1;
        let json = invalid.to_json().unwrap();
        assert!(matches!(session.restore(Some(&json)), Err(SaveError::Invalid(_))));

        assert_eq!(session.save(), before);
    }

    #[test]
    fn test_restore_after_victory_starts_fresh() {
        let mut session = session();
        let saved = session.save().to_json().unwrap();

        session.set_level(1000).unwrap();
        session.loadout.stash(heavy_weapon(1, 1e9)).unwrap();
        session.auto_assign(0).unwrap();
        session.loadout.stash(drill(2, 5)).unwrap();
        session.auto_assign(0).unwrap();
        session.punch().unwrap();
        assert!(!session.is_running());

        session.restore(Some(&saved)).unwrap();
        assert!(session.is_running());
        assert!(session.poison_timer().is_running());
        assert!(session.minion_timer().is_running());
        assert!(session.active_poisons().is_empty());
        assert!(session.loadout().drops().is_empty());
        assert_eq!(session.cadence(), Cadence::Stopped);
        assert!(!session.auto_attack_timer().is_running());
        assert!(session.punch().is_ok());
    }

    #[test]
    fn test_restore_rearms_saved_drill_after_victory() {
        let mut session = session();
        session.loadout.stash(drill(1, 5)).unwrap();
        session.auto_assign(0).unwrap();
        let saved = session.save().to_json().unwrap();

        session.set_level(1000).unwrap();
        session.loadout.stash(heavy_weapon(2, 1e9)).unwrap();
        session.auto_assign(0).unwrap();
        session.punch().unwrap();
        assert!(!session.is_running());
        assert!(!session.auto_attack_timer().is_running());

        session.restore(Some(&saved)).unwrap();
        assert!(session.auto_attack_timer().is_running());
        assert_eq!(session.auto_attack_timer().interval_ms(), 200);
        assert_eq!(session.tick(1000).auto_punches, 5);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut session = GameSession::with_defaults(seed).unwrap();
            session.loadout.stash(heavy_weapon(1, 150.0)).unwrap();
            session.auto_assign(0).unwrap();
            for _ in 0..50 {
                session.punch().unwrap();
                session.tick(100);
            }
            (session.total_damage(), session.save(), session.loadout().drops().clone())
        };
        assert_eq!(run(5), run(5));
    }
}
