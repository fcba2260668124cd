//! MirrorSource - A ring re-applied by the Twin Mirror on the opposite slot

use crate::item::{AffixKind, Item};
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::{EquipmentSlot, UniqueKind};

/// How many extra applications a mirrored ring receives
pub const MIRROR_FACTOR: u32 = 2;

/// The partner ring of a Twin Mirror, applied again at double strength
pub struct MirrorSource<'a> {
    /// Slot holding the Twin Mirror
    pub mirror_slot: EquipmentSlot,
    /// Ring in the opposite slot
    pub partner: &'a Item,
}

impl<'a> MirrorSource<'a> {
    pub fn new(mirror_slot: EquipmentSlot, partner: &'a Item) -> Self {
        MirrorSource {
            mirror_slot,
            partner,
        }
    }
}

impl StatSource for MirrorSource<'_> {
    fn id(&self) -> String {
        format!("{}:mirror:{}", self.mirror_slot, self.partner.id)
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        // mirrors never reflect each other, base damage included
        if self.partner.unique_kind() == Some(UniqueKind::TwinMirror) {
            return;
        }

        let factor = MIRROR_FACTOR as f64;
        for affix in &self.partner.affixes {
            match affix.kind {
                AffixKind::Stat(stat) => stats.apply_stat(stat, affix.value as f64 * factor),
                AffixKind::Unique(UniqueKind::TwinMirror) => {}
                AffixKind::Unique(kind) => stats.apply_unique(kind, MIRROR_FACTOR),
            }
        }

        stats.flat_damage_bonus += self.partner.base_damage * factor;
    }
}
