//! StatSource - Trait and implementations for stat providers

mod gear;
mod mirror;

pub use gear::GearSource;
pub use mirror::MirrorSource;

use crate::stat_block::StatAccumulator;

/// Trait for anything that contributes stats to an aggregate snapshot
pub trait StatSource: Send + Sync {
    /// Identifier for this source, used in logs
    fn id(&self) -> String;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Gear: 0
    /// - Mirrored gear: 100
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
