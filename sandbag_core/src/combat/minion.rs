//! Skeleton archer volleys

use crate::config::MinionConstants;
use crate::stat_block::AggregateStats;

/// Damage released by one archer volley
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinionVolley {
    pub damage_per_arrow: f64,
    pub arrows: u32,
}

impl MinionVolley {
    pub fn total(&self) -> f64 {
        self.damage_per_arrow * self.arrows as f64
    }
}

/// Attack progress of the summoned archer
///
/// Every minion-timer fire adds one tick of progress. The archer shoots when
/// progress reaches its threshold, keeping the remainder, so a speed bonus
/// makes it shoot on more ticks without ever shooting twice in one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonArcher {
    progress_ms: f64,
}

impl SkeletonArcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress_ms(&self) -> f64 {
        self.progress_ms
    }

    pub fn reset(&mut self) {
        self.progress_ms = 0.0;
    }

    /// Handle one minion-timer fire
    ///
    /// `last_hit` is the player's last punch before the Awl proc.
    pub fn fire(
        &mut self,
        stats: &AggregateStats,
        last_hit: f64,
        constants: &MinionConstants,
    ) -> Option<MinionVolley> {
        if !stats.has_minion() {
            return None;
        }

        let tick = constants.tick_ms as f64;
        self.progress_ms += tick;

        let storm = stats.storm_count > 0;
        let speed = if storm {
            1.0 + stats.summon_speed_bonus_pct / 100.0
        } else {
            1.0
        };
        let threshold = tick / speed;
        if self.progress_ms < threshold {
            return None;
        }
        self.progress_ms -= threshold;

        let mut damage = if stats.damage_mirrors_player {
            last_hit * stats.minion_copy_damage_pct / 100.0
        } else {
            constants.base_damage * (1.0 + stats.minion_damage_pct / 100.0)
        };
        if storm {
            damage *= constants.storm_multiplier;
        }

        let arrows = if stats.damage_mirrors_player {
            1
        } else {
            stats.summon_arrow_count.max(0.0).floor() as u32
        };

        Some(MinionVolley {
            damage_per_arrow: damage,
            arrows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archer_stats() -> AggregateStats {
        let mut stats = AggregateStats::default();
        stats.summon_count = 1.0;
        stats
    }

    #[test]
    fn test_no_minion_no_volley() {
        let mut archer = SkeletonArcher::new();
        let volley = archer.fire(&AggregateStats::default(), 100.0, &MinionConstants::default());
        assert!(volley.is_none());
        assert!((archer.progress_ms()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plain_volley() {
        let mut stats = archer_stats();
        stats.minion_damage_pct = 50.0;
        stats.summon_arrow_count = 3.0;

        let volley = SkeletonArcher::new()
            .fire(&stats, 100.0, &MinionConstants::default())
            .unwrap();
        assert!((volley.damage_per_arrow - 15.0).abs() < f64::EPSILON);
        assert_eq!(volley.arrows, 3);
        assert!((volley.total() - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bone_unity_copies_last_hit_with_one_arrow() {
        let mut stats = archer_stats();
        stats.damage_mirrors_player = true;
        stats.minion_copy_damage_pct = 100.0;
        stats.summon_arrow_count = 4.0;
        stats.storm_count = 1;

        let volley = SkeletonArcher::new()
            .fire(&stats, 80.0, &MinionConstants::default())
            .unwrap();
        assert!((volley.damage_per_arrow - 400.0).abs() < f64::EPSILON);
        assert_eq!(volley.arrows, 1);
    }

    #[test]
    fn test_storm_speed_keeps_remainder() {
        let mut stats = archer_stats();
        stats.storm_count = 1;
        stats.summon_speed_bonus_pct = 100.0;
        let constants = MinionConstants::default();
        let mut archer = SkeletonArcher::new();

        // threshold 500: one volley per fire, remainder grows by 500 each time
        assert!(archer.fire(&stats, 0.0, &constants).is_some());
        assert!((archer.progress_ms() - 500.0).abs() < f64::EPSILON);
        assert!(archer.fire(&stats, 0.0, &constants).is_some());
        assert!((archer.progress_ms() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_bonus_ignored_without_storm() {
        let mut stats = archer_stats();
        stats.summon_speed_bonus_pct = 100.0;
        let mut archer = SkeletonArcher::new();
        archer.fire(&stats, 0.0, &MinionConstants::default());
        assert!((archer.progress_ms()).abs() < f64::EPSILON);
    }
}
