//! DamageMeter - Damage dealt over a sliding window of session time

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct DamageMeter {
    window_ms: u64,
    history: VecDeque<(u64, u64)>,
}

impl Default for DamageMeter {
    fn default() -> Self {
        Self::new(60_000)
    }
}

impl DamageMeter {
    pub fn new(window_ms: u64) -> Self {
        DamageMeter {
            window_ms,
            history: VecDeque::new(),
        }
    }

    /// Record `amount` damage dealt at `now_ms`
    pub fn record(&mut self, now_ms: u64, amount: u64) {
        self.evict(now_ms);
        self.history.push_back((now_ms, amount));
    }

    /// Damage dealt within the window ending at `now_ms`
    pub fn total(&mut self, now_ms: u64) -> u64 {
        self.evict(now_ms);
        self.history.iter().map(|(_, v)| v).sum()
    }

    /// Average damage per second over the window
    pub fn per_second(&mut self, now_ms: u64) -> f64 {
        let span = self.window_ms.min(now_ms).max(1);
        self.total(now_ms) as f64 * 1000.0 / span as f64
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    fn evict(&mut self, now_ms: u64) {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        while self.history.front().map_or(false, |(t, _)| *t < cutoff) {
            self.history.pop_front();
        }
    }
}
