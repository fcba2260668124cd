//! PoisonTracker - Active poison instances on the encounter

use serde::{Deserialize, Serialize};

/// One poison application
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoisonInstance {
    /// Damage dealt on every poison tick
    pub dps: f64,
    /// Session time at which this instance stops ticking
    pub expires_at_ms: u64,
}

impl PoisonInstance {
    /// Check if the instance still ticks at `now_ms`
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.expires_at_ms > now_ms
    }
}

/// Independent, unlimited poison stacks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoisonTracker {
    instances: Vec<PoisonInstance>,
}

impl PoisonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stack lasting `duration_ms` from `now_ms`
    pub fn apply(&mut self, dps: f64, duration_ms: u64, now_ms: u64) {
        self.instances.push(PoisonInstance {
            dps,
            expires_at_ms: now_ms.saturating_add(duration_ms),
        });
    }

    /// Expire finished stacks and return the damage of the remaining ones
    pub fn tick(&mut self, now_ms: u64) -> f64 {
        self.instances.retain(|p| p.is_active(now_ms));
        self.total_dps()
    }

    /// Sum of every stack's damage per tick
    pub fn total_dps(&self) -> f64 {
        self.instances.iter().map(|p| p.dps).sum()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn instances(&self) -> &[PoisonInstance] {
        &self.instances
    }
}
