//! Cadence - periodic timers and the derived auto-attack rate

use serde::{Deserialize, Serialize};

/// Desired auto-attack state derived from aggregate stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cadence {
    #[default]
    Stopped,
    /// Attacks `rate` times per second
    Running { rate: u32 },
}

/// What the host must do to move from one cadence to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceTransition {
    Unchanged,
    Start { rate: u32 },
    Restart { rate: u32 },
    Stop,
}

impl Cadence {
    /// Cadence for a rate in attacks per second; zero means stopped
    pub fn from_rate(rate: u32) -> Self {
        if rate == 0 {
            Cadence::Stopped
        } else {
            Cadence::Running { rate }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Cadence::Running { .. })
    }

    /// Milliseconds between attacks, `None` while stopped
    pub fn interval_ms(&self) -> Option<u64> {
        match *self {
            Cadence::Stopped => None,
            Cadence::Running { rate } => Some((1000 / rate as u64).max(1)),
        }
    }

    /// Transition from `self` to `next`
    pub fn transition_to(&self, next: Cadence) -> CadenceTransition {
        match (*self, next) {
            (Cadence::Stopped, Cadence::Stopped) => CadenceTransition::Unchanged,
            (Cadence::Stopped, Cadence::Running { rate }) => CadenceTransition::Start { rate },
            (Cadence::Running { .. }, Cadence::Stopped) => CadenceTransition::Stop,
            (Cadence::Running { rate: old }, Cadence::Running { rate }) => {
                if old == rate {
                    CadenceTransition::Unchanged
                } else {
                    CadenceTransition::Restart { rate }
                }
            }
        }
    }
}

/// A repeating timer driven by explicit time steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u64,
    elapsed_ms: u64,
    running: bool,
    starts: u32,
}

impl IntervalTimer {
    /// A stopped timer with the given period
    pub fn new(interval_ms: u64) -> Self {
        IntervalTimer {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: false,
            starts: 0,
        }
    }

    /// A running timer with the given period
    pub fn started(interval_ms: u64) -> Self {
        let mut timer = Self::new(interval_ms);
        timer.start();
        timer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// How many times the timer has been (re)started
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Start from a zero phase; a running timer is left alone
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.elapsed_ms = 0;
        self.starts += 1;
    }

    /// Restart from a zero phase with a new period
    pub fn restart(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
        self.running = false;
        self.start();
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    /// Time until the next fire, `None` while stopped
    pub fn time_to_fire(&self) -> Option<u64> {
        self.running.then(|| self.interval_ms - self.elapsed_ms)
    }

    /// Advance by `delta_ms`, returning how many times the timer fired
    pub fn advance(&mut self, delta_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        let total = self.elapsed_ms + delta_ms;
        self.elapsed_ms = total % self.interval_ms;
        (total / self.interval_ms) as u32
    }
}
