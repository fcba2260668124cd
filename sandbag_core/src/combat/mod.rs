//! Combat loop - punch resolution, poison, minion volleys and the damage meter
//!
//! Everything here is numeric: functions take the aggregate stats and an RNG
//! and report what happened. The session applies the damage.

mod meter;
mod minion;
mod poison;
mod resolution;
mod result;

pub use meter::DamageMeter;
pub use minion::{MinionVolley, SkeletonArcher};
pub use poison::{PoisonInstance, PoisonTracker};
pub(crate) use resolution::ceil_damage;
pub use resolution::{poison_duration_ms, resolve_punch, PunchContext};
pub use result::{HitOutcome, PoisonApplication};
