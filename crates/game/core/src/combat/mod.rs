//! Damage and status resolution.
//!
//! - `damage`: the armor formula and damage bookkeeping types
//! - `status`: timed status effects (`slow`, `burn`) and their strength rules
//! - `hit`: one projectile landing with a merged card bundle

mod damage;
mod hit;
mod status;

pub use damage::{DamageOutcome, DamageSource, WeaponId, calculate_damage};
pub use hit::{Hit, apply_hit, hit_damage};
pub use status::{StatusApplication, StatusEffect, StatusKind, StatusSet, StatusTick};
