//! Damage calculation.

use std::fmt;

use crate::config::GameConfig;

use super::status::StatusKind;

/// Identifier of a weapon (tower) that dealt damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponId(pub u32);

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weapon#{}", self.0)
    }
}

/// Where a damage instance came from.
///
/// Recorded as `killed_by` on the unit when the instance is lethal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    /// Direct hit from a weapon.
    Weapon(WeaponId),
    /// Periodic damage from a status effect.
    Status(StatusKind),
    /// Area effect with no owning weapon.
    Hazard,
}

/// Result of a single damage application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed (post clamp).
    pub dealt: f32,
    /// True only for the call that moved the unit from alive to dead.
    pub killed: bool,
}

impl DamageOutcome {
    pub const NONE: Self = Self {
        dealt: 0.0,
        killed: false,
    };
}

/// Calculate effective damage of one hit.
///
/// # Formula
///
/// ```text
/// effective = max(MIN_HIT_DAMAGE, amount × damage_modifier - armor)
/// ```
///
/// The damage modifier is applied before armor, and a hit always deals at least
/// [`GameConfig::MIN_HIT_DAMAGE`], no matter how much armor the target has.
/// A NaN intermediate (e.g. infinite armor against infinite damage) collapses
/// to the minimum.
pub fn calculate_damage(amount: f32, damage_modifier: f32, armor: f32) -> f32 {
    let raw = amount * damage_modifier - armor;
    if raw.is_nan() {
        GameConfig::MIN_HIT_DAMAGE
    } else {
        raw.max(GameConfig::MIN_HIT_DAMAGE)
    }
}
