//! Applying a weapon hit with its merged card bundle.

use crate::cards::{EffectDescriptor, EffectTag, MergedModifierResult};
use crate::config::GameConfig;
use crate::events::EventBus;
use crate::unit::Unit;

use super::damage::{DamageOutcome, DamageSource};
use super::status::StatusKind;

/// One projectile landing on one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Weapon damage before card modifiers.
    pub base_damage: f32,
    pub source: DamageSource,
    /// Uniform roll in `[0, 1)`; the hit crits when it is below the crit chance.
    pub crit_roll: f32,
}

impl Hit {
    pub fn new(base_damage: f32, source: DamageSource) -> Self {
        Self {
            base_damage,
            source,
            crit_roll: 1.0,
        }
    }

    #[must_use]
    pub fn with_crit_roll(mut self, roll: f32) -> Self {
        self.crit_roll = roll;
        self
    }
}

/// Pre-armor damage of `hit` under `merged`.
pub fn hit_damage(hit: &Hit, merged: &MergedModifierResult) -> f32 {
    let damage = merged.modifiers.damage_for(hit.base_damage);
    if hit.crit_roll < merged.modifiers.crit_chance() {
        damage * GameConfig::CRIT_MULTIPLIER
    } else {
        damage
    }
}

/// Applies `hit` to `target`, then its on-hit statuses.
///
/// Damage goes through [`Unit::apply_damage`], so the target's current damage
/// modifier (set by an earlier slow) already amplifies it. A target that
/// survives then receives the bundle's `slow` and `burn` effects; the slow
/// carries its `damage_to_slowed` as the new damage modifier.
pub fn apply_hit(
    target: &mut Unit,
    hit: Hit,
    merged: &MergedModifierResult,
    bus: &EventBus,
) -> DamageOutcome {
    let outcome = target.apply_damage(hit_damage(&hit, merged), Some(hit.source), bus);
    if !target.is_alive() {
        return outcome;
    }

    if let Some(EffectDescriptor::Slow {
        duration,
        power,
        damage_to_slowed,
    }) = merged.effect(EffectTag::Slow)
    {
        target.apply_status(StatusKind::Slow, *duration, *power, *damage_to_slowed);
    }
    if let Some(EffectDescriptor::Burn {
        duration,
        damage_per_tick,
    }) = merged.effect(EffectTag::Burn)
    {
        target.apply_status(StatusKind::Burn, *duration, *damage_per_tick, None);
    }
    outcome
}
