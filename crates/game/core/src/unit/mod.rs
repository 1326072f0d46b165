//! Units and their health / status model.
//!
//! A [`Unit`] is the single source of truth for one enemy's health and timed
//! status effects. Units are owned by the simulation driver; the combat core
//! and the reactive systems only ever borrow them.
//!
//! # State machine
//!
//! ```text
//! Alive ──apply_damage (health ≤ 0)──▶ Dead   (emits unit-died exactly once)
//! ```
//!
//! Dead is terminal. Further damage is accepted (health stays clamped at 0,
//! the hit flash still fires) but never emits again: the guard is an explicit
//! notification flag, not a health check.

mod archetype;

pub use archetype::{Archetype, ArchetypeRoles};

use std::fmt;

use crate::combat::{
    DamageOutcome, DamageSource, StatusApplication, StatusEffect, StatusKind, StatusSet,
    calculate_damage,
};
use crate::config::GameConfig;
use crate::events::{Event, EventBus};

/// Unique identifier of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World position in continuous coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves up to `step` units towards `target`, never overshooting it.
    pub fn move_towards(self, target: Position, step: f32) -> Position {
        let distance = self.distance(target);
        if distance <= step || distance <= f32::EPSILON {
            return target;
        }
        let t = step / distance;
        Position::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// One enemy unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    archetype: Archetype,
    pub position: Position,
    current_health: f32,
    max_health: f32,
    armor: f32,
    damage_modifier: f32,
    statuses: StatusSet,
    hit_flash_timer: f32,
    killed_by: Option<DamageSource>,
    death_notified: bool,
    in_play: bool,
}

impl Unit {
    /// Creates a unit at full health, with no armor, at the origin.
    pub fn new(id: UnitId, archetype: Archetype, max_health: f32) -> Self {
        let max_health = if max_health.is_finite() {
            max_health.max(0.0)
        } else {
            0.0
        };
        Self {
            id,
            archetype,
            position: Position::ORIGIN,
            current_health: max_health,
            max_health,
            armor: 0.0,
            damage_modifier: GameConfig::NEUTRAL_DAMAGE_MODIFIER,
            statuses: StatusSet::new(),
            hit_flash_timer: 0.0,
            killed_by: None,
            death_notified: false,
            in_play: true,
        }
    }

    #[must_use]
    pub fn with_armor(mut self, armor: f32) -> Self {
        self.armor = armor.max(0.0);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn armor(&self) -> f32 {
        self.armor
    }

    /// Multiplier applied to incoming damage before armor.
    pub fn damage_modifier(&self) -> f32 {
        self.damage_modifier
    }

    pub fn statuses(&self) -> &StatusSet {
        &self.statuses
    }

    pub fn status(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.statuses.get(kind)
    }

    pub fn hit_flash_timer(&self) -> f32 {
        self.hit_flash_timer
    }

    /// Source of the lethal hit, recorded once on the alive→dead transition.
    pub fn killed_by(&self) -> Option<DamageSource> {
        self.killed_by
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    /// False once the driver took the unit off the board (goal reached, despawned).
    pub fn is_in_play(&self) -> bool {
        self.in_play
    }

    pub fn leave_play(&mut self) {
        self.in_play = false;
    }

    /// Fraction of base movement speed left after slows.
    pub fn speed_multiplier(&self) -> f32 {
        match self.statuses.get(StatusKind::Slow) {
            Some(slow) => 1.0 - slow.power.clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Applies one damage instance.
    ///
    /// See [`calculate_damage`] for the formula. The hit flash is reset on every
    /// call, alive or not. The call that takes health from above zero to zero
    /// records `source` as the killer and emits [`Event::UnitDied`].
    pub fn apply_damage(
        &mut self,
        amount: f32,
        source: Option<DamageSource>,
        bus: &EventBus,
    ) -> DamageOutcome {
        self.hit_flash_timer = GameConfig::HIT_FLASH_DURATION;

        let effective = calculate_damage(amount, self.damage_modifier, self.armor);
        let before = self.current_health;
        self.current_health = (before - effective).max(0.0);
        let dealt = before - self.current_health;

        let crossed = before > 0.0 && self.current_health <= 0.0;
        if !crossed || self.death_notified {
            return DamageOutcome {
                dealt,
                killed: false,
            };
        }

        self.death_notified = true;
        self.killed_by = source;
        tracing::debug!(
            unit = %self.id,
            archetype = %self.archetype,
            killed_by = ?source,
            "unit died"
        );
        bus.emit(&Event::UnitDied { unit: &*self });

        DamageOutcome {
            dealt,
            killed: true,
        }
    }

    /// Applies a timed status effect.
    ///
    /// An existing effect of the same kind is only replaced by one at least as
    /// strong. For `slow`, `damage_modifier_override` is written to the unit's
    /// damage modifier exactly when the application is accepted. Dead units
    /// ignore statuses.
    pub fn apply_status(
        &mut self,
        kind: StatusKind,
        duration: f32,
        power: f32,
        damage_modifier_override: Option<f32>,
    ) -> StatusApplication {
        if !self.is_alive() {
            tracing::trace!(unit = %self.id, status = %kind, "status on dead unit ignored");
            return StatusApplication::Ignored;
        }

        let outcome = self.statuses.apply(kind, duration, power);
        if kind == StatusKind::Slow
            && outcome.is_accepted()
            && let Some(modifier) = damage_modifier_override
        {
            self.damage_modifier = modifier;
        }
        outcome
    }

    /// Advances statuses and the hit flash by `dt` seconds.
    ///
    /// Burn ticks that elapsed are applied as damage (and may kill). Once no
    /// slow remains the damage modifier returns to neutral; replacing a slow
    /// never resets it.
    pub fn update(&mut self, dt: f32, bus: &EventBus) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let tick = self.statuses.advance(dt);
        for _ in 0..tick.burn_hits {
            self.apply_damage(
                tick.burn_power,
                Some(DamageSource::Status(StatusKind::Burn)),
                bus,
            );
        }

        if !self.statuses.contains(StatusKind::Slow) {
            self.damage_modifier = GameConfig::NEUTRAL_DAMAGE_MODIFIER;
        }
        self.hit_flash_timer = (self.hit_flash_timer - dt).max(0.0);
    }

    /// Restores up to `amount` health, clamped to max. Returns the amount healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current_health;
        self.current_health = (before + amount).min(self.max_health);
        self.current_health - before
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::combat::WeaponId;
    use crate::events::EventKind;

    fn death_counter(bus: &EventBus) -> Rc<Cell<u32>> {
        let deaths = Rc::new(Cell::new(0));
        let seen = Rc::clone(&deaths);
        bus.subscribe(EventKind::UnitDied, move |_| seen.set(seen.get() + 1));
        deaths
    }

    fn grunt(health: f32) -> Unit {
        Unit::new(UnitId(1), Archetype::Grunt, health)
    }

    #[test]
    fn death_is_notified_exactly_once() {
        let bus = EventBus::new();
        let deaths = death_counter(&bus);
        let mut unit = grunt(30.0);

        assert!(!unit.apply_damage(20.0, None, &bus).killed);
        assert!(unit.apply_damage(20.0, None, &bus).killed);
        for _ in 0..5 {
            assert!(!unit.apply_damage(50.0, None, &bus).killed);
        }

        assert_eq!(deaths.get(), 1);
        assert_eq!(unit.current_health(), 0.0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn lethal_burn_tick_notifies_once() {
        let bus = EventBus::new();
        let deaths = death_counter(&bus);
        let mut unit = grunt(100.0);
        unit.apply_damage(89.0, None, &bus);
        assert_eq!(unit.current_health(), 11.0);

        unit.apply_status(StatusKind::Burn, 5.0, 10.0, None);
        unit.update(1.0, &bus);
        assert_eq!(unit.current_health(), 1.0);
        assert_eq!(deaths.get(), 0);

        unit.update(1.0, &bus);
        assert!(!unit.is_alive());
        assert_eq!(deaths.get(), 1);
        assert_eq!(
            unit.killed_by(),
            Some(DamageSource::Status(StatusKind::Burn))
        );

        unit.update(1.0, &bus);
        assert_eq!(deaths.get(), 1);
    }

    #[test]
    fn killed_by_is_set_once() {
        let bus = EventBus::new();
        let mut unit = grunt(5.0);
        let first = Some(DamageSource::Weapon(WeaponId(1)));
        unit.apply_damage(10.0, first, &bus);
        unit.apply_damage(10.0, Some(DamageSource::Weapon(WeaponId(2))), &bus);
        assert_eq!(unit.killed_by(), first);
    }

    #[test]
    fn heavy_armor_still_takes_one_damage() {
        let bus = EventBus::new();
        let mut unit = grunt(10.0).with_armor(500.0);
        let outcome = unit.apply_damage(4.0, None, &bus);
        assert_eq!(outcome.dealt, 1.0);
        assert_eq!(unit.current_health(), 9.0);
    }

    #[test]
    fn hit_flash_resets_on_every_call() {
        let bus = EventBus::new();
        let mut unit = grunt(1.0);
        unit.apply_damage(5.0, None, &bus);
        unit.update(1.0, &bus);
        assert_eq!(unit.hit_flash_timer(), 0.0);

        unit.apply_damage(5.0, None, &bus);
        assert_eq!(unit.hit_flash_timer(), GameConfig::HIT_FLASH_DURATION);
    }

    #[test]
    fn strongest_slow_governs_power_and_modifier() {
        let mut unit = grunt(100.0);
        unit.apply_status(StatusKind::Slow, 2.0, 0.2, Some(1.1));
        unit.apply_status(StatusKind::Slow, 2.0, 0.5, Some(1.2));
        let third = unit.apply_status(StatusKind::Slow, 2.0, 0.3, Some(1.15));

        assert_eq!(third, StatusApplication::Ignored);
        assert_eq!(unit.status(StatusKind::Slow).map(|s| s.power), Some(0.5));
        assert_eq!(unit.damage_modifier(), 1.2);
        assert_eq!(unit.speed_multiplier(), 0.5);
    }

    #[test]
    fn modifier_amplifies_damage_while_slowed() {
        let bus = EventBus::new();
        let mut unit = grunt(100.0).with_armor(2.0);
        unit.apply_status(StatusKind::Slow, 2.0, 0.4, Some(1.5));
        unit.apply_damage(10.0, None, &bus);
        // 10 × 1.5 - 2
        assert_eq!(unit.current_health(), 87.0);
    }

    #[test]
    fn modifier_resets_only_on_slow_expiry() {
        let bus = EventBus::new();
        let mut unit = grunt(100.0);
        unit.apply_status(StatusKind::Slow, 1.0, 0.3, Some(1.25));
        unit.apply_status(StatusKind::Slow, 2.0, 0.3, None);
        assert_eq!(unit.damage_modifier(), 1.25);

        unit.update(1.5, &bus);
        assert_eq!(unit.damage_modifier(), 1.25);

        unit.update(0.5, &bus);
        assert!(unit.status(StatusKind::Slow).is_none());
        assert_eq!(unit.damage_modifier(), 1.0);
    }

    #[test]
    fn dead_units_ignore_statuses() {
        let bus = EventBus::new();
        let mut unit = grunt(1.0);
        unit.apply_damage(1.0, None, &bus);
        let outcome = unit.apply_status(StatusKind::Slow, 2.0, 0.9, Some(3.0));
        assert_eq!(outcome, StatusApplication::Ignored);
        assert!(unit.statuses().is_empty());
    }

    #[test]
    fn heal_is_clamped_and_skips_dead_units() {
        let bus = EventBus::new();
        let mut unit = grunt(50.0);
        assert_eq!(unit.heal(10.0), 0.0);

        unit.apply_damage(20.0, None, &bus);
        assert_eq!(unit.heal(100.0), 20.0);
        assert_eq!(unit.current_health(), 50.0);

        unit.apply_damage(100.0, None, &bus);
        assert_eq!(unit.heal(10.0), 0.0);
        assert_eq!(unit.current_health(), 0.0);
    }

    #[test]
    fn nan_damage_never_poisons_health() {
        let bus = EventBus::new();
        let mut unit = grunt(10.0);
        unit.apply_damage(f32::NAN, None, &bus);
        assert_eq!(unit.current_health(), 9.0);
        unit.update(f32::NAN, &bus);
        assert!(!unit.current_health().is_nan());
    }

    #[test]
    fn move_towards_never_overshoots() {
        let start = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);
        assert_eq!(start.move_towards(target, 10.0), target);
        let halfway = start.move_towards(target, 2.5);
        assert!((halfway.distance(target) - 2.5).abs() < 1e-5);
    }
}
