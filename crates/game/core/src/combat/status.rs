//! Timed status effects (slow, burn, ...).
//!
//! A unit carries at most one [`StatusEffect`] per [`StatusKind`]. Re-applying
//! a kind only replaces the stored effect when the incoming one is at least as
//! strong; weaker applications are ignored entirely, duration included.

use crate::config::GameConfig;

/// Kind of timed status effect.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Movement slow; power is the speed fraction removed (0..1).
    Slow,
    /// Damage over time; power is damage per burn tick.
    Burn,
}

impl StatusKind {
    /// Returns true if `incoming` should replace `current` as the governing power.
    ///
    /// Ties are accepted so a re-application refreshes the duration.
    pub fn is_stronger(self, incoming: f32, current: f32) -> bool {
        match self {
            StatusKind::Slow | StatusKind::Burn => incoming >= current,
        }
    }
}

/// A single active status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Seconds left; the effect is removed once this reaches zero.
    pub remaining: f32,
    /// Kind-specific magnitude.
    pub power: f32,
    /// Time accumulated towards the next periodic tick (burn only).
    pub tick_timer: f32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: f32, power: f32) -> Self {
        Self {
            kind,
            remaining: duration,
            power,
            tick_timer: 0.0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Outcome of a status application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplication {
    /// No effect of this kind existed; one was inserted.
    Inserted,
    /// The incoming effect was at least as strong and replaced the old one.
    Replaced,
    /// The incoming effect was weaker and was ignored.
    Ignored,
}

impl StatusApplication {
    /// Returns true if the incoming application now governs the kind.
    pub fn is_accepted(self) -> bool {
        !matches!(self, StatusApplication::Ignored)
    }
}

/// Periodic work produced while advancing statuses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusTick {
    /// Burn damage instances to apply, one entry per elapsed burn tick.
    pub burn_hits: u32,
    /// Damage of each burn instance.
    pub burn_power: f32,
    /// True if any effect expired during this tick.
    pub expired_any: bool,
}

/// Unordered set of status effects, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    effects: Vec<StatusEffect>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|effect| effect.kind == kind)
    }

    pub fn contains(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Inserts or replaces the effect for `kind` following the strength rule.
    pub fn apply(&mut self, kind: StatusKind, duration: f32, power: f32) -> StatusApplication {
        match self.effects.iter_mut().find(|effect| effect.kind == kind) {
            None => {
                self.effects.push(StatusEffect::new(kind, duration, power));
                StatusApplication::Inserted
            }
            Some(existing) if kind.is_stronger(power, existing.power) => {
                existing.power = power;
                existing.remaining = duration;
                StatusApplication::Replaced
            }
            Some(_) => StatusApplication::Ignored,
        }
    }

    /// Advances every effect by `dt` and drops the expired ones.
    ///
    /// Burn ticks are counted only for time the burn was actually alive, so an
    /// effect never fires past its duration.
    pub fn advance(&mut self, dt: f32) -> StatusTick {
        let mut tick = StatusTick::default();

        for effect in &mut self.effects {
            let alive_for = dt.min(effect.remaining.max(0.0));
            effect.remaining -= dt;

            if effect.kind == StatusKind::Burn {
                effect.tick_timer += alive_for;
                while effect.tick_timer >= GameConfig::BURN_TICK_INTERVAL {
                    effect.tick_timer -= GameConfig::BURN_TICK_INTERVAL;
                    tick.burn_hits += 1;
                    tick.burn_power = effect.power;
                }
            }
        }

        let before = self.effects.len();
        self.effects.retain(|effect| !effect.is_expired());
        tick.expired_any = self.effects.len() != before;
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weaker_application_is_ignored() {
        let mut set = StatusSet::new();
        assert_eq!(set.apply(StatusKind::Slow, 2.0, 0.5), StatusApplication::Inserted);
        assert_eq!(set.apply(StatusKind::Slow, 9.0, 0.2), StatusApplication::Ignored);

        let slow = set.get(StatusKind::Slow).copied().expect("slow present");
        assert_eq!(slow.power, 0.5);
        assert_eq!(slow.remaining, 2.0);
    }

    #[test]
    fn equal_power_refreshes_duration() {
        let mut set = StatusSet::new();
        set.apply(StatusKind::Slow, 1.0, 0.3);
        assert_eq!(set.apply(StatusKind::Slow, 3.0, 0.3), StatusApplication::Replaced);
        assert_eq!(set.get(StatusKind::Slow).map(|s| s.remaining), Some(3.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn expired_effects_are_removed() {
        let mut set = StatusSet::new();
        set.apply(StatusKind::Slow, 0.5, 0.4);
        set.apply(StatusKind::Burn, 2.0, 3.0);

        let tick = set.advance(0.5);
        assert!(tick.expired_any);
        assert!(!set.contains(StatusKind::Slow));
        assert!(set.contains(StatusKind::Burn));
    }

    #[test]
    fn burn_ticks_once_per_interval() {
        let mut set = StatusSet::new();
        set.apply(StatusKind::Burn, 3.0, 10.0);

        assert_eq!(set.advance(0.5).burn_hits, 0);
        let tick = set.advance(0.5);
        assert_eq!(tick.burn_hits, 1);
        assert_eq!(tick.burn_power, 10.0);
    }

    #[test]
    fn burn_never_ticks_past_its_duration() {
        let mut set = StatusSet::new();
        set.apply(StatusKind::Burn, 1.5, 4.0);

        // 10 seconds elapse in one step, but the burn only lived for 1.5 of them.
        let tick = set.advance(10.0);
        assert_eq!(tick.burn_hits, 1);
        assert!(set.is_empty());
    }
}
