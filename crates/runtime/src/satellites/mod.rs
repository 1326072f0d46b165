//! Reactive systems driven by unit deaths.
//!
//! A satellite subscribes to `unit-died` on the shared [`EventBus`] and reacts
//! to deaths of the archetypes it cares about. Handlers run inline on the
//! emitting call stack, where only the dying unit is reachable, so they merely
//! queue a [`DeathRecord`]. The actual work (spawning hazards, steering souls,
//! healing other units) happens in [`Satellite::update`], which receives the
//! whole roster.
//!
//! # Execution Order
//!
//! Satellites are updated in ascending [`Satellite::priority`] once per tick,
//! after every unit has been updated.

mod hazard;
mod soul;

pub use hazard::{Hazard, HazardSystem};
pub use soul::{Soul, SoulHarvestSystem};

use std::cell::RefCell;
use std::rc::Rc;

use defense_core::{Archetype, Event, EventBus, EventKind, Position, SubscriptionToken, Unit, UnitId};

/// Snapshot of a qualifying death, taken inside the event handler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathRecord {
    pub unit: UnitId,
    pub archetype: Archetype,
    pub position: Position,
}

impl DeathRecord {
    pub fn of(unit: &Unit) -> Self {
        Self {
            unit: unit.id(),
            archetype: unit.archetype(),
            position: unit.position,
        }
    }
}

/// A system that reacts to unit deaths and acts on other units over time.
pub trait Satellite {
    /// Returns a human-readable name (used in logging and lookup).
    fn name(&self) -> &'static str;

    /// Lower values update first.
    fn priority(&self) -> i32 {
        0
    }

    /// Subscribes to `unit-died` on `bus`, replacing any earlier subscription.
    fn attach(&mut self, bus: &EventBus);

    /// Drops the subscription. Safe to call when not attached.
    fn detach(&mut self, bus: &EventBus);

    /// Processes queued deaths and advances live effects by `dt` seconds.
    fn update(&mut self, dt: f32, units: &mut [Unit]);

    /// Number of effects (hazards, souls) currently live.
    fn active_effects(&self) -> usize;

    /// Discards queued deaths and live effects.
    fn reset(&mut self);
}

/// Queue of deaths shared between a bus handler and its satellite.
#[derive(Clone, Debug, Default)]
pub(crate) struct DeathQueue {
    records: Rc<RefCell<Vec<DeathRecord>>>,
}

impl DeathQueue {
    /// Subscribes a handler that queues every death accepted by `filter`.
    pub(crate) fn subscribe(
        &self,
        bus: &EventBus,
        satellite: &'static str,
        filter: fn(Archetype) -> bool,
    ) -> SubscriptionToken {
        let records = Rc::clone(&self.records);
        bus.subscribe(EventKind::UnitDied, move |event| {
            if let Event::UnitDied { unit } = event
                && filter(unit.archetype())
            {
                tracing::trace!(satellite, unit = %unit.id(), "death queued");
                records.borrow_mut().push(DeathRecord::of(unit));
            }
        })
    }

    /// Takes every queued record. Each record is returned exactly once.
    pub(crate) fn drain(&self) -> Vec<DeathRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    pub(crate) fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub(crate) fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

/// Index of the unit with `id` in `units`.
pub(crate) fn find_unit(units: &[Unit], id: UnitId) -> Option<usize> {
    units.iter().position(|unit| unit.id() == id)
}

/// True for units that can still be healed or targeted.
pub(crate) fn is_active(unit: &Unit) -> bool {
    unit.is_alive() && unit.is_in_play()
}
