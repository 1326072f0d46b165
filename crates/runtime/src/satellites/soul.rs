//! Souls released by subordinate deaths and absorbed by nearby commanders.

use defense_core::{Archetype, EventBus, Position, SoulConfig, SubscriptionToken, Unit, UnitId};

use super::{DeathQueue, DeathRecord, Satellite, find_unit, is_active};

/// A soul travelling from a death location to its commander.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Soul {
    pub position: Position,
    pub target: UnitId,
    /// Unit whose death released the soul.
    pub source: UnitId,
    /// Seconds in flight.
    pub elapsed: f32,
}

/// What happened to a soul during one step.
enum Flight {
    InFlight,
    Arrived,
    Lost,
}

/// Heals a commander whenever one of its subordinates dies nearby.
///
/// Each qualifying death releases at most one soul, aimed at the nearest
/// living commander within the search radius. The soul heals its target on
/// arrival, or is discarded if the target dies or leaves play first.
#[derive(Debug, Default)]
pub struct SoulHarvestSystem {
    config: SoulConfig,
    queue: DeathQueue,
    token: Option<SubscriptionToken>,
    souls: Vec<Soul>,
}

impl SoulHarvestSystem {
    pub const NAME: &'static str = "soul_harvest";

    pub fn new(config: SoulConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SoulConfig {
        &self.config
    }

    pub fn souls(&self) -> &[Soul] {
        &self.souls
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Nearest active commander within the search radius of `origin`.
    fn nearest_commander(&self, origin: Position, units: &[Unit]) -> Option<UnitId> {
        units
            .iter()
            .filter(|unit| is_active(unit) && unit.archetype().is_soul_target())
            .map(|unit| (unit.id(), origin.distance(unit.position)))
            .filter(|(_, distance)| *distance <= self.config.search_radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(id, _)| id)
    }

    fn release(&mut self, record: DeathRecord, units: &[Unit]) {
        match self.nearest_commander(record.position, units) {
            Some(target) => {
                tracing::debug!(source = %record.unit, %target, "soul released");
                self.souls.push(Soul {
                    position: record.position,
                    target,
                    source: record.unit,
                    elapsed: 0.0,
                });
            }
            None => {
                tracing::trace!(source = %record.unit, "no commander in range");
            }
        }
    }

    fn fly(config: &SoulConfig, soul: &mut Soul, dt: f32, units: &mut [Unit]) -> Flight {
        let Some(index) = find_unit(units, soul.target) else {
            return Flight::Lost;
        };
        let target = &mut units[index];
        if !is_active(target) {
            return Flight::Lost;
        }

        soul.elapsed += dt;
        soul.position = soul
            .position
            .move_towards(target.position, config.speed * dt);

        let arrived = soul.position.distance(target.position) < config.arrive_distance
            || soul.elapsed >= config.max_travel_time;
        if !arrived {
            return Flight::InFlight;
        }

        let healed = target.heal(target.max_health() * config.heal_percent);
        tracing::debug!(target = %soul.target, healed, "soul absorbed");
        Flight::Arrived
    }
}

impl Satellite for SoulHarvestSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        10
    }

    fn attach(&mut self, bus: &EventBus) {
        self.detach(bus);
        self.token = Some(
            self.queue
                .subscribe(bus, Self::NAME, Archetype::is_soul_source),
        );
    }

    fn detach(&mut self, bus: &EventBus) {
        if let Some(token) = self.token.take() {
            bus.unsubscribe(token);
        }
    }

    fn update(&mut self, dt: f32, units: &mut [Unit]) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for record in self.queue.drain() {
            self.release(record, units);
        }

        let config = self.config;
        self.souls.retain_mut(|soul| match Self::fly(&config, soul, dt, units) {
            Flight::InFlight => true,
            Flight::Arrived => false,
            Flight::Lost => {
                tracing::debug!(target = %soul.target, "soul target lost; discarding");
                false
            }
        });
    }

    fn active_effects(&self) -> usize {
        self.souls.len()
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.souls.clear();
    }
}
