//! Healing pools left behind by hazard-spawning archetypes.

use defense_core::{Archetype, EventBus, HazardConfig, Position, SubscriptionToken, Unit, UnitId};

use super::{DeathQueue, Satellite, is_active};

/// A timed, positioned healing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hazard {
    pub position: Position,
    pub radius: f32,
    /// Seconds of lifetime left; removed once this reaches zero.
    pub remaining: f32,
    /// Unit whose death spawned the hazard.
    pub source: UnitId,
    pulse_timer: f32,
}

impl Hazard {
    fn new(position: Position, source: UnitId, config: &HazardConfig) -> Self {
        Self {
            position,
            radius: config.radius,
            remaining: config.lifetime,
            source,
            pulse_timer: 0.0,
        }
    }

    /// Advances the lifetime and returns the number of heal pulses due.
    ///
    /// Only the part of `dt` the hazard was actually alive for counts towards
    /// pulses.
    fn advance(&mut self, dt: f32, interval: f32) -> u32 {
        let alive = dt.min(self.remaining.max(0.0));
        self.remaining -= dt;
        if interval <= 0.0 {
            return 0;
        }
        self.pulse_timer += alive;
        let pulses = (self.pulse_timer / interval).floor();
        self.pulse_timer -= pulses * interval;
        pulses as u32
    }

    pub fn contains(&self, position: Position) -> bool {
        self.position.distance(position) <= self.radius
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Spawns a [`Hazard`] where a hazard-spawning unit died and runs its heal
/// pulses.
///
/// Overlapping hazards are independent: a unit inside two of them is healed by
/// both.
#[derive(Debug, Default)]
pub struct HazardSystem {
    config: HazardConfig,
    queue: DeathQueue,
    token: Option<SubscriptionToken>,
    hazards: Vec<Hazard>,
}

impl HazardSystem {
    pub const NAME: &'static str = "hazard";

    pub fn new(config: HazardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &HazardConfig {
        &self.config
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// Deaths queued since the last update.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn heal_inside(hazard: &Hazard, pulses: u32, heal_percent: f32, units: &mut [Unit]) {
        for unit in units
            .iter_mut()
            .filter(|unit| is_active(unit) && hazard.contains(unit.position))
        {
            let amount = unit.max_health() * heal_percent * pulses as f32;
            unit.heal(amount);
        }
    }
}

impl Satellite for HazardSystem {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        0
    }

    fn attach(&mut self, bus: &EventBus) {
        self.detach(bus);
        self.token = Some(
            self.queue
                .subscribe(bus, Self::NAME, Archetype::spawns_hazard),
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
            tracing::debug!(
                unit = %record.unit,
                archetype = %record.archetype,
                x = record.position.x,
                y = record.position.y,
                "hazard spawned"
            );
            self.hazards
                .push(Hazard::new(record.position, record.unit, &self.config));
        }

        let HazardConfig {
            heal_interval,
            heal_percent,
            ..
        } = self.config;
        for hazard in &mut self.hazards {
            let pulses = hazard.advance(dt, heal_interval);
            if pulses > 0 {
                Self::heal_inside(hazard, pulses, heal_percent, units);
            }
        }
        self.hazards.retain(|hazard| !hazard.is_expired());
    }

    fn active_effects(&self) -> usize {
        self.hazards.len()
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.hazards.clear();
    }
}
