//! Reference driver owning the bus, the unit roster and the satellites.
//!
//! One [`Simulation::tick`] runs to completion before the next starts:
//!
//! ```text
//! units.update(dt)        statuses, burn ticks (may emit unit-died)
//! satellites.update(dt)   queued deaths → hazards / souls, heals
//! reap                    drop dead and out-of-play units, pay bounties
//! ```
//!
//! Damage dealt between ticks (projectile hits) goes through
//! [`Simulation::deal_damage`] and friends; the resulting deaths are picked up
//! by the satellites on the next tick.

use defense_core::{
    Archetype, DamageOutcome, DamageSource, Event, EventBus, GameConfig, Hit,
    MergedModifierResult, Position, StatusApplication, StatusKind, Unit, UnitId, apply_hit,
};

use crate::error::{Result, RuntimeError};
use crate::satellites::{HazardSystem, Satellite, SoulHarvestSystem};

/// Starting money of a fresh session.
pub const DEFAULT_STARTING_MONEY: i64 = 100;
/// Starting lives of a fresh session.
pub const DEFAULT_STARTING_LIVES: i32 = 20;

/// What one tick removed from the roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Dead units reaped this tick.
    pub killed: usize,
    /// Units that left play (e.g. reached the goal) and were removed.
    pub escaped: usize,
    /// Money awarded for the killed units.
    pub bounty: i64,
}

pub struct Simulation {
    bus: EventBus,
    config: GameConfig,
    units: Vec<Unit>,
    satellites: Vec<Box<dyn Satellite>>,
    next_id: u32,
    money: i64,
    lives: i32,
    wave: u32,
    starting_money: i64,
    starting_lives: i32,
}

impl Simulation {
    /// Creates a session with the default satellites attached.
    pub fn new(config: GameConfig) -> Result<Self> {
        validate_config(&config)?;

        let satellites: Vec<Box<dyn Satellite>> = vec![
            Box::new(HazardSystem::new(config.hazard)),
            Box::new(SoulHarvestSystem::new(config.soul)),
        ];
        let mut simulation = Self {
            bus: EventBus::new(),
            config,
            units: Vec::new(),
            satellites: Vec::new(),
            next_id: 0,
            money: DEFAULT_STARTING_MONEY,
            lives: DEFAULT_STARTING_LIVES,
            wave: 0,
            starting_money: DEFAULT_STARTING_MONEY,
            starting_lives: DEFAULT_STARTING_LIVES,
        };
        for satellite in satellites {
            simulation.add_satellite(satellite);
        }
        Ok(simulation)
    }

    /// Overrides the starting economy. Applies immediately and on [`reset`](Self::reset).
    #[must_use]
    pub fn with_economy(mut self, money: i64, lives: i32) -> Self {
        self.starting_money = money;
        self.starting_lives = lives;
        self.money = money;
        self.lives = lives;
        self
    }

    /// Attaches `satellite` to the bus and keeps the update order sorted by priority.
    pub fn add_satellite(&mut self, mut satellite: Box<dyn Satellite>) {
        satellite.attach(&self.bus);
        tracing::debug!(satellite = satellite.name(), "satellite attached");
        self.satellites.push(satellite);
        self.satellites.sort_by_key(|s| s.priority());
    }

    /// Detaches and removes the satellite called `name`.
    pub fn remove_satellite(&mut self, name: &str) -> Option<Box<dyn Satellite>> {
        let index = self.satellites.iter().position(|s| s.name() == name)?;
        let mut satellite = self.satellites.remove(index);
        satellite.detach(&self.bus);
        Some(satellite)
    }

    pub fn satellite(&self, name: &str) -> Option<&dyn Satellite> {
        self.satellites
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// Live hazards and souls across all satellites.
    pub fn active_effects(&self) -> usize {
        self.satellites.iter().map(|s| s.active_effects()).sum()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id() == id)
    }

    fn require(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.units
            .iter_mut()
            .find(|unit| unit.id() == id)
            .ok_or(RuntimeError::UnitNotFound { id })
    }

    fn next_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawns an unarmored unit at full health.
    pub fn spawn(&mut self, archetype: Archetype, max_health: f32, position: Position) -> UnitId {
        self.spawn_with(|id| Unit::new(id, archetype, max_health).with_position(position))
    }

    /// Spawns a unit built by `build` from a freshly allocated id.
    ///
    /// The id passed to `build` is the one the unit must carry.
    pub fn spawn_with(&mut self, build: impl FnOnce(UnitId) -> Unit) -> UnitId {
        let id = self.next_id();
        let unit = build(id);
        debug_assert_eq!(unit.id(), id);
        tracing::trace!(unit = %id, archetype = %unit.archetype(), "unit spawned");
        self.units.push(unit);
        id
    }

    pub fn deal_damage(
        &mut self,
        id: UnitId,
        amount: f32,
        source: Option<DamageSource>,
    ) -> Result<DamageOutcome> {
        let bus = self.bus.clone();
        Ok(self.require(id)?.apply_damage(amount, source, &bus))
    }

    /// Lands one projectile carrying a merged card bundle on `id`.
    pub fn apply_hit(
        &mut self,
        id: UnitId,
        hit: Hit,
        merged: &MergedModifierResult,
    ) -> Result<DamageOutcome> {
        let bus = self.bus.clone();
        Ok(apply_hit(self.require(id)?, hit, merged, &bus))
    }

    pub fn apply_status(
        &mut self,
        id: UnitId,
        kind: StatusKind,
        duration: f32,
        power: f32,
        damage_modifier_override: Option<f32>,
    ) -> Result<StatusApplication> {
        Ok(self
            .require(id)?
            .apply_status(kind, duration, power, damage_modifier_override))
    }

    /// Takes a unit off the board at the goal and costs one life.
    ///
    /// Dead units cannot leak. The unit is removed on the next tick.
    pub fn reach_goal(&mut self, id: UnitId) -> Result<()> {
        let unit = self.require(id)?;
        if !unit.is_alive() || !unit.is_in_play() {
            return Ok(());
        }
        unit.leave_play();
        self.lives -= 1;
        tracing::debug!(unit = %id, lives = self.lives, "unit reached the goal");
        self.bus.emit(&Event::LivesChanged { lives: self.lives });
        Ok(())
    }

    pub fn start_wave(&mut self) -> u32 {
        self.wave += 1;
        tracing::info!(wave = self.wave, "wave started");
        self.bus.emit(&Event::WaveStarted { wave: self.wave });
        self.wave
    }

    pub fn complete_wave(&mut self) {
        tracing::info!(wave = self.wave, "wave completed");
        self.bus.emit(&Event::WaveCompleted { wave: self.wave });
    }

    /// Advances the whole simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        for unit in &mut self.units {
            unit.update(dt, &self.bus);
        }
        for satellite in &mut self.satellites {
            satellite.update(dt, &mut self.units);
        }
        self.reap()
    }

    fn reap(&mut self) -> TickReport {
        let mut report = TickReport::default();
        self.units.retain(|unit| {
            if !unit.is_alive() {
                report.killed += 1;
                report.bounty += i64::from(unit.archetype().bounty());
                false
            } else if !unit.is_in_play() {
                report.escaped += 1;
                false
            } else {
                true
            }
        });

        if report.bounty > 0 {
            self.money += report.bounty;
            self.bus.emit(&Event::MoneyChanged { money: self.money });
        }
        report
    }

    /// Starts a fresh session.
    ///
    /// Every bus subscription is dropped, external ones included; the
    /// satellites are then reset and reattached.
    pub fn reset(&mut self) {
        self.bus.clear();
        self.units.clear();
        self.next_id = 0;
        self.money = self.starting_money;
        self.lives = self.starting_lives;
        self.wave = 0;
        for satellite in &mut self.satellites {
            satellite.reset();
            satellite.attach(&self.bus);
        }
        tracing::info!("simulation reset");
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("units", &self.units.len())
            .field(
                "satellites",
                &self.satellites.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("money", &self.money)
            .field("lives", &self.lives)
            .field("wave", &self.wave)
            .finish()
    }
}

/// Rejects configurations the satellites cannot run with.
pub fn validate_config(config: &GameConfig) -> Result<()> {
    let hazard = &config.hazard;
    let soul = &config.soul;
    let non_negative = [
        ("hazard.lifetime", hazard.lifetime),
        ("hazard.radius", hazard.radius),
        ("hazard.heal_percent", hazard.heal_percent),
        ("soul.search_radius", soul.search_radius),
        ("soul.arrive_distance", soul.arrive_distance),
        ("soul.heal_percent", soul.heal_percent),
    ];
    let positive = [
        ("hazard.heal_interval", hazard.heal_interval),
        ("soul.speed", soul.speed),
        ("soul.max_travel_time", soul.max_travel_time),
    ];

    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(RuntimeError::InvalidConfig { field, value });
        }
    }
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(RuntimeError::InvalidConfig { field, value });
        }
    }
    Ok(())
}
