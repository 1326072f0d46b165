/// Simulation constants and tunable parameters for the reactive systems.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Healing pools left behind by hazard-spawning archetypes.
    pub hazard: HazardConfig,
    /// Souls released by subordinate archetypes and absorbed by commanders.
    pub soul: SoulConfig,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Seconds the hit flash stays visible after any damage call.
    pub const HIT_FLASH_DURATION: f32 = 0.1;
    /// Seconds between two burn damage ticks.
    pub const BURN_TICK_INTERVAL: f32 = 1.0;
    /// Post-armor damage never drops below this value.
    pub const MIN_HIT_DAMAGE: f32 = 1.0;
    /// `damage_modifier` of a unit that is not slowed.
    pub const NEUTRAL_DAMAGE_MODIFIER: f32 = 1.0;
    /// Damage multiplier of a critical hit.
    pub const CRIT_MULTIPLIER: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            hazard: HazardConfig::default(),
            soul: SoulConfig::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of the area hazard spawned on a qualifying death.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HazardConfig {
    /// Total lifetime of a hazard in seconds.
    pub lifetime: f32,
    /// Radius (world units) within which units are healed.
    pub radius: f32,
    /// Seconds between two heal pulses.
    pub heal_interval: f32,
    /// Fraction of each unit's max health restored per pulse.
    pub heal_percent: f32,
}

impl HazardConfig {
    pub const DEFAULT_LIFETIME: f32 = 4.0;
    pub const DEFAULT_RADIUS: f32 = 80.0;
    pub const DEFAULT_HEAL_INTERVAL: f32 = 0.5;
    pub const DEFAULT_HEAL_PERCENT: f32 = 0.02;
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            lifetime: Self::DEFAULT_LIFETIME,
            radius: Self::DEFAULT_RADIUS,
            heal_interval: Self::DEFAULT_HEAL_INTERVAL,
            heal_percent: Self::DEFAULT_HEAL_PERCENT,
        }
    }
}

/// Parameters of the soul transfer from a dying subordinate to a commander.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoulConfig {
    /// Maximum distance between the death and a commander for a soul to spawn.
    pub search_radius: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// A soul closer than this to its target has arrived.
    pub arrive_distance: f32,
    /// Arrival is forced once a soul has travelled this long.
    pub max_travel_time: f32,
    /// Fraction of the commander's max health restored on arrival.
    pub heal_percent: f32,
}

impl SoulConfig {
    pub const DEFAULT_SEARCH_RADIUS: f32 = 220.0;
    pub const DEFAULT_SPEED: f32 = 260.0;
    pub const DEFAULT_ARRIVE_DISTANCE: f32 = 8.0;
    pub const DEFAULT_MAX_TRAVEL_TIME: f32 = 1.5;
    pub const DEFAULT_HEAL_PERCENT: f32 = 0.1;
}

impl Default for SoulConfig {
    fn default() -> Self {
        Self {
            search_radius: Self::DEFAULT_SEARCH_RADIUS,
            speed: Self::DEFAULT_SPEED,
            arrive_distance: Self::DEFAULT_ARRIVE_DISTANCE,
            max_travel_time: Self::DEFAULT_MAX_TRAVEL_TIME,
            heal_percent: Self::DEFAULT_HEAL_PERCENT,
        }
    }
}
