//! Unit archetypes and the role table that drives the reactive systems.
//!
//! Which deaths spawn a healing hazard, which deaths release a soul and which
//! units can absorb one is decided here, in one exhaustive `match`, instead of
//! string comparisons scattered across the satellites.

use bitflags::bitflags;

bitflags! {
    /// Roles an archetype plays for the death-driven satellites.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ArchetypeRoles: u8 {
        /// Leaves a healing hazard behind when it dies.
        const SPAWNS_HAZARD = 1 << 0;
        /// Subordinate: releases a soul towards a nearby commander on death.
        const SOUL_SOURCE   = 1 << 1;
        /// Commander: absorbs souls released by subordinates.
        const SOUL_TARGET   = 1 << 2;
    }
}

/// Enemy archetype.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Archetype {
    /// Baseline walker
    #[default]
    Grunt,
    /// Fast, fragile
    Runner,
    /// Slow, armored
    Brute,
    /// Leaves a healing pool on death
    Shaman,
    /// Raised minion
    Skeleton,
    /// Raised minion
    Zombie,
    /// Raises minions and feeds on their souls
    Necromancer,
    /// End-of-wave unit
    Boss,
}

impl Archetype {
    /// Role table for the reactive systems.
    pub const fn roles(self) -> ArchetypeRoles {
        match self {
            Archetype::Grunt | Archetype::Runner | Archetype::Brute | Archetype::Boss => {
                ArchetypeRoles::empty()
            }
            Archetype::Shaman => ArchetypeRoles::SPAWNS_HAZARD,
            Archetype::Skeleton | Archetype::Zombie => ArchetypeRoles::SOUL_SOURCE,
            Archetype::Necromancer => ArchetypeRoles::SOUL_TARGET,
        }
    }

    pub const fn spawns_hazard(self) -> bool {
        self.roles().contains(ArchetypeRoles::SPAWNS_HAZARD)
    }

    pub const fn is_soul_source(self) -> bool {
        self.roles().contains(ArchetypeRoles::SOUL_SOURCE)
    }

    pub const fn is_soul_target(self) -> bool {
        self.roles().contains(ArchetypeRoles::SOUL_TARGET)
    }

    /// Money awarded when a unit of this archetype is killed.
    pub const fn bounty(self) -> u32 {
        match self {
            Archetype::Grunt => 5,
            Archetype::Runner => 4,
            Archetype::Brute => 12,
            Archetype::Shaman => 10,
            Archetype::Skeleton | Archetype::Zombie => 2,
            Archetype::Necromancer => 25,
            Archetype::Boss => 100,
        }
    }
}
