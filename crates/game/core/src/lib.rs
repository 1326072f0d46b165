//! Deterministic numeric and event core of the defense game.
//!
//! `defense-core` owns the rules every other crate builds on: the unit health
//! and status model, the synchronous event bus, and the card modifier stacking
//! engine. Content tables and the per-frame driver live in sibling crates and
//! depend on the types re-exported here.
pub mod cards;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod unit;

pub use cards::{
    Card, CardKind, CardLookupError, CardOracle, CardUpgrade, EffectDescriptor, EffectTag,
    MergedModifierResult, ModifierSet, WeaponLoadout, merge_cards_with_stacking,
};
pub use combat::{
    DamageOutcome, DamageSource, Hit, StatusApplication, StatusEffect, StatusKind, WeaponId,
    apply_hit, calculate_damage,
};
pub use config::{GameConfig, HazardConfig, SoulConfig};
pub use error::{ErrorSeverity, GameError};
pub use events::{Event, EventBus, EventKind, SubscriptionToken, WeakEventBus};
pub use unit::{Archetype, ArchetypeRoles, Position, Unit, UnitId};
