//! Per-frame driver for the defense simulation.
//!
//! This crate wires the core unit model and event bus into a tick loop and
//! hosts the reactive systems that respond to unit deaths.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] owns the roster, the economy counters and the bus
//! - [`satellites`] provides the death-driven hazard and soul systems
//! - [`logging`] installs the tracing subscriber for embedding hosts
pub mod error;
pub mod logging;
pub mod satellites;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use satellites::{DeathRecord, Hazard, HazardSystem, Satellite, Soul, SoulHarvestSystem};
pub use simulation::{Simulation, TickReport, validate_config};
