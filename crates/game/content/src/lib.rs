//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Card upgrade tables, classic and evolved (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed through core oracles and never appears in unit state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CardRegistry, CardTableSpec, ConfigLoader, LoadResult};
