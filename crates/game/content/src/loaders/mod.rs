//! Content loaders for reading game data from files.
//!
//! Card tables are RON, the game configuration is TOML. Both deserialize
//! straight into `defense-core` types.

pub mod cards;
pub mod config;

pub use cards::{CardRegistry, CardTableSpec};
pub use config::ConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
