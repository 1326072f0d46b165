//! Game configuration loader.

use std::path::Path;

use defense_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_toml(&content)
    }

    /// Parse config data from a TOML string.
    pub fn from_toml(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use defense_core::{HazardConfig, SoulConfig};

    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = ConfigLoader::from_toml("").expect("empty config parses");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = ConfigLoader::from_toml(
            r#"
            [hazard]
            radius = 120.0

            [soul]
            heal_percent = 0.25
            "#,
        )
        .expect("config parses");

        assert_eq!(config.hazard.radius, 120.0);
        assert_eq!(config.hazard.lifetime, HazardConfig::DEFAULT_LIFETIME);
        assert_eq!(config.soul.heal_percent, 0.25);
        assert_eq!(config.soul.speed, SoulConfig::DEFAULT_SPEED);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[hazard]\nheal_interval = 0.25").expect("write config");

        let config = ConfigLoader::load(file.path()).expect("config loads");
        assert_eq!(config.hazard.heal_interval, 0.25);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::from_toml("[hazard\nradius = ").is_err());
        assert!(ConfigLoader::load(Path::new("/nonexistent/defense.toml")).is_err());
    }
}
