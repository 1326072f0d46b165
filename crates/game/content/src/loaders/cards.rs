//! Card upgrade table loader.
//!
//! Loads per-level card upgrades from RON data files and serves them through
//! [`CardOracle`].

use std::collections::HashMap;
use std::path::Path;

use defense_core::{Card, CardKind, CardLookupError, CardOracle, CardUpgrade};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One upgrade table as written in a RON file.
///
/// `levels[0]` is level 1. A table without `evolution` is the classic table of
/// its kind; with one, it replaces the classic table for cards on that path.
#[derive(Debug, Clone, Deserialize)]
pub struct CardTableSpec {
    pub kind: CardKind,
    #[serde(default)]
    pub evolution: Option<String>,
    pub levels: Vec<CardUpgrade>,
}

#[derive(Debug, Clone, Default)]
struct CardFamily {
    classic: Option<Vec<CardUpgrade>>,
    evolutions: HashMap<String, Vec<CardUpgrade>>,
}

/// Registry of every card upgrade table.
#[derive(Debug, Clone, Default)]
pub struct CardRegistry {
    families: HashMap<CardKind, CardFamily>,
}

impl CardRegistry {
    /// Loads the built-in tables embedded in the crate.
    pub fn load() -> LoadResult<Self> {
        let mut registry = Self::default();

        // Classic tables for every card kind
        let classic_ron = include_str!("../../data/cards/classic.ron");
        registry.extend_from_ron(classic_ron, "classic.ron")?;

        // Evolution paths replacing a classic table
        let evolutions_ron = include_str!("../../data/cards/evolutions.ron");
        registry.extend_from_ron(evolutions_ron, "evolutions.ron")?;

        tracing::debug!(tables = registry.table_count(), "card registry loaded");
        Ok(registry)
    }

    /// Builds a registry from a single RON document.
    pub fn from_ron(source: &str) -> LoadResult<Self> {
        let mut registry = Self::default();
        registry.extend_from_ron(source, "<inline>")?;
        Ok(registry)
    }

    /// Builds a registry from a RON file on disk.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let mut registry = Self::default();
        registry.extend_from_ron(&content, &path.display().to_string())?;
        Ok(registry)
    }

    fn extend_from_ron(&mut self, source: &str, origin: &str) -> LoadResult<()> {
        let tables: Vec<CardTableSpec> = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", origin, e))?;
        for table in tables {
            self.insert(table)?;
        }
        Ok(())
    }

    /// Adds one table. Duplicate tables and level counts outside
    /// `1..=Card::MAX_LEVEL` are rejected.
    pub fn insert(&mut self, table: CardTableSpec) -> LoadResult<()> {
        let CardTableSpec {
            kind,
            evolution,
            levels,
        } = table;

        if levels.is_empty() || levels.len() > usize::from(Card::MAX_LEVEL) {
            anyhow::bail!(
                "card table `{}` must define 1..={} levels, found {}",
                kind,
                Card::MAX_LEVEL,
                levels.len()
            );
        }

        let family = self.families.entry(kind).or_default();
        match evolution {
            None => {
                if family.classic.is_some() {
                    anyhow::bail!("duplicate classic table for card kind `{}`", kind);
                }
                family.classic = Some(levels);
            }
            Some(path) => {
                if family.evolutions.contains_key(&path) {
                    anyhow::bail!("duplicate evolution `{}` for card kind `{}`", path, kind);
                }
                family.evolutions.insert(path, levels);
            }
        }
        Ok(())
    }

    /// Looks up an upgrade, explaining what was missing on failure.
    pub fn resolve(
        &self,
        kind: CardKind,
        level: u8,
        evolution: Option<&str>,
    ) -> Result<&CardUpgrade, CardLookupError> {
        let family = self
            .families
            .get(&kind)
            .ok_or(CardLookupError::UnknownKind { kind })?;

        let levels = match evolution {
            Some(path) => family.evolutions.get(path).ok_or_else(|| {
                CardLookupError::UnknownEvolution {
                    kind,
                    path: path.to_owned(),
                }
            })?,
            None => family
                .classic
                .as_ref()
                .ok_or(CardLookupError::UnknownKind { kind })?,
        };

        usize::from(level)
            .checked_sub(1)
            .and_then(|index| levels.get(index))
            .ok_or(CardLookupError::UnknownLevel { kind, level })
    }

    /// Evolution paths registered for `kind`, sorted.
    pub fn evolutions(&self, kind: CardKind) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .families
            .get(&kind)
            .map(|family| family.evolutions.keys().map(String::as_str).collect())
            .unwrap_or_default();
        paths.sort_unstable();
        paths
    }

    /// Number of tables, classic and evolved.
    pub fn table_count(&self) -> usize {
        self.families
            .values()
            .map(|family| usize::from(family.classic.is_some()) + family.evolutions.len())
            .sum()
    }
}

impl CardOracle for CardRegistry {
    fn card_upgrade(
        &self,
        kind: CardKind,
        level: u8,
        evolution: Option<&str>,
    ) -> Option<&CardUpgrade> {
        self.resolve(kind, level, evolution).ok()
    }
}
