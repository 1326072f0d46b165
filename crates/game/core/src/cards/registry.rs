//! Read-only access to card upgrade tables.
//!
//! The tables themselves are content (see the `defense-content` crate); the
//! stacking engine only reads them through [`CardOracle`].

use crate::error::{ErrorSeverity, GameError};

use super::effects::EffectDescriptor;
use super::modifiers::ModifierSet;
use super::types::CardKind;

/// What one card contributes at one level.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardUpgrade {
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: ModifierSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectDescriptor>,
}

/// Lookup of card upgrades by family, level and optional evolution path.
pub trait CardOracle {
    /// Returns the upgrade for `(kind, level, evolution)`, or `None` when the
    /// table has no such entry.
    fn card_upgrade(
        &self,
        kind: CardKind,
        level: u8,
        evolution: Option<&str>,
    ) -> Option<&CardUpgrade>;
}

/// Why a card lookup found nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardLookupError {
    #[error("no upgrade table for card kind `{kind}`")]
    UnknownKind { kind: CardKind },

    #[error("card kind `{kind}` has no evolution path `{path}`")]
    UnknownEvolution { kind: CardKind, path: String },

    #[error("card `{kind}` has no level {level}")]
    UnknownLevel { kind: CardKind, level: u8 },
}

impl GameError for CardLookupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKind { .. } => "CARD_UNKNOWN_KIND",
            Self::UnknownEvolution { .. } => "CARD_UNKNOWN_EVOLUTION",
            Self::UnknownLevel { .. } => "CARD_UNKNOWN_LEVEL",
        }
    }
}
