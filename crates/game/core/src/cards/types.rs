//! Card references equipped on weapons.

/// Card family.
///
/// Each family has an upgrade table per level in the content registry.
/// `Minigun` stacks with flat penalties instead of bonuses; `Multi` splits
/// projectiles and is never merged into the modifier bundle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardKind {
    Damage,
    AttackSpeed,
    Range,
    Crit,
    Splash,
    Slow,
    Burn,
    Pierce,
    Explosive,
    Frostbite,
    Minigun,
    Multi,
}

/// A single equipped card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub kind: CardKind,
    /// 1..=3 for forged cards; other values only come from malformed input.
    pub level: u8,
    /// Alternate upgrade table replacing the classic one when set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub evolution: Option<String>,
}

impl Card {
    pub const MAX_LEVEL: u8 = 3;

    pub fn new(kind: CardKind, level: u8) -> Self {
        Self {
            kind,
            level,
            evolution: None,
        }
    }

    #[must_use]
    pub fn with_evolution(mut self, path: impl Into<String>) -> Self {
        self.evolution = Some(path.into());
        self
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.evolution {
            Some(path) => write!(f, "{}:{}@L{}", self.kind, path, self.level),
            None => write!(f, "{}@L{}", self.kind, self.level),
        }
    }
}
