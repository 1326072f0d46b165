//! Weapon cards and the modifier stacking engine.
//!
//! Cards are pure references (`kind`, `level`, optional evolution path). Their
//! numbers live in upgrade tables reached through [`CardOracle`], and
//! [`merge_cards_with_stacking`] folds a loadout into one
//! [`MergedModifierResult`].
mod effects;
mod loadout;
mod modifiers;
mod registry;
mod stacking;
mod types;

pub use effects::{EffectDescriptor, EffectTag, merge_effect};
pub use loadout::WeaponLoadout;
pub use modifiers::ModifierSet;
pub use registry::{CardLookupError, CardOracle, CardUpgrade};
pub use stacking::{
    MINIGUN_BASE_DAMAGE_MULTIPLIER, MINIGUN_MIN_DAMAGE_MULTIPLIER, MergedModifierResult,
    STACKING_BONUS_DEFAULT, STACKING_BONUS_LEVEL_2, STACKING_BONUS_LEVEL_3,
    merge_cards_with_stacking, minigun_penalty, stacking_bonus,
};
pub use types::{Card, CardKind};
