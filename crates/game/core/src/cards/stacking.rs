//! Modifier stacking engine.
//!
//! Merges every card equipped on a weapon into one [`MergedModifierResult`].
//!
//! # Composition rules
//!
//! ```text
//! group cards by kind (multi excluded), sort each group by level, descending
//!
//! ordinary kind:  top card            → 100%
//!                 every further card  → stacking bonus of its own level
//!                                       L3 70% · L2 50% · L1/other 35%
//!
//! minigun:        top card            → 100%, supplies damage_multiplier (default 0.30)
//!                 every further card  → flat penalty on damage_multiplier
//!                                       L1 −0.05 · L2 −0.07 · L3 −0.09
//!                 damage_multiplier   ≥ 0.10; further cards carry no effects
//!
//! effects:        deduplicated by tag, overlapping fields take the max
//! ```
//!
//! The merge is a pure fold: nothing is mutated in place and every call returns
//! a fresh result, so speculative previews are safe.

use super::effects::{EffectDescriptor, EffectTag, merge_effect};
use super::modifiers::ModifierSet;
use super::registry::{CardOracle, CardUpgrade};
use super::types::{Card, CardKind};

/// Share of a non-governing level-3 card.
pub const STACKING_BONUS_LEVEL_3: f32 = 0.70;
/// Share of a non-governing level-2 card.
pub const STACKING_BONUS_LEVEL_2: f32 = 0.50;
/// Share of a non-governing level-1 (or unrecognized level) card.
pub const STACKING_BONUS_DEFAULT: f32 = 0.35;

/// Minigun damage multiplier when the governing card does not set one.
pub const MINIGUN_BASE_DAMAGE_MULTIPLIER: f32 = 0.30;
/// Floor of the merged minigun damage multiplier.
pub const MINIGUN_MIN_DAMAGE_MULTIPLIER: f32 = 0.10;

/// Share at which a non-governing card of `level` contributes.
pub const fn stacking_bonus(level: u8) -> f32 {
    match level {
        3 => STACKING_BONUS_LEVEL_3,
        2 => STACKING_BONUS_LEVEL_2,
        _ => STACKING_BONUS_DEFAULT,
    }
}

/// Damage multiplier penalty of an extra minigun card of `level`.
pub const fn minigun_penalty(level: u8) -> f32 {
    match level {
        3 => 0.09,
        2 => 0.07,
        _ => 0.05,
    }
}

/// Merged modifiers and deduplicated effects of a whole loadout.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedModifierResult {
    pub modifiers: ModifierSet,
    pub effects: Vec<EffectDescriptor>,
}

impl MergedModifierResult {
    /// Result of an empty loadout.
    pub fn neutral() -> Self {
        Self {
            modifiers: ModifierSet::neutral(),
            effects: Vec::new(),
        }
    }

    pub fn effect(&self, tag: EffectTag) -> Option<&EffectDescriptor> {
        self.effects.iter().find(|effect| effect.tag() == tag)
    }

    fn absorb(self, modifiers: &ModifierSet, effects: &[EffectDescriptor]) -> Self {
        Self {
            modifiers: self.modifiers.compose(modifiers),
            effects: effects.iter().fold(self.effects, merge_effect),
        }
    }
}

impl Default for MergedModifierResult {
    fn default() -> Self {
        Self::neutral()
    }
}

struct Resolved<'a> {
    card: &'a Card,
    upgrade: &'a CardUpgrade,
}

/// Merges `cards` into one modifier/effect bundle.
///
/// Cards whose upgrade cannot be found in `oracle` are skipped with a warning;
/// the rest of the loadout still merges. Within a group the governing card is
/// the highest-level card that resolved.
pub fn merge_cards_with_stacking<O>(cards: &[Card], oracle: &O) -> MergedModifierResult
where
    O: CardOracle + ?Sized,
{
    group_by_kind(cards)
        .into_iter()
        .fold(MergedModifierResult::neutral(), |acc, (kind, group)| {
            let resolved = resolve_group(&group, oracle);
            if resolved.is_empty() {
                return acc;
            }
            match kind {
                CardKind::Minigun => fold_minigun(acc, &resolved),
                _ => fold_ordinary(acc, &resolved),
            }
        })
}

/// Groups cards by kind in order of first appearance. `Multi` is dropped.
fn group_by_kind(cards: &[Card]) -> Vec<(CardKind, Vec<&Card>)> {
    let mut groups: Vec<(CardKind, Vec<&Card>)> = Vec::new();
    for card in cards.iter().filter(|card| card.kind != CardKind::Multi) {
        match groups.iter_mut().find(|(kind, _)| *kind == card.kind) {
            Some((_, group)) => group.push(card),
            None => groups.push((card.kind, vec![card])),
        }
    }
    groups
}

/// Looks every card up and orders the hits by level, descending (stable).
fn resolve_group<'a, O>(group: &[&'a Card], oracle: &'a O) -> Vec<Resolved<'a>>
where
    O: CardOracle + ?Sized,
{
    let mut resolved: Vec<Resolved<'a>> = group
        .iter()
        .filter_map(|&card| {
            match oracle.card_upgrade(card.kind, card.level, card.evolution.as_deref()) {
                Some(upgrade) => Some(Resolved { card, upgrade }),
                None => {
                    tracing::warn!(%card, "no upgrade found for card; skipping");
                    None
                }
            }
        })
        .collect();
    resolved.sort_by(|a, b| b.card.level.cmp(&a.card.level));
    resolved
}

fn fold_ordinary(acc: MergedModifierResult, resolved: &[Resolved<'_>]) -> MergedModifierResult {
    resolved
        .iter()
        .enumerate()
        .fold(acc, |acc, (rank, entry)| {
            let share = if rank == 0 {
                1.0
            } else {
                stacking_bonus(entry.card.level)
            };
            acc.absorb(&entry.upgrade.modifiers.scaled(share), &entry.upgrade.effects)
        })
}

fn fold_minigun(acc: MergedModifierResult, resolved: &[Resolved<'_>]) -> MergedModifierResult {
    let Some((top, extras)) = resolved.split_first() else {
        return acc;
    };

    let base = top
        .upgrade
        .modifiers
        .damage_multiplier
        .unwrap_or(MINIGUN_BASE_DAMAGE_MULTIPLIER);
    let penalty: f32 = extras
        .iter()
        .map(|extra| minigun_penalty(extra.card.level))
        .sum();
    let damage_multiplier = (base - penalty).max(MINIGUN_MIN_DAMAGE_MULTIPLIER);

    let merged = acc.absorb(&top.upgrade.modifiers, &top.upgrade.effects);
    MergedModifierResult {
        modifiers: merged.modifiers.with_damage_multiplier(damage_multiplier),
        effects: merged.effects,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Table(HashMap<(CardKind, Option<String>, u8), CardUpgrade>);

    impl Table {
        fn with(mut self, kind: CardKind, level: u8, upgrade: CardUpgrade) -> Self {
            self.0.insert((kind, None, level), upgrade);
            self
        }

        fn with_evolution(
            mut self,
            kind: CardKind,
            path: &str,
            level: u8,
            upgrade: CardUpgrade,
        ) -> Self {
            self.0.insert((kind, Some(path.to_owned()), level), upgrade);
            self
        }
    }

    impl CardOracle for Table {
        fn card_upgrade(
            &self,
            kind: CardKind,
            level: u8,
            evolution: Option<&str>,
        ) -> Option<&CardUpgrade> {
            self.0.get(&(kind, evolution.map(str::to_owned), level))
        }
    }

    fn flat_damage(damage: f32) -> CardUpgrade {
        CardUpgrade {
            modifiers: ModifierSet {
                damage: Some(damage),
                ..Default::default()
            },
            effects: Vec::new(),
        }
    }

    fn attack_speed(multiplier: f32) -> CardUpgrade {
        CardUpgrade {
            modifiers: ModifierSet {
                attack_speed_multiplier: Some(multiplier),
                ..Default::default()
            },
            effects: Vec::new(),
        }
    }

    fn minigun(damage_multiplier: Option<f32>) -> CardUpgrade {
        CardUpgrade {
            modifiers: ModifierSet {
                damage_multiplier,
                attack_speed_multiplier: Some(2.0),
                ..Default::default()
            },
            effects: vec![EffectDescriptor::Spinup {
                max_bonus: 1.0,
                ramp_time: 2.0,
            }],
        }
    }

    fn splash(radius: f32) -> CardUpgrade {
        CardUpgrade {
            modifiers: ModifierSet::default(),
            effects: vec![EffectDescriptor::Splash {
                radius,
                damage_percent: Some(0.5),
            }],
        }
    }

    fn damage_table() -> Table {
        Table::default()
            .with(CardKind::Damage, 1, flat_damage(10.0))
            .with(CardKind::Damage, 2, flat_damage(10.0))
            .with(CardKind::Damage, 3, flat_damage(10.0))
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_loadout_is_neutral() {
        let merged = merge_cards_with_stacking(&[], &Table::default());
        assert_eq!(merged, MergedModifierResult::neutral());
        assert_eq!(merged.modifiers.damage_multiplier, None);
    }

    #[test]
    fn single_card_applies_at_full_strength() {
        let merged = merge_cards_with_stacking(&[Card::new(CardKind::Damage, 1)], &damage_table());
        assert_close(merged.modifiers.damage(), 10.0);
    }

    #[test]
    fn extra_cards_use_their_own_stacking_bonus() {
        let cards = [
            Card::new(CardKind::Damage, 3),
            Card::new(CardKind::Damage, 3),
            Card::new(CardKind::Damage, 2),
            Card::new(CardKind::Damage, 1),
        ];
        let merged = merge_cards_with_stacking(&cards, &damage_table());
        // 10 + 7 + 5 + 3.5
        assert_close(merged.modifiers.damage(), 25.5);
    }

    #[test]
    fn weaker_duplicate_never_governs() {
        let table = Table::default()
            .with(CardKind::Damage, 1, flat_damage(4.0))
            .with(CardKind::Damage, 3, flat_damage(20.0));
        let cards = [Card::new(CardKind::Damage, 1), Card::new(CardKind::Damage, 3)];
        let merged = merge_cards_with_stacking(&cards, &table);
        // 20 at 100% + 4 at 35%
        assert_close(merged.modifiers.damage(), 21.4);
    }

    #[test]
    fn unrecognized_level_stacks_at_default_bonus() {
        let table = damage_table().with(CardKind::Damage, 7, flat_damage(10.0));
        let cards = [Card::new(CardKind::Damage, 3), Card::new(CardKind::Damage, 7)];
        // Level 7 sorts above level 3, so it governs and the L3 card stacks at 70%.
        let merged = merge_cards_with_stacking(&cards, &table);
        assert_close(merged.modifiers.damage(), 17.0);
        assert_close(stacking_bonus(7), STACKING_BONUS_DEFAULT);
    }

    #[test]
    fn multiplicative_fields_scale_their_deviation() {
        let table = Table::default()
            .with(CardKind::AttackSpeed, 3, attack_speed(1.2))
            .with(CardKind::AttackSpeed, 2, attack_speed(1.2));
        let cards = [
            Card::new(CardKind::AttackSpeed, 3),
            Card::new(CardKind::AttackSpeed, 2),
        ];
        let merged = merge_cards_with_stacking(&cards, &table);
        // 1.2 × (1 + 0.2 × 0.5)
        assert_close(merged.modifiers.attack_speed_multiplier(), 1.32);
    }

    #[test]
    fn groups_compose_across_kinds() {
        let table = damage_table().with(CardKind::AttackSpeed, 1, attack_speed(1.5));
        let cards = [
            Card::new(CardKind::AttackSpeed, 1),
            Card::new(CardKind::Damage, 2),
        ];
        let merged = merge_cards_with_stacking(&cards, &table);
        assert_close(merged.modifiers.damage(), 10.0);
        assert_close(merged.modifiers.attack_speed_multiplier(), 1.5);
    }

    #[test]
    fn minigun_defaults_to_base_multiplier() {
        let table = Table::default().with(CardKind::Minigun, 1, minigun(None));
        let merged = merge_cards_with_stacking(&[Card::new(CardKind::Minigun, 1)], &table);
        assert_eq!(
            merged.modifiers.damage_multiplier,
            Some(MINIGUN_BASE_DAMAGE_MULTIPLIER)
        );
    }

    #[test]
    fn extra_miniguns_apply_flat_penalties() {
        let table = Table::default()
            .with(CardKind::Minigun, 1, minigun(Some(0.4)))
            .with(CardKind::Minigun, 2, minigun(Some(0.4)))
            .with(CardKind::Minigun, 3, minigun(Some(0.5)));
        let cards = [
            Card::new(CardKind::Minigun, 1),
            Card::new(CardKind::Minigun, 3),
            Card::new(CardKind::Minigun, 2),
        ];
        let merged = merge_cards_with_stacking(&cards, &table);
        // 0.5 - 0.07 - 0.05
        assert_close(merged.modifiers.damage_multiplier.unwrap_or_default(), 0.38);
        // Only the governing card's attack speed counts.
        assert_close(merged.modifiers.attack_speed_multiplier(), 2.0);
        assert_eq!(merged.effects.len(), 1);
    }

    #[test]
    fn minigun_penalty_is_floored() {
        let table = Table::default().with(CardKind::Minigun, 3, minigun(None));
        let cards = vec![Card::new(CardKind::Minigun, 3); 6];
        let merged = merge_cards_with_stacking(&cards, &table);
        assert_close(
            merged.modifiers.damage_multiplier.unwrap_or_default(),
            MINIGUN_MIN_DAMAGE_MULTIPLIER,
        );
    }

    #[test]
    fn effects_dedup_by_max_across_kinds() {
        let table = Table::default()
            .with(CardKind::Splash, 1, splash(45.0))
            .with(CardKind::Explosive, 1, splash(70.0));
        let cards = [
            Card::new(CardKind::Splash, 1),
            Card::new(CardKind::Explosive, 1),
        ];
        let merged = merge_cards_with_stacking(&cards, &table);
        assert_eq!(merged.effects.len(), 1);
        assert_eq!(
            merged.effect(EffectTag::Splash),
            Some(&EffectDescriptor::Splash {
                radius: 70.0,
                damage_percent: Some(0.5),
            })
        );
    }

    #[test]
    fn multi_cards_are_not_merged() {
        let table = damage_table().with(CardKind::Multi, 1, flat_damage(99.0));
        let cards = [Card::new(CardKind::Multi, 1), Card::new(CardKind::Damage, 1)];
        let merged = merge_cards_with_stacking(&cards, &table);
        assert_close(merged.modifiers.damage(), 10.0);
    }

    #[test]
    fn unknown_cards_are_skipped() {
        let cards = [
            Card::new(CardKind::Damage, 9),
            Card::new(CardKind::Burn, 1),
            Card::new(CardKind::Damage, 1),
        ];
        let merged = merge_cards_with_stacking(&cards, &damage_table());
        // Level 9 and the burn card resolve to nothing; level 1 governs alone.
        assert_close(merged.modifiers.damage(), 10.0);
        assert!(merged.effects.is_empty());
    }

    #[test]
    fn evolution_path_selects_alternate_table() {
        let table = damage_table().with_evolution(CardKind::Damage, "sniper", 1, flat_damage(30.0));
        let classic = merge_cards_with_stacking(&[Card::new(CardKind::Damage, 1)], &table);
        let evolved = merge_cards_with_stacking(
            &[Card::new(CardKind::Damage, 1).with_evolution("sniper")],
            &table,
        );
        assert_close(classic.modifiers.damage(), 10.0);
        assert_close(evolved.modifiers.damage(), 30.0);
    }

    #[test]
    fn merge_is_repeatable() {
        let cards = [Card::new(CardKind::Damage, 2), Card::new(CardKind::Damage, 1)];
        let table = damage_table();
        assert_eq!(
            merge_cards_with_stacking(&cards, &table),
            merge_cards_with_stacking(&cards, &table)
        );
    }
}
