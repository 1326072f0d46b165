//! Cards equipped on one weapon and their cached merge.

use super::registry::CardOracle;
use super::stacking::{MergedModifierResult, merge_cards_with_stacking};
use super::types::{Card, CardKind};

/// Ordered list of cards on a weapon, plus the merged bundle they produce.
///
/// The bundle is recomputed on every loadout change and read for free in
/// between. Order is equip order; it only matters for ties between
/// equal-level cards of one kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeaponLoadout {
    cards: Vec<Card>,
    merged: MergedModifierResult,
}

impl WeaponLoadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards<O>(cards: impl IntoIterator<Item = Card>, oracle: &O) -> Self
    where
        O: CardOracle + ?Sized,
    {
        let cards: Vec<Card> = cards.into_iter().collect();
        let merged = merge_cards_with_stacking(&cards, oracle);
        Self { cards, merged }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cached merge of the current cards.
    pub fn merged(&self) -> &MergedModifierResult {
        &self.merged
    }

    pub fn equip<O>(&mut self, card: Card, oracle: &O)
    where
        O: CardOracle + ?Sized,
    {
        self.cards.push(card);
        self.refresh(oracle);
    }

    /// Removes the card at `slot`. Returns `None` (and keeps the cache) when
    /// the slot is empty.
    pub fn unequip<O>(&mut self, slot: usize, oracle: &O) -> Option<Card>
    where
        O: CardOracle + ?Sized,
    {
        if slot >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(slot);
        self.refresh(oracle);
        Some(card)
    }

    /// Replaces every equipped card.
    pub fn set_cards<O>(&mut self, cards: Vec<Card>, oracle: &O)
    where
        O: CardOracle + ?Sized,
    {
        self.cards = cards;
        self.refresh(oracle);
    }

    /// Recomputes the cache, e.g. after the card tables were reloaded.
    pub fn refresh<O>(&mut self, oracle: &O)
    where
        O: CardOracle + ?Sized,
    {
        self.merged = merge_cards_with_stacking(&self.cards, oracle);
    }

    /// Number of `Multi` cards; each adds one projectile per shot.
    pub fn multi_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.kind == CardKind::Multi)
            .count()
    }

    /// Merge preview with `candidate` equipped, leaving the loadout untouched.
    pub fn preview_with<O>(&self, candidate: &Card, oracle: &O) -> MergedModifierResult
    where
        O: CardOracle + ?Sized,
    {
        let mut cards = self.cards.clone();
        cards.push(candidate.clone());
        merge_cards_with_stacking(&cards, oracle)
    }
}
