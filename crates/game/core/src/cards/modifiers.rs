//! Weapon modifier sets and their composition steps.
//!
//! Additive fields (`damage`, `range`, `crit_chance`) sum; multiplicative
//! fields (`attack_speed_multiplier`, `range_multiplier`) multiply. Absent
//! fields are neutral: 0 for additive, 1.0 for multiplicative.
//!
//! `damage_multiplier` belongs to the minigun family alone. It is never
//! composed across cards; the stacking engine sets it explicitly.

/// Modifier contribution of one card, or the merged total of a loadout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModifierSet {
    pub damage: Option<f32>,
    pub damage_multiplier: Option<f32>,
    pub attack_speed_multiplier: Option<f32>,
    pub range: Option<f32>,
    pub range_multiplier: Option<f32>,
    pub crit_chance: Option<f32>,
}

impl ModifierSet {
    /// Starting accumulator of a merge: every field explicitly neutral.
    pub fn neutral() -> Self {
        Self {
            damage: Some(0.0),
            damage_multiplier: None,
            attack_speed_multiplier: Some(1.0),
            range: Some(0.0),
            range_multiplier: Some(1.0),
            crit_chance: Some(0.0),
        }
    }

    pub fn damage(&self) -> f32 {
        self.damage.unwrap_or(0.0)
    }

    pub fn attack_speed_multiplier(&self) -> f32 {
        self.attack_speed_multiplier.unwrap_or(1.0)
    }

    pub fn range(&self) -> f32 {
        self.range.unwrap_or(0.0)
    }

    pub fn range_multiplier(&self) -> f32 {
        self.range_multiplier.unwrap_or(1.0)
    }

    pub fn crit_chance(&self) -> f32 {
        self.crit_chance.unwrap_or(0.0)
    }

    /// Scales this contribution to `share` of its strength.
    ///
    /// Additive fields are multiplied by `share`. Multiplicative fields are
    /// scaled on their deviation from 1.0: `1 + (m - 1) × share`.
    pub fn scaled(&self, share: f32) -> Self {
        let flat = |value: Option<f32>| value.map(|v| v * share);
        let deviation = |value: Option<f32>| value.map(|m| 1.0 + (m - 1.0) * share);
        Self {
            damage: flat(self.damage),
            damage_multiplier: self.damage_multiplier,
            attack_speed_multiplier: deviation(self.attack_speed_multiplier),
            range: flat(self.range),
            range_multiplier: deviation(self.range_multiplier),
            crit_chance: flat(self.crit_chance),
        }
    }

    /// Folds `other` into this total.
    ///
    /// `damage_multiplier` is carried over from `self` untouched.
    pub fn compose(&self, other: &ModifierSet) -> Self {
        Self {
            damage: Some(self.damage() + other.damage()),
            damage_multiplier: self.damage_multiplier,
            attack_speed_multiplier: Some(
                self.attack_speed_multiplier() * other.attack_speed_multiplier(),
            ),
            range: Some(self.range() + other.range()),
            range_multiplier: Some(self.range_multiplier() * other.range_multiplier()),
            crit_chance: Some(self.crit_chance() + other.crit_chance()),
        }
    }

    #[must_use]
    pub fn with_damage_multiplier(mut self, multiplier: f32) -> Self {
        self.damage_multiplier = Some(multiplier);
        self
    }

    /// Per-projectile damage for a weapon with `base` damage.
    pub fn damage_for(&self, base: f32) -> f32 {
        (base + self.damage()) * self.damage_multiplier.unwrap_or(1.0)
    }

    pub fn range_for(&self, base: f32) -> f32 {
        (base + self.range()) * self.range_multiplier()
    }

    /// Seconds between shots for a weapon that fires every `base` seconds.
    pub fn attack_interval_for(&self, base: f32) -> f32 {
        let multiplier = self.attack_speed_multiplier();
        if multiplier > 0.0 {
            base / multiplier
        } else {
            base
        }
    }
}
