//! On-hit and on-death effect descriptors carried by cards.

/// Identity of an effect. Two descriptors are the same effect iff their tags match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum EffectTag {
    Splash,
    Slow,
    Burn,
    Pierce,
    ExplodeOnDeath,
    ChainSlowOnDeath,
    Spinup,
}

/// Effect descriptor with kind-specific numeric fields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDescriptor {
    /// Area damage around the impact point.
    Splash {
        radius: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        damage_percent: Option<f32>,
    },
    /// Slows the target; slowed targets take `damage_to_slowed` × damage.
    Slow {
        duration: f32,
        power: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        damage_to_slowed: Option<f32>,
    },
    /// Sets the target on fire.
    Burn { duration: f32, damage_per_tick: f32 },
    /// Projectile passes through `count` extra targets.
    Pierce { count: u32 },
    /// Killed targets explode for a share of their max health.
    ExplodeOnDeath { damage_percent: f32, radius: f32 },
    /// Killed targets slow everything around them.
    ChainSlowOnDeath {
        radius: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        duration: Option<f32>,
        #[cfg_attr(feature = "serde", serde(default))]
        power: Option<f32>,
    },
    /// Fire rate ramps up while the weapon keeps shooting.
    Spinup { max_bonus: f32, ramp_time: f32 },
}

impl EffectDescriptor {
    pub fn tag(&self) -> EffectTag {
        match self {
            EffectDescriptor::Splash { .. } => EffectTag::Splash,
            EffectDescriptor::Slow { .. } => EffectTag::Slow,
            EffectDescriptor::Burn { .. } => EffectTag::Burn,
            EffectDescriptor::Pierce { .. } => EffectTag::Pierce,
            EffectDescriptor::ExplodeOnDeath { .. } => EffectTag::ExplodeOnDeath,
            EffectDescriptor::ChainSlowOnDeath { .. } => EffectTag::ChainSlowOnDeath,
            EffectDescriptor::Spinup { .. } => EffectTag::Spinup,
        }
    }

    /// Raises the overlapping numeric fields of `self` to those of `incoming`.
    ///
    /// Only splash radius, slow duration/power/damage-to-slowed, pierce count,
    /// explosion damage/radius and chain radius participate. Optional fields
    /// absent on either side are left as they are; every other field keeps the
    /// first-seen value. Descriptors with different tags are left untouched.
    pub fn merge_max(&mut self, incoming: &EffectDescriptor) {
        use EffectDescriptor as E;

        match (self, incoming) {
            (E::Splash { radius, .. }, E::Splash { radius: other, .. }) => {
                *radius = radius.max(*other);
            }
            (
                E::Slow {
                    duration,
                    power,
                    damage_to_slowed,
                },
                E::Slow {
                    duration: other_duration,
                    power: other_power,
                    damage_to_slowed: other_bonus,
                },
            ) => {
                *duration = duration.max(*other_duration);
                *power = power.max(*other_power);
                max_optional(damage_to_slowed, *other_bonus);
            }
            (E::Pierce { count }, E::Pierce { count: other }) => {
                *count = (*count).max(*other);
            }
            (
                E::ExplodeOnDeath {
                    damage_percent,
                    radius,
                },
                E::ExplodeOnDeath {
                    damage_percent: other_percent,
                    radius: other_radius,
                },
            ) => {
                *damage_percent = damage_percent.max(*other_percent);
                *radius = radius.max(*other_radius);
            }
            (E::ChainSlowOnDeath { radius, .. }, E::ChainSlowOnDeath { radius: other, .. }) => {
                *radius = radius.max(*other);
            }
            _ => {}
        }
    }
}

fn max_optional(existing: &mut Option<f32>, incoming: Option<f32>) {
    if let (Some(current), Some(other)) = (existing.as_mut(), incoming) {
        *current = current.max(other);
    }
}

/// Appends `incoming` to `effects`, merging by tag.
///
/// An effect whose tag is already present is folded into the existing entry
/// with [`EffectDescriptor::merge_max`]; fields are never summed.
pub fn merge_effect(
    mut effects: Vec<EffectDescriptor>,
    incoming: &EffectDescriptor,
) -> Vec<EffectDescriptor> {
    let tag = incoming.tag();
    match effects.iter_mut().find(|effect| effect.tag() == tag) {
        Some(existing) => existing.merge_max(incoming),
        None => effects.push(incoming.clone()),
    }
    effects
}
