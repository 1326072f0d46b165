//! Event kinds and payloads carried by the bus.

use crate::unit::Unit;

/// Fixed set of event kinds.
///
/// Adding a kind is backward compatible: existing subscribers only ever see
/// the kinds they subscribed to.
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
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    UnitDied,
    MoneyChanged,
    LivesChanged,
    WaveStarted,
    WaveCompleted,
}

/// Event payload.
///
/// `UnitDied` borrows the unit for the duration of the emission; subscribers
/// must treat it as already dead and read-only.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    UnitDied { unit: &'a Unit },
    MoneyChanged { money: i64 },
    LivesChanged { lives: i32 },
    WaveStarted { wave: u32 },
    WaveCompleted { wave: u32 },
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::UnitDied { .. } => EventKind::UnitDied,
            Event::MoneyChanged { .. } => EventKind::MoneyChanged,
            Event::LivesChanged { .. } => EventKind::LivesChanged,
            Event::WaveStarted { .. } => EventKind::WaveStarted,
            Event::WaveCompleted { .. } => EventKind::WaveCompleted,
        }
    }
}
