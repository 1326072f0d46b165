//! Process-wide notifications between the combat model and reactive systems.
//!
//! The bus is an explicit object handed to whoever needs it rather than a
//! global, so every simulation (and every test) owns its own registry.

mod bus;
mod types;

pub use bus::{EventBus, SubscriptionToken, WeakEventBus};
pub use types::{Event, EventKind};
