mod combat_event;
mod fight;

pub use combat_event::*;
pub use fight::{FightEvents, PlayerAbility, ScopedEvents};
