//! Random events - background perturbations and major decisions

pub mod effect;
pub mod kinds;
pub mod major;

pub use effect::EventEffect;
pub use kinds::{EventKind, TriggeredEvent};
pub use major::{EventChoice, MajorEvent, MeteorChoice, MeteorOutcome};

use rand::Rng;

use crate::colony::state::Colony;

/// Fire one event of `kind` against the colony
///
/// Background events are applied and logged immediately and yield `None`.
/// Major events only log an ALERT banner and are returned for presentation.
pub fn fire(kind: EventKind, colony: &mut Colony, rng: &mut impl Rng) -> Option<MajorEvent> {
    match kind.instantiate(rng) {
        TriggeredEvent::Background(effect) => {
            let message = effect.apply(colony);
            tracing::debug!(event = kind.name(), "background event applied");
            colony.log(message);
            None
        }
        TriggeredEvent::Major(event) => {
            tracing::info!(event = %event.name, "major event awaiting a decision");
            colony.log(format!("ALERT: {} {}", event.name, event.description));
            Some(event)
        }
    }
}
