//! Event kinds - the registry the driver draws from
//!
//! A kind is stateless. Instantiating it rolls its random parameters into
//! either a background [`EventEffect`] (applied immediately) or a
//! [`MajorEvent`] (held until the player picks a choice).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{ENERGY, FOOD, MINERALS};
use crate::events::effect::EventEffect;
use crate::events::major::{EventChoice, MajorEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MinorResourceBoost,
    SmallResourceDrain,
    ProductionSpike,
    SolarFlare,
    MeteorStrikeWarning,
}

/// A freshly rolled event
#[derive(Debug, Clone, PartialEq)]
pub enum TriggeredEvent {
    Background(EventEffect),
    Major(MajorEvent),
}

impl EventKind {
    /// Every registered kind, drawn uniformly by the driver
    pub const ALL: [EventKind; 5] = [
        EventKind::MinorResourceBoost,
        EventKind::SmallResourceDrain,
        EventKind::ProductionSpike,
        EventKind::SolarFlare,
        EventKind::MeteorStrikeWarning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::MinorResourceBoost => "Minor Resource Boost",
            EventKind::SmallResourceDrain => "Small Resource Drain",
            EventKind::ProductionSpike => "Production Spike",
            EventKind::SolarFlare => "Solar Flare",
            EventKind::MeteorStrikeWarning => "Meteor Strike Warning!",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventKind::MinorResourceBoost => "Discovered a small cache of resources.",
            EventKind::SmallResourceDrain => "A minor equipment malfunction caused a small loss.",
            EventKind::ProductionSpike => "Temporary surge in production efficiency!",
            EventKind::SolarFlare => "An intense solar flare disrupts colony systems.",
            EventKind::MeteorStrikeWarning => {
                "Scanners detect a meteor shower heading towards the colony!"
            }
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(self, EventKind::MeteorStrikeWarning)
    }

    /// Player-facing choices; empty for background kinds
    pub fn choices(&self) -> Vec<EventChoice> {
        match self {
            EventKind::MeteorStrikeWarning => vec![
                EventChoice::new(
                    "Attempt to shoot down meteors (Cost: 50 Energy, Risky)",
                    "shoot_down",
                ),
                EventChoice::new("Brace for impact (Minimal cost, damage likely)", "brace"),
            ],
            _ => Vec::new(),
        }
    }

    /// Roll the effect of a background kind; `None` for major kinds
    pub fn roll(&self, rng: &mut impl Rng) -> Option<EventEffect> {
        let effect = match self {
            EventKind::MinorResourceBoost => {
                let resources = [MINERALS, ENERGY, FOOD];
                let resource = resources[rng.gen_range(0..resources.len())];
                EventEffect::ResourceBoost {
                    resource: resource.to_string(),
                    amount: f64::from(rng.gen_range(25..=75u32)),
                }
            }
            EventKind::SmallResourceDrain => {
                let resources = [MINERALS, ENERGY];
                let resource = resources[rng.gen_range(0..resources.len())];
                EventEffect::ResourceDrain {
                    resource: resource.to_string(),
                    amount: f64::from(rng.gen_range(10..=30u32)),
                }
            }
            EventKind::ProductionSpike => EventEffect::ProductionSpike {
                minerals: f64::from(rng.gen_range(10..=30u32)),
                energy: f64::from(rng.gen_range(5..=20u32)),
            },
            EventKind::SolarFlare => EventEffect::SolarFlare {
                energy: f64::from(rng.gen_range(20..=40u32)),
            },
            EventKind::MeteorStrikeWarning => return None,
        };
        Some(effect)
    }

    /// Instantiate this kind with freshly rolled parameters
    pub fn instantiate(&self, rng: &mut impl Rng) -> TriggeredEvent {
        match self.roll(rng) {
            Some(effect) => TriggeredEvent::Background(effect),
            None => TriggeredEvent::Major(MajorEvent::new(*self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_only_meteor_is_major() {
        let majors: Vec<EventKind> = EventKind::ALL.into_iter().filter(|k| k.is_major()).collect();
        assert_eq!(majors, vec![EventKind::MeteorStrikeWarning]);
        assert!(EventKind::SolarFlare.choices().is_empty());
        assert_eq!(EventKind::MeteorStrikeWarning.choices().len(), 2);
    }

    #[test]
    fn test_rolls_stay_within_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            match EventKind::MinorResourceBoost.roll(&mut rng) {
                Some(EventEffect::ResourceBoost { resource, amount }) => {
                    assert!([MINERALS, ENERGY, FOOD].contains(&resource.as_str()));
                    assert!((25.0..=75.0).contains(&amount));
                }
                other => panic!("unexpected roll {:?}", other),
            }
            match EventKind::SmallResourceDrain.roll(&mut rng) {
                Some(EventEffect::ResourceDrain { resource, amount }) => {
                    assert!([MINERALS, ENERGY].contains(&resource.as_str()));
                    assert!((10.0..=30.0).contains(&amount));
                }
                other => panic!("unexpected roll {:?}", other),
            }
            match EventKind::SolarFlare.roll(&mut rng) {
                Some(EventEffect::SolarFlare { energy }) => assert!((20.0..=40.0).contains(&energy)),
                other => panic!("unexpected roll {:?}", other),
            }
        }
    }

    #[test]
    fn test_instantiate_major() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        match EventKind::MeteorStrikeWarning.instantiate(&mut rng) {
            TriggeredEvent::Major(event) => {
                assert_eq!(event.name, "Meteor Strike Warning!");
                assert_eq!(event.choices[0].key, "shoot_down");
                assert_eq!(event.choices[1].key, "brace");
            }
            other => panic!("expected major event, got {:?}", other),
        }
    }
}
