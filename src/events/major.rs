//! Major events - events that wait for a player decision
//!
//! Resolution is split in two steps: `MeteorOutcome::roll` consumes all the
//! randomness (including which building gets hit), then `apply` mutates the
//! colony deterministically.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colony::construction::DamageResult;
use crate::colony::ledger::ResourceLedger;
use crate::colony::state::Colony;
use crate::core::types::{ENERGY, MINERALS};
use crate::events::kinds::EventKind;

/// Energy spent on an interception attempt
pub const SHOOT_DOWN_ENERGY_COST: f64 = 50.0;
/// Probability an affordable interception succeeds
pub const SHOOT_DOWN_SUCCESS_CHANCE: f64 = 0.60;
/// Probability bracing avoids all damage
pub const BRACE_SAFE_CHANCE: f64 = 0.30;

/// One option presented to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventChoice {
    pub label: String,
    pub key: String,
}

impl EventChoice {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// A triggered major event awaiting a choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorEvent {
    pub kind: EventKind,
    pub name: String,
    pub description: String,
    pub choices: Vec<EventChoice>,
}

impl MajorEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            choices: kind.choices(),
        }
    }

    pub fn has_choice(&self, key: &str) -> bool {
        self.choices.iter().any(|c| c.key == key)
    }

    /// Apply the branch selected by `choice_key`
    ///
    /// Returns the outcome message, or `None` (and changes nothing) if the
    /// key is not one of this event's choices.
    pub fn resolve(&self, choice_key: &str, colony: &mut Colony, rng: &mut impl Rng) -> Option<String> {
        if !self.has_choice(choice_key) {
            return None;
        }
        match self.kind {
            EventKind::MeteorStrikeWarning => {
                let choice = MeteorChoice::from_key(choice_key)?;
                let outcome = MeteorOutcome::roll(choice, colony, rng);
                Some(format!("{} - {}", self.name, outcome.apply(colony)))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorChoice {
    ShootDown,
    Brace,
}

impl MeteorChoice {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "shoot_down" => Some(MeteorChoice::ShootDown),
            "brace" => Some(MeteorChoice::Brace),
            _ => None,
        }
    }
}

/// Rolled result of a meteor strike
#[derive(Debug, Clone, PartialEq)]
pub enum MeteorOutcome {
    /// Interception worked; salvage Minerals from the debris
    Intercepted { salvage: f64 },
    /// Interception failed; extra Energy lost and a building hit
    InterceptFailed {
        energy_lost: f64,
        damage_target: Option<usize>,
    },
    /// Meteors land; Minerals lost and a building hit.
    /// `no_energy` marks a shoot-down that could not be afforded.
    Impact {
        minerals_lost: f64,
        damage_target: Option<usize>,
        no_energy: bool,
    },
    /// Braced and escaped unharmed
    Braced,
}

impl MeteorOutcome {
    pub fn roll(choice: MeteorChoice, colony: &Colony, rng: &mut impl Rng) -> Self {
        match choice {
            MeteorChoice::ShootDown => {
                let cost = ResourceLedger::from_pairs([(ENERGY, SHOOT_DOWN_ENERGY_COST)]);
                if !colony.has_enough(&cost) {
                    return Self::roll_impact(colony, rng, true);
                }
                if rng.gen::<f64>() < SHOOT_DOWN_SUCCESS_CHANCE {
                    MeteorOutcome::Intercepted {
                        salvage: f64::from(rng.gen_range(20..=50u32)),
                    }
                } else {
                    MeteorOutcome::InterceptFailed {
                        energy_lost: f64::from(rng.gen_range(30..=60u32)),
                        damage_target: pick_target(colony, rng),
                    }
                }
            }
            MeteorChoice::Brace => {
                if rng.gen::<f64>() < BRACE_SAFE_CHANCE {
                    MeteorOutcome::Braced
                } else {
                    Self::roll_impact(colony, rng, false)
                }
            }
        }
    }

    /// Shared penalty for a damaging brace and an unaffordable shoot-down
    fn roll_impact(colony: &Colony, rng: &mut impl Rng, no_energy: bool) -> Self {
        MeteorOutcome::Impact {
            minerals_lost: f64::from(rng.gen_range(25..=75u32)),
            damage_target: pick_target(colony, rng),
            no_energy,
        }
    }

    /// Mutate the colony and return the outcome line
    ///
    /// Every drain clamps at zero. The shoot-down Energy cost is only known
    /// to be affordable for outcomes produced by [`MeteorOutcome::roll`]; a
    /// hand-built `Intercepted` or `InterceptFailed` applied to a poor colony
    /// simply takes whatever Energy is left.
    pub fn apply(&self, colony: &mut Colony) -> String {
        match self {
            MeteorOutcome::Intercepted { salvage } => {
                colony.drain_resource(ENERGY, SHOOT_DOWN_ENERGY_COST);
                colony.add_resource(MINERALS, *salvage);
                format!(
                    "Successfully defended! Gained {:.1} Minerals from salvaged meteors.",
                    salvage
                )
            }
            MeteorOutcome::InterceptFailed {
                energy_lost,
                damage_target,
            } => {
                colony.drain_resource(ENERGY, SHOOT_DOWN_ENERGY_COST);
                let lost = colony.drain_resource(ENERGY, *energy_lost);
                format!(
                    "Defense failed! Lost {:.1} additional Energy. {}",
                    lost,
                    damage(colony, *damage_target)
                )
            }
            MeteorOutcome::Impact {
                minerals_lost,
                damage_target,
                no_energy,
            } => {
                let prefix = if *no_energy {
                    "Not enough Energy to attempt defense! Bracing for impact instead. "
                } else {
                    "Braced for impact. "
                };
                let lost = colony.drain_resource(MINERALS, *minerals_lost);
                format!(
                    "{}Lost {:.1} Minerals during impact. {}",
                    prefix,
                    lost,
                    damage(colony, *damage_target)
                )
            }
            MeteorOutcome::Braced => {
                "Braced for impact. Thankfully, the colony sustained no significant damage."
                    .to_string()
            }
        }
    }
}

fn pick_target(colony: &Colony, rng: &mut impl Rng) -> Option<usize> {
    let count = colony.buildings().len();
    (count > 0).then(|| rng.gen_range(0..count))
}

fn damage(colony: &mut Colony, target: Option<usize>) -> String {
    target
        .map(|index| colony.damage_building(index))
        .unwrap_or(DamageResult::NoTarget)
        .message()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::building::BuildingInstance;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn colony_with(energy: f64, minerals: f64) -> Colony {
        let mut colony = Colony::new();
        colony.drain_resource(ENERGY, f64::MAX);
        colony.drain_resource(MINERALS, f64::MAX);
        colony.add_resource(ENERGY, energy);
        colony.add_resource(MINERALS, minerals);
        colony
    }

    #[test]
    fn test_intercepted_outcome() {
        let mut colony = colony_with(100.0, 50.0);
        let message = MeteorOutcome::Intercepted { salvage: 30.0 }.apply(&mut colony);
        assert_eq!(colony.get_resources().get(ENERGY), 50.0);
        assert_eq!(colony.get_resources().get(MINERALS), 80.0);
        assert!(message.contains("Successfully defended"));
    }

    #[test]
    fn test_hand_built_interception_clamps_energy() {
        let mut colony = colony_with(20.0, 0.0);
        MeteorOutcome::Intercepted { salvage: 25.0 }.apply(&mut colony);
        assert_eq!(colony.get_resources().get(ENERGY), 0.0);
        assert_eq!(colony.get_resources().get(MINERALS), 25.0);
    }

    #[test]
    fn test_intercept_failed_outcome() {
        let mut colony = colony_with(100.0, 50.0);
        colony.add_building(BuildingInstance::with_level("Mine", 2));

        let message = MeteorOutcome::InterceptFailed {
            energy_lost: 40.0,
            damage_target: Some(0),
        }
        .apply(&mut colony);

        assert_eq!(colony.get_resources().get(ENERGY), 10.0);
        assert_eq!(colony.get_resources().get(MINERALS), 50.0);
        assert_eq!(colony.buildings()[0].level, 1);
        assert!(message.contains("Defense failed"));
        assert!(message.contains("damaged"));
    }

    #[test]
    fn test_unaffordable_shoot_down_falls_back_to_impact() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let colony = colony_with(10.0, 100.0);

        let outcome = MeteorOutcome::roll(MeteorChoice::ShootDown, &colony, &mut rng);
        match outcome {
            MeteorOutcome::Impact {
                minerals_lost,
                damage_target,
                no_energy,
            } => {
                assert!(no_energy);
                assert!((25.0..=75.0).contains(&minerals_lost));
                assert_eq!(damage_target, None);
            }
            other => panic!("expected impact, got {:?}", other),
        }
    }

    #[test]
    fn test_impact_clamps_minerals() {
        let mut colony = colony_with(0.0, 10.0);
        let message = MeteorOutcome::Impact {
            minerals_lost: 60.0,
            damage_target: None,
            no_energy: true,
        }
        .apply(&mut colony);
        assert_eq!(colony.get_resources().get(MINERALS), 0.0);
        assert!(message.starts_with("Not enough Energy to attempt defense!"));
        assert!(message.contains("Lost 10.0 Minerals"));
    }

    #[test]
    fn test_resolve_rejects_unknown_choice() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut colony = Colony::new();
        let before = colony.get_resources().clone();

        let event = MajorEvent::new(EventKind::MeteorStrikeWarning);
        assert_eq!(event.resolve("surrender", &mut colony, &mut rng), None);
        assert_eq!(colony.get_resources(), &before);
    }

    #[test]
    fn test_resolve_prefixes_event_name() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut colony = Colony::new();
        let event = MajorEvent::new(EventKind::MeteorStrikeWarning);
        let message = event.resolve("brace", &mut colony, &mut rng).unwrap();
        assert!(message.starts_with("Meteor Strike Warning! - Braced for impact."));
    }
}
