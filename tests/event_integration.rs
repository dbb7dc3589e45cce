//! Event system integration tests - sessions, background events and meteors

use idle_colony::colony::{BuildingInstance, Colony};
use idle_colony::core::types::{ENERGY, MINERALS};
use idle_colony::core::SimulationConfig;
use idle_colony::events::{EventKind, MajorEvent, MeteorChoice, MeteorOutcome};
use idle_colony::simulation::ColonySession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn certain_events(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default().with_seed(seed);
    config.event_chance = 1.0;
    config
}

#[test]
fn test_meteor_presents_two_choices() {
    let event = MajorEvent::new(EventKind::MeteorStrikeWarning);
    let keys: Vec<&str> = event.choices.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["shoot_down", "brace"]);
    assert!(EventKind::MeteorStrikeWarning.is_major());
    assert!(!EventKind::SolarFlare.is_major());
}

#[test]
fn test_history_stays_bounded_over_long_runs() {
    let mut config = certain_events(5);
    config.max_history = 4;
    let mut session = ColonySession::new(config).unwrap();

    for _ in 0..50 {
        session.advance(10.0);
        if session.pending_event().is_some() {
            session.resolve_event("brace").unwrap();
        }
        assert!(session.colony().event_history().len() <= 4);
    }
    assert_eq!(session.colony().event_history().len(), 4);
}

#[test]
fn test_resources_never_negative_under_events() {
    let mut session = ColonySession::new(certain_events(11)).unwrap();
    for _ in 0..3 {
        session
            .colony_mut()
            .add_building(BuildingInstance::with_level("Mine", 2));
    }

    for _ in 0..200 {
        session.advance(10.0);
        if session.pending_event().is_some() {
            session.resolve_event("shoot_down");
        }
        for (_, amount) in session.colony().get_resources().iter() {
            assert!(amount >= 0.0);
        }
    }
}

#[test]
fn test_unaffordable_shoot_down_braces_instead() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut colony = Colony::new();
    colony.drain_resource(ENERGY, 1000.0);

    let outcome = MeteorOutcome::roll(MeteorChoice::ShootDown, &colony, &mut rng);
    assert!(matches!(outcome, MeteorOutcome::Impact { no_energy: true, .. }));

    let message = outcome.apply(&mut colony);
    assert!(message.starts_with("Not enough Energy"));
    assert!(colony.get_resources().get(MINERALS) < 50.0);
}

#[test]
fn test_braced_impact_hits_the_only_building() {
    let mut colony = Colony::new();
    colony.add_building(BuildingInstance::with_level("Solar Panel", 3));

    let outcome = MeteorOutcome::Impact {
        minerals_lost: 80.0,
        damage_target: Some(0),
        no_energy: false,
    };
    let message = outcome.apply(&mut colony);

    assert!(message.contains("damaged"));
    assert_eq!(colony.buildings()[0].level, 2);
    assert_eq!(colony.get_resources().get(MINERALS), 0.0);
}

#[test]
fn test_damage_single_level_one_building_destroys_it() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut colony = Colony::new();
    colony.add_building(BuildingInstance::new("Mine"));

    let message = colony.damage_random_building(&mut rng);
    assert!(message.contains("destroyed"));
    assert!(colony.buildings().is_empty());

    let message = colony.damage_random_building(&mut rng);
    assert!(message.contains("No buildings"));
}
