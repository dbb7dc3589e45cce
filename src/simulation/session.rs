//! Colony session - one colony driven by one caller
//!
//! The session owns the colony, its config, the RNG and the (at most one)
//! pending major event. It is the command surface front-ends talk to.
//! Time is always supplied by the caller; nothing here reads a clock.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::colony::state::Colony;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Seconds;
use crate::events::{self, EventKind, MajorEvent};
use crate::persistence::document::ColonyDocument;
use crate::simulation::production::tick_production;

/// Upper bound on event checks run by a single `advance` call
pub const MAX_CATCH_UP_CHECKS: u64 = 1_000;

#[derive(Debug)]
pub struct ColonySession<R = ChaCha8Rng> {
    colony: Colony,
    config: SimulationConfig,
    rng: R,
    pending: Option<MajorEvent>,
    /// Simulated seconds since the last scheduled event check
    since_event_check: Seconds,
}

impl ColonySession<ChaCha8Rng> {
    /// A fresh colony under `config`
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_colony(Colony::new(), config)
    }

    /// Drive an existing (e.g. loaded) colony, seeding from `config.seed`
    pub fn with_colony(colony: Colony, config: SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(colony, config, rng)
    }
}

impl<R: Rng> ColonySession<R> {
    /// Drive a colony with an injected RNG
    pub fn with_rng(mut colony: Colony, config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        colony.set_history_limit(config.max_history);
        Ok(Self {
            colony,
            config,
            rng,
            pending: None,
            since_event_check: 0.0,
        })
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    pub fn colony_mut(&mut self) -> &mut Colony {
        &mut self.colony
    }

    pub fn into_colony(self) -> Colony {
        self.colony
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    // === COMMANDS ===

    pub fn build(&mut self, kind: &str) -> Result<()> {
        self.colony.build(kind)
    }

    pub fn upgrade(&mut self, index: usize) -> bool {
        self.colony.upgrade_building(index)
    }

    pub fn research(&mut self, project_id: &str) -> bool {
        self.colony.research_project(project_id)
    }

    /// Apply `elapsed` seconds of production
    pub fn tick(&mut self, elapsed: Seconds) {
        tick_production(&mut self.colony, &self.config, elapsed);
    }

    /// Tick production and run the event checks whose interval boundary
    /// was crossed, at most [`MAX_CATCH_UP_CHECKS`] per call. Checking stops
    /// once a major event is pending.
    pub fn advance(&mut self, elapsed: Seconds) -> Option<&MajorEvent> {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return self.pending.as_ref();
        }

        self.tick(elapsed);
        self.since_event_check += elapsed;

        let interval = self.config.event_check_interval;
        if self.since_event_check < interval {
            return self.pending.as_ref();
        }

        let due = (self.since_event_check / interval).floor();
        self.since_event_check %= interval;

        // Saturating cast; long catch-ups are capped
        let checks = (due as u64).min(MAX_CATCH_UP_CHECKS);
        for _ in 0..checks {
            if self.pending.is_some() {
                break;
            }
            self.trigger_event_check();
        }

        self.pending.as_ref()
    }

    /// Legacy turn mode: one second of production and a turn bump
    pub fn next_turn(&mut self) {
        self.tick(1.0);
        self.colony.advance_turn();
    }

    // === EVENTS ===

    /// Roll for a random event
    ///
    /// Returns the pending major event, if any. While one is outstanding it
    /// is returned again without rolling.
    pub fn trigger_event_check(&mut self) -> Option<&MajorEvent> {
        if self.pending.is_none() && self.rng.gen::<f64>() < self.config.event_chance {
            let kind = EventKind::ALL[self.rng.gen_range(0..EventKind::ALL.len())];
            self.pending = events::fire(kind, &mut self.colony, &mut self.rng);
        }
        self.pending.as_ref()
    }

    /// Fire a specific event kind, bypassing the chance roll
    ///
    /// Ignored while a major event is pending.
    pub fn force_event(&mut self, kind: EventKind) -> Option<&MajorEvent> {
        if self.pending.is_none() {
            self.pending = events::fire(kind, &mut self.colony, &mut self.rng);
        }
        self.pending.as_ref()
    }

    pub fn pending_event(&self) -> Option<&MajorEvent> {
        self.pending.as_ref()
    }

    /// Resolve the pending major event with one of its choice keys
    ///
    /// Returns the logged outcome. With nothing pending, or an unknown key,
    /// nothing changes and `None` is returned.
    pub fn resolve_event(&mut self, choice_key: &str) -> Option<String> {
        let event = self.pending.as_ref()?;
        let message = event.resolve(choice_key, &mut self.colony, &mut self.rng)?;

        tracing::info!(event = %event.name, choice = choice_key, "major event resolved");
        self.pending = None;
        self.colony.log(message.clone());
        Some(message)
    }

    /// The persisted-document view of the colony
    pub fn snapshot(&self) -> ColonyDocument {
        self.colony.to_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::building::BuildingInstance;
    use crate::core::types::{ENERGY, MINERALS};

    fn session(seed: u64) -> ColonySession {
        ColonySession::new(SimulationConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.event_chance = 2.0;
        assert!(ColonySession::new(config).is_err());
    }

    #[test]
    fn test_tick_applies_production() {
        let mut session = session(1);
        session.colony_mut().add_building(BuildingInstance::new("Mine"));
        session.tick(1.0);
        assert_eq!(session.colony().get_resources().get(MINERALS), 56.0);
    }

    #[test]
    fn test_no_events_when_chance_is_zero() {
        let mut config = SimulationConfig::default().with_seed(4);
        config.event_chance = 0.0;
        let mut session = ColonySession::new(config).unwrap();

        assert!(session.advance(600.0).is_none());
        assert!(session.colony().event_history().is_empty());
        assert!(session.trigger_event_check().is_none());
    }

    #[test]
    fn test_certain_events_fire_every_interval() {
        let mut config = SimulationConfig::default().with_seed(4);
        config.event_chance = 1.0;
        let mut session = ColonySession::new(config).unwrap();

        // Under the interval: no checks yet
        session.advance(9.0);
        assert!(session.colony().event_history().is_empty());

        session.advance(1.0);
        let logged = session.colony().event_history().len();
        assert_eq!(logged, 1);
    }

    #[test]
    fn test_pending_major_blocks_new_events() {
        let mut config = SimulationConfig::default().with_seed(9);
        config.event_chance = 1.0;
        let mut session = ColonySession::new(config).unwrap();

        let pending = session.force_event(EventKind::MeteorStrikeWarning).cloned();
        assert!(pending.is_some());
        let history_len = session.colony().event_history().len();

        // Checks while pending return the same event and log nothing
        assert_eq!(session.trigger_event_check().cloned(), pending);
        session.advance(100.0);
        assert_eq!(session.colony().event_history().len(), history_len);
        assert_eq!(session.pending_event().cloned(), pending);
    }

    #[test]
    fn test_resolve_event_lifecycle() {
        let mut session = session(21);
        assert_eq!(session.resolve_event("brace"), None);

        session.force_event(EventKind::MeteorStrikeWarning);
        assert_eq!(session.resolve_event("hide"), None);
        assert!(session.pending_event().is_some());

        let message = session.resolve_event("shoot_down").unwrap();
        assert!(session.pending_event().is_none());
        assert_eq!(session.colony().event_history().latest(), Some(message.as_str()));
        assert!(session.colony().get_resources().get(ENERGY) <= 60.0);

        assert_eq!(session.resolve_event("shoot_down"), None);
    }

    #[test]
    fn test_background_event_is_not_pending() {
        let mut session = session(2);
        assert!(session.force_event(EventKind::SolarFlare).is_none());
        assert!(session
            .colony()
            .event_history()
            .latest()
            .unwrap()
            .starts_with("Solar Flare"));
    }

    #[test]
    fn test_next_turn_bumps_counter() {
        let mut session = session(3);
        session.next_turn();
        assert_eq!(session.colony().turn_number(), 2);
        assert_eq!(session.colony().get_resources().get(MINERALS), 51.0);
    }

    #[test]
    fn test_huge_catch_up_returns() {
        let mut config = SimulationConfig::default().with_seed(6);
        config.event_chance = 0.0;
        let mut session = ColonySession::new(config).unwrap();

        assert!(session.advance(1e20).is_none());
        assert!(session.since_event_check < session.config().event_check_interval);
        assert!(session.colony().get_resources().get(MINERALS).is_finite());
    }

    #[test]
    fn test_catch_up_checks_are_capped() {
        let mut config = SimulationConfig::default().with_seed(6);
        config.event_chance = 1.0;
        config.max_history = 5_000;
        let mut session = ColonySession::new(config).unwrap();

        // At most one history line per check
        session.advance(1e9);
        assert!(session.colony().event_history().len() as u64 <= MAX_CATCH_UP_CHECKS);
    }

    #[test]
    fn test_debug_names_the_session() {
        let session = session(1);
        assert!(format!("{:?}", session).starts_with("ColonySession"));
    }

    #[test]
    fn test_same_seed_same_story() {
        let mut config = SimulationConfig::default().with_seed(77);
        config.event_chance = 0.5;

        let mut a = ColonySession::new(config.clone()).unwrap();
        let mut b = ColonySession::new(config).unwrap();
        for _ in 0..30 {
            a.advance(10.0);
            b.advance(10.0);
            if a.pending_event().is_some() {
                a.resolve_event("brace");
                b.resolve_event("brace");
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
