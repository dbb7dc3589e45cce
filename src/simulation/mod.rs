//! Simulation driver - production ticks and the colony session

pub mod production;
pub mod session;

pub use production::{production_rates, tick_production};
pub use session::ColonySession;
