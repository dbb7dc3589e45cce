//! Idle Colony - incremental colony simulation core
//!
//! A colony accumulates resources over caller-supplied time, constructs and
//! upgrades buildings, spends research points on unlocks, and reacts to
//! random events. Front-ends drive it through [`simulation::ColonySession`].

pub mod colony;
pub mod core;
pub mod events;
pub mod persistence;
pub mod simulation;

pub use crate::colony::Colony;
pub use crate::core::{ColonyError, Result, SimulationConfig};
pub use crate::simulation::ColonySession;
