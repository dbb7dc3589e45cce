//! Idle Colony - Headless Runner
//!
//! Drives one colony session for a span of simulated time, resolving major
//! events with a fixed choice, then prints the final snapshot as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use idle_colony::colony::{Catalog, Colony};
use idle_colony::core::error::{ColonyError, Result};
use idle_colony::core::SimulationConfig;
use idle_colony::persistence;
use idle_colony::simulation::ColonySession;

/// Headless Idle Colony runner
#[derive(Parser, Debug)]
#[command(name = "idle-colony")]
#[command(about = "Run an idle colony for a span of simulated time and print the result")]
struct Args {
    /// Simulation config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Building and research catalog (TOML)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Resume from a saved colony (JSON)
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final colony here (JSON)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Simulated seconds per step
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Choice key used to resolve major events
    #[arg(long, default_value = "brace")]
    auto_choice: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("idle_colony=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    if !args.step.is_finite() || args.step <= 0.0 {
        return Err(ColonyError::InvalidConfig(format!(
            "step must be positive, got {}",
            args.step
        )));
    }

    let catalog = match &args.catalog {
        Some(path) => Arc::new(Catalog::load_from_toml(path)?),
        None => Catalog::shared_default(),
    };

    let colony = match &args.load {
        Some(path) => persistence::load_with_catalog(path, Arc::clone(&catalog)).unwrap_or_else(|| {
            tracing::warn!("starting a fresh colony instead");
            Colony::with_catalog(Arc::clone(&catalog))
        }),
        None => Colony::with_catalog(Arc::clone(&catalog)),
    };

    let mut session = ColonySession::with_colony(colony, config)?;
    tracing::info!(seconds = args.seconds, step = args.step, "Idle Colony starting...");

    let mut remaining = args.seconds;
    while remaining > 0.0 {
        let elapsed = remaining.min(args.step);
        remaining -= elapsed;

        if session.advance(elapsed).is_some() {
            if session.resolve_event(&args.auto_choice).is_none() {
                tracing::warn!(choice = %args.auto_choice, "choice not offered, falling back to the first option");
                let fallback = session
                    .pending_event()
                    .and_then(|event| event.choices.first())
                    .map(|choice| choice.key.clone());
                if let Some(key) = fallback {
                    session.resolve_event(&key);
                }
            }
        }
    }

    let colony = session.into_colony();
    println!("{}", persistence::to_json(&colony)?);

    if let Some(path) = &args.save {
        persistence::save(&colony, path)?;
    }

    Ok(())
}
