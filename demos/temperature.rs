//! Drives the temperature controller towards its setpoint and prints the
//! trajectory, one value per line.
//!
//! Run with `RUST_LOG=fuzzy_control=debug` to trace every step.

use fuzzy_control::{FeedbackLoop, FuzzyError, SimulationConfig, SystemConfig};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Level {
    Nb,
    Ns,
    Ze,
    Ps,
    Pb,
}

const CONFIG: &str = include_str!("temperature.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config: SystemConfig<Level> = serde_json::from_str(CONFIG)?;
    let system = config.build()?;
    let handle = |name: &str| {
        system
            .variable::<Level>(name)
            .ok_or_else(|| FuzzyError::UnknownVariable { name: name.into() })
    };
    let feedback = FeedbackLoop::new(handle("error")?, handle("delta")?, handle("temp")?);
    let sim = match std::env::args().nth(1) {
        Some(steps) => SimulationConfig {
            steps: steps.parse()?,
            ..Default::default()
        },
        None => SimulationConfig::default(),
    };

    for value in feedback.run(&system, &sim)? {
        println!("{value}");
    }

    Ok(())
}
