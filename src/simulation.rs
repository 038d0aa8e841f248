use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::{FuzzyError, Result};
use crate::inference::ControlSystem;
use crate::inputs::Inputs;
use crate::variable::Variable;

/// Wires a controller into a discrete-time feedback loop.
///
/// Each step feeds the scaled error to the setpoint and the scaled change
/// since the previous step into the controller, then adds the truncated
/// output to the state.
pub struct FeedbackLoop<E, D = E, O = E> {
    pub error: Variable<E>,
    pub delta: Variable<D>,
    pub output: Variable<O>,
}

impl<E, D, O> FeedbackLoop<E, D, O> {
    pub fn new(error: Variable<E>, delta: Variable<D>, output: Variable<O>) -> Self {
        Self { error, delta, output }
    }

    /// Runs `config.steps` steps and returns the whole trajectory, seeded
    /// with `config.initial`. Any inference failure aborts the run.
    pub fn run<T: Copy + Debug + Eq + Hash>(
        &self,
        system: &ControlSystem<T>,
        config: &SimulationConfig,
    ) -> Result<Vec<f64>> {
        config.validate()?;

        let mut trajectory = Vec::with_capacity(config.steps);

        if config.steps == 0 {
            return Ok(trajectory);
        }

        trajectory.push(config.initial);

        let mut inputs = Inputs::new();

        for i in 1..config.steps {
            let last = trajectory[i - 1];
            let error = (config.setpoint - last) / config.scale;
            // no history before the first step
            let delta = if i == 1 {
                0.
            } else {
                (last - trajectory[i - 2]) / config.scale
            };

            inputs.add(self.error, error);
            inputs.add(self.delta, delta);

            let output = system.compute(&inputs)?.get(self.output).ok_or_else(|| {
                FuzzyError::NoRuleFired {
                    variable: system
                        .variables()
                        .get(self.output)
                        .map_or_else(|| format!("{:?}", self.output.key()), |var| var.name().to_owned()),
                }
            })?;
            let next = last + output.trunc();

            debug!(step = i, error, delta, output, next, "simulation step");
            trajectory.push(next);
        }

        Ok(trajectory)
    }
}
