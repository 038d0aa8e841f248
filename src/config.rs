//! Declarative descriptions of control systems and simulation runs.
//!
//! Everything here derives `serde::Deserialize`, so a controller can be
//! described in any serde format and turned into a validated
//! [`ControlSystem`] with [`SystemConfig::build`]. Term vocabularies stay
//! typed: `T` is usually a unit-variant enum deserialized from its name.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Deserialize;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inference::ControlSystem;
use crate::rules::{Rule, Rules};
use crate::trapezoid::Trapezoid;
use crate::universe::Universe;
use crate::variable::{Role, VariableKey, Variables};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum UniverseConfig {
    /// `min`, `min + step`, ... up to `max`
    Range { min: f64, max: f64, step: f64 },
    Linspace { min: f64, max: f64, samples: usize },
    Points(Vec<f64>),
}

impl UniverseConfig {
    pub fn build(&self) -> Result<Universe> {
        match self {
            Self::Range { min, max, step } => Universe::arange(*min, *max, *step),
            Self::Linspace { min, max, samples } => Universe::linspace(*min, *max, *samples),
            Self::Points(points) => Universe::from_points(points.clone()),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TermConfig<T> {
    pub term: T,
    /// Trapezoid breakpoints; exactly four are required
    pub shape: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VariableConfig<T> {
    pub name: String,
    pub role: Role,
    pub universe: UniverseConfig,
    pub terms: Vec<TermConfig<T>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PropositionConfig<T> {
    pub variable: String,
    pub term: T,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ExprConfig<T> {
    Is(PropositionConfig<T>),
    And(Vec<ExprConfig<T>>),
    Or(Vec<ExprConfig<T>>),
    Not(Box<ExprConfig<T>>),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RuleConfig<T> {
    pub label: String,
    pub antecedent: ExprConfig<T>,
    pub consequent: PropositionConfig<T>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SystemConfig<T> {
    pub variables: Vec<VariableConfig<T>>,
    pub rules: Vec<RuleConfig<T>>,
}

impl<T: Copy + Debug + Eq + Hash> SystemConfig<T> {
    pub fn build(&self) -> Result<ControlSystem<T>> {
        let mut vars = Variables::new();

        for var in &self.variables {
            let mut seen = HashSet::with_capacity(var.terms.len());
            let mut shapes = Vec::with_capacity(var.terms.len());

            for term in &var.terms {
                if !seen.insert(term.term) {
                    return Err(FuzzyError::InvalidConfig {
                        reason: format!("term {:?} is defined twice on '{}'", term.term, var.name),
                    });
                }
                shapes.push((term.term, Trapezoid::from_slice(&term.shape)?));
            }

            vars.insert(var.name.clone(), var.role, var.universe.build()?, shapes)?;
        }

        let mut rules = Rules::with_capacity(self.rules.len());

        for rule in &self.rules {
            let premise = rule.antecedent.resolve(&vars)?;
            let consequence = rule.consequent.resolve(&vars)?;

            rules.0.push(Rule {
                label: rule.label.clone(),
                premise,
                consequence,
            });
        }

        ControlSystem::new(vars, rules)
    }
}

impl<T: Copy + Debug + Eq + Hash> PropositionConfig<T> {
    fn resolve(&self, vars: &Variables<T>) -> Result<(VariableKey, T)> {
        let key = vars.key_by_name(&self.variable).ok_or_else(|| FuzzyError::UnknownVariable {
            name: self.variable.clone(),
        })?;

        Ok((key, self.term))
    }
}

impl<T: Copy + Debug + Eq + Hash> ExprConfig<T> {
    fn resolve(&self, vars: &Variables<T>) -> Result<Expr<T>> {
        let resolve_all = |exprs: &[ExprConfig<T>]| exprs.iter().map(|e| e.resolve(vars)).collect::<Result<Vec<_>>>();

        Ok(match self {
            Self::Is(prop) => {
                let (key, term) = prop.resolve(vars)?;
                Expr::Is(key, term)
            },
            Self::And(exprs) => Expr::And(resolve_all(exprs)?),
            Self::Or(exprs) => Expr::Or(resolve_all(exprs)?),
            Self::Not(expr) => expr.resolve(vars)?.not(),
        })
    }
}

/// Parameters of a closed-loop run. Missing fields take the defaults of the
/// temperature example: setpoint 140, initial 0, 100 steps, scale 200.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub setpoint: f64,
    pub initial: f64,
    pub steps: usize,
    /// Divides both the error and the delta before they reach the controller
    pub scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            setpoint: 140.,
            initial: 0.,
            steps: 100,
            scale: 200.,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale == 0. {
            return Err(FuzzyError::InvalidConfig {
                reason: format!("scale must be finite and non-zero, got {}", self.scale),
            });
        }
        if !self.setpoint.is_finite() || !self.initial.is_finite() {
            return Err(FuzzyError::InvalidConfig {
                reason: "setpoint and initial value must be finite".into(),
            });
        }

        Ok(())
    }
}
