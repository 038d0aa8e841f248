//! Trapezoidal fuzzy sets, Zadeh set operators and a small Mamdani controller.
//!
//! ```
//! use fuzzy_control::{ops, Trapezoid, Universe};
//!
//! let x = Universe::linspace(-1., 1., 41)?;
//! let a = Trapezoid::new([-1.0, -1.0, -0.9, -0.2])?.membership_set(&x);
//! let b = Trapezoid::new([-0.6, -0.5, 0.0, 0.1])?.membership_set(&x);
//! let not_a_or_b = ops::complement(&ops::union(&a, &b)?);
//!
//! assert_eq!(a[0], 1.);
//! assert_eq!(not_a_or_b[40], 1.);
//! # Ok::<(), fuzzy_control::FuzzyError>(())
//! ```

pub mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
pub mod ops;
mod outputs;
mod rules;
mod simulation;
mod terms;
mod trapezoid;
mod universe;
mod variable;

pub use config::{SimulationConfig, SystemConfig};
pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::ControlSystem;
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use simulation::FeedbackLoop;
pub use terms::{Key, Term, Terms};
pub use trapezoid::{membership_set, Trapezoid};
pub use universe::{Universe, MAX_SAMPLES};
pub use variable::{LinguisticVariable, Role, Variable, VariableKey, Variables};
