//! Error types for fuzzy-control.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("Invalid trapezoid: {reason}")]
    InvalidShape { reason: String },

    #[error("Invalid universe: {reason}")]
    InvalidUniverse { reason: String },

    #[error("Membership sets differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Term {term} is not defined on variable '{variable}'")]
    UnknownTerm { variable: String, term: String },

    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("Variable '{name}' is defined more than once")]
    DuplicateVariable { name: String },

    #[error("No crisp input was supplied for variable '{variable}'")]
    MissingInput { variable: String },

    #[error("Variable '{variable}' cannot be used as {expected}")]
    RoleMismatch { variable: String, expected: &'static str },

    #[error("No rule fired for output variable '{variable}'")]
    NoRuleFired { variable: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl FuzzyError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape { reason: reason.into() }
    }

    pub(crate) fn universe(reason: impl Into<String>) -> Self {
        Self::InvalidUniverse { reason: reason.into() }
    }
}
