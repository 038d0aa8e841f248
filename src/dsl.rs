use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{FuzzyError, Result};
use crate::variable::{Variable, VariableKey, Variables};

/// A rule premise: `(variable, term)` leaves combined with AND (min),
/// OR (max) and NOT (`1 - x`).
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
    Not(Box<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn propositions(&self) -> Vec<(&VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(&'p VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<T: Copy + Debug + Eq + Hash> Expr<T> {
    /// Degree to which the premise holds given the fuzzified inputs.
    ///
    /// An empty AND is 1 and an empty OR is 0.
    pub fn evaluate(&self, vars: &Variables<T>, facts: &HashMap<VariableKey, HashMap<T, f64>>) -> Result<f64> {
        match self {
            Expr::Is(var_key, term) => {
                let var = vars.lookup(*var_key)?;
                let degrees = facts.get(var_key).ok_or_else(|| FuzzyError::MissingInput {
                    variable: var.name.clone(),
                })?;

                degrees.get(term).copied().ok_or_else(|| var.unknown_term(term))
            },
            Expr::And(exprs) => exprs
                .iter()
                .try_fold(1.0f64, |acc, expr| -> Result<f64> {
                    Ok(f64::min(acc, expr.evaluate(vars, facts)?))
                }),
            Expr::Or(exprs) => exprs
                .iter()
                .try_fold(0.0f64, |acc, expr| -> Result<f64> {
                    Ok(f64::max(acc, expr.evaluate(vars, facts)?))
                }),
            Expr::Not(expr) => Ok(1. - expr.evaluate(vars, facts)?),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}
