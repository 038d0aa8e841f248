use crate::dsl::Expr;
use crate::variable::{Variable, VariableKey};

#[derive(Debug, Default)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds a rule concluding `term` of the `output` variable.
    pub fn add<I: Into<T>>(&mut self, label: impl Into<String>, premise: Expr<T>, output: Variable<I>, term: I) {
        self.0.push(Rule {
            label: label.into(),
            premise,
            consequence: (output.0, term.into()),
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }
}

#[derive(Clone, Debug)]
pub struct Rule<T> {
    pub(crate) label: String,
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: (VariableKey, T),
}

impl<T> Rule<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> (VariableKey, &T) {
        (self.consequence.0, &self.consequence.1)
    }
}
