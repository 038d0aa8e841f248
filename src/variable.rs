use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::Deserialize;
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::terms::{Term, Terms};
use crate::trapezoid::Trapezoid;
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// A typed handle to a variable whose terms are drawn from `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub(crate) fn new(key: VariableKey) -> Self {
        Variable(key, PhantomData)
    }

    pub fn key(&self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Debug for Variable<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

/// Direction of data flow through a variable.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Takes a crisp input and yields term degrees
    Antecedent,
    /// Receives an aggregated set and yields a crisp output
    Consequent,
}

impl Role {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Role::Antecedent => "an antecedent",
            Role::Consequent => "a consequent",
        }
    }
}

#[derive(Debug, Default)]
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T: Copy + Debug + Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn add_antecedent<I: Into<T> + Term>(
        &mut self,
        name: impl Into<String>,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        self.add(name, Role::Antecedent, universe, terms)
    }

    pub fn add_consequent<I: Into<T> + Term>(
        &mut self,
        name: impl Into<String>,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        self.add(name, Role::Consequent, universe, terms)
    }

    pub fn add<I: Into<T> + Term>(
        &mut self,
        name: impl Into<String>,
        role: Role,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        let shapes = terms.0.iter().map(|(k, v)| (k.into(), *v));
        let key = self.insert(name.into(), role, universe, shapes)?;

        Ok(Variable::new(key))
    }

    pub(crate) fn insert(
        &mut self,
        name: String,
        role: Role,
        universe: Universe,
        shapes: impl IntoIterator<Item = (T, Trapezoid)>,
    ) -> Result<VariableKey> {
        if self.key_by_name(&name).is_some() {
            return Err(FuzzyError::DuplicateVariable { name });
        }

        Ok(self.0.insert(LinguisticVariable::new(name, role, universe, shapes)))
    }

    pub fn key_by_name(&self, name: &str) -> Option<VariableKey> {
        self.0
            .iter()
            .find_map(|(key, var)| if var.name == name { Some(key) } else { None })
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.0.get(var.0)
    }

    pub(crate) fn lookup(&self, key: VariableKey) -> Result<&LinguisticVariable<T>> {
        self.0.get(key).ok_or_else(|| FuzzyError::UnknownVariable {
            name: format!("{key:?}"),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named universe plus the membership function of each of its terms.
#[derive(Debug)]
pub struct LinguisticVariable<T> {
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) universe: Universe,
    pub(crate) shapes: HashMap<T, Trapezoid>,
    // each term sampled over the universe
    pub(crate) terms: HashMap<T, Vec<f64>>,
}

impl<T: Copy + Debug + Eq + Hash> LinguisticVariable<T> {
    fn new(
        name: String,
        role: Role,
        universe: Universe,
        shapes: impl IntoIterator<Item = (T, Trapezoid)>,
    ) -> Self {
        let shapes: HashMap<_, _> = shapes.into_iter().collect();
        let terms = shapes
            .iter()
            .map(|(term, shape)| (*term, shape.membership_set(&universe)))
            .collect();

        Self {
            name,
            role,
            universe,
            shapes,
            terms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn shape(&self, term: &T) -> Result<&Trapezoid> {
        self.shapes.get(term).ok_or_else(|| self.unknown_term(term))
    }

    /// The term's membership set over this variable's universe.
    pub fn membership(&self, term: &T) -> Result<&[f64]> {
        self.terms
            .get(term)
            .map(Vec::as_slice)
            .ok_or_else(|| self.unknown_term(term))
    }

    /// Degree of every term at `crisp`, using the scalar evaluator.
    pub fn fuzzify(&self, crisp: f64) -> HashMap<T, f64> {
        self.shapes
            .iter()
            .map(|(term, shape)| (*term, shape.membership(crisp)))
            .collect()
    }

    pub(crate) fn unknown_term(&self, term: &T) -> FuzzyError {
        FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: format!("{term:?}"),
        }
    }

    pub(crate) fn expect_role(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(FuzzyError::RoleMismatch {
                variable: self.name.clone(),
                expected: role.describe(),
            })
        }
    }
}
