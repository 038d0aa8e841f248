use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

#[derive(Debug)]
pub struct Outputs {
    defuzzificated: HashMap<VariableKey, f64>,
    aggregated: HashMap<VariableKey, Vec<f64>>,
    // (label, firing strength) in rule order
    activations: Vec<(String, f64)>,
}

impl Outputs {
    pub(crate) fn new(
        defuzzificated: HashMap<VariableKey, f64>,
        aggregated: HashMap<VariableKey, Vec<f64>>,
        activations: Vec<(String, f64)>,
    ) -> Self {
        Self {
            defuzzificated,
            aggregated,
            activations,
        }
    }

    /// The crisp (centroid) value inferred for `var`.
    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.defuzzificated.get(&var.0).copied()
    }

    /// The aggregated membership set of `var` over its universe.
    pub fn aggregated<I>(&self, var: Variable<I>) -> Option<&[f64]> {
        self.aggregated.get(&var.0).map(Vec::as_slice)
    }

    pub fn activations(&self) -> &[(String, f64)] {
        &self.activations
    }

    /// Firing strength of the first rule labelled `label`.
    pub fn activation(&self, label: &str) -> Option<f64> {
        self.activations
            .iter()
            .find_map(|(l, w)| if l == label { Some(*w) } else { None })
    }
}
