use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::{centroid, union_assign};
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{Role, Variable, VariableKey, Variables};

/// A Mamdani controller: min implication, max aggregation and centroid
/// defuzzification over a fixed set of variables and rules.
#[derive(Debug)]
pub struct ControlSystem<T> {
    vars: Variables<T>,
    rules: Rules<T>,
}

impl<T: Copy + Debug + Eq + Hash> ControlSystem<T> {
    /// Checks every rule against the variables it mentions. Premises may only
    /// read antecedents and conclusions may only target consequents, and every
    /// term must have a shape on its variable.
    pub fn new(vars: Variables<T>, rules: Rules<T>) -> Result<Self> {
        for rule in rules.iter() {
            for (var_key, term) in rule.premise.propositions() {
                let var = vars.lookup(*var_key)?;

                var.expect_role(Role::Antecedent)?;
                var.shape(term)?;
            }

            let (var_key, term) = &rule.consequence;
            let var = vars.lookup(*var_key)?;

            var.expect_role(Role::Consequent)?;
            var.shape(term)?;
        }

        Ok(Self { vars, rules })
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.vars
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    /// Looks a variable up by name. The caller picks the term type of the handle.
    pub fn variable<I>(&self, name: &str) -> Option<Variable<I>> {
        self.vars.key_by_name(name).map(Variable::new)
    }

    pub fn compute(&self, inputs: &Inputs) -> Result<Outputs> {
        // Inputs naming no variable of this system
        if let Some(key) = inputs.0.keys().filter(|key| !self.vars.0.contains_key(**key)).min() {
            return Err(FuzzyError::UnknownVariable {
                name: format!("{key:?}"),
            });
        }

        // Fuzzificate crisp facts, in variable order
        let mut facts = HashMap::with_capacity(inputs.0.len());

        for (key, var) in self.vars.0.iter() {
            if let Some(value) = inputs.0.get(&key) {
                var.expect_role(Role::Antecedent)?;
                facts.insert(key, var.fuzzify(*value));
            }
        }

        // Fire rules, clip their conclusions and aggregate per output variable
        let mut activations = Vec::with_capacity(self.rules.len());
        let mut aggregated: HashMap<VariableKey, Vec<f64>> = HashMap::new();
        let mut output_order = Vec::new();

        for rule in self.rules.iter() {
            let strength = rule.premise.evaluate(&self.vars, &facts)?;
            let (var_key, term) = &rule.consequence;
            let membership = self.vars.lookup(*var_key)?.membership(term)?;
            let clipped: Vec<f64> = membership.iter().map(|m| f64::min(strength, *m)).collect();

            trace!(rule = %rule.label, strength, "rule fired");

            let agg = aggregated.entry(*var_key).or_insert_with(|| {
                output_order.push(*var_key);
                vec![0.; clipped.len()]
            });

            union_assign(agg, &clipped)?;
            activations.push((rule.label.clone(), strength));
        }

        // Defuzzificate
        let mut defuzzificated = HashMap::with_capacity(aggregated.len());

        for var_key in output_order {
            let var = self.vars.lookup(var_key)?;
            let value = centroid(var.universe.as_slice(), aggregated[&var_key].as_slice()).ok_or_else(|| {
                FuzzyError::NoRuleFired {
                    variable: var.name.clone(),
                }
            })?;

            debug!(variable = %var.name, value, "defuzzificated output");
            defuzzificated.insert(var_key, value);
        }

        Ok(Outputs::new(defuzzificated, aggregated, activations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{Key, Terms};
    use crate::universe::Universe;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Score {
        High,
        Low,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Ratio {
        Good,
        Bad,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Credit {
        Good,
        Bad,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Decision {
        Approve,
        Reject,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    enum VarTerms {
        Score(Score),
        Ratio(Ratio),
        Credit(Credit),
        Decision(Decision),
    }

    impl From<Decision> for VarTerms {
        fn from(d: Decision) -> Self {
            Self::Decision(d)
        }
    }

    impl From<Score> for VarTerms {
        fn from(s: Score) -> Self {
            Self::Score(s)
        }
    }

    impl From<Ratio> for VarTerms {
        fn from(r: Ratio) -> Self {
            Self::Ratio(r)
        }
    }

    impl From<Credit> for VarTerms {
        fn from(c: Credit) -> Self {
            Self::Credit(c)
        }
    }

    struct BankLoan {
        score: Variable<Score>,
        ratio: Variable<Ratio>,
        credit: Variable<Credit>,
        decision: Variable<Decision>,
        vars: Variables<VarTerms>,
    }

    fn bank_loan() -> BankLoan {
        let mut score_terms = Terms::new();
        let mut ratio_terms = Terms::new();
        let mut credit_terms = Terms::new();
        let mut decision_terms = Terms::new();

        score_terms.insert_points(Score::High, [175., 190., 200., 200.]).unwrap();
        score_terms.insert_points(Score::Low, [150., 150., 160., 175.]).unwrap();
        ratio_terms.insert_points(Ratio::Good, [0.1, 0.1, 0.3, 0.42]).unwrap();
        ratio_terms.insert_points(Ratio::Bad, [0.44, 0.7, 1., 1.]).unwrap();
        credit_terms.insert_points(Credit::Good, [0., 0., 2., 5.]).unwrap();
        credit_terms.insert_points(Credit::Bad, [5., 8., 10., 10.]).unwrap();
        decision_terms.insert_points(Decision::Approve, [5., 8., 10., 10.]).unwrap();
        decision_terms.insert_points(Decision::Reject, [0., 0., 2., 5.]).unwrap();

        let mut vars = Variables::<VarTerms>::new();
        let score = vars
            .add_antecedent("score", Universe::arange(150., 200., 1.).unwrap(), score_terms)
            .unwrap();
        let ratio = vars
            .add_antecedent("ratio", Universe::linspace(0.1, 1., 91).unwrap(), ratio_terms)
            .unwrap();
        let credit = vars
            .add_antecedent("credit", Universe::linspace(0., 10., 101).unwrap(), credit_terms)
            .unwrap();
        let decision = vars
            .add_consequent("decision", Universe::linspace(0., 10., 101).unwrap(), decision_terms)
            .unwrap();

        BankLoan {
            score,
            ratio,
            credit,
            decision,
            vars,
        }
    }

    #[test]
    fn test_bank_loan() {
        let BankLoan {
            score,
            ratio,
            credit,
            decision,
            vars,
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add(
            "approve",
            score
                .is(Score::High)
                .and2(ratio.is(Ratio::Good), credit.is(Credit::Good)),
            decision,
            Decision::Approve,
        );
        rules.add(
            "reject",
            score
                .is(Score::Low)
                .and(ratio.is(Ratio::Bad))
                .or(credit.is(Credit::Bad)),
            decision,
            Decision::Reject,
        );

        let mut inputs = Inputs::new();

        inputs.add(score, 190.);
        inputs.add(ratio, 0.39);
        inputs.add(credit, 1.5);

        let model = ControlSystem::new(vars, rules).unwrap();
        let outputs = model.compute(&inputs).unwrap();
        let approve = outputs.activation("approve").unwrap();
        let value = outputs.get(decision).unwrap();

        assert!((approve - 0.25).abs() < 1e-12);
        assert_eq!(outputs.activation("reject"), Some(0.));
        assert!((value - 7.70827389443652).abs() < 1e-9, "{value}");
        assert_eq!(outputs.aggregated(decision).map(<[f64]>::len), Some(101));
        assert!(outputs
            .aggregated(decision)
            .unwrap()
            .iter()
            .all(|m| *m <= approve));
    }

    #[test]
    fn test_no_rule_fired() {
        let BankLoan {
            score,
            ratio,
            credit,
            decision,
            vars,
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add("approve", score.is(Score::High).and(ratio.is(Ratio::Good)), decision, Decision::Approve);

        let model = ControlSystem::new(vars, rules).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(score, 160.);
        inputs.add(ratio, 0.39);
        inputs.add(credit, 1.5);

        assert_eq!(
            model.compute(&inputs).unwrap_err(),
            FuzzyError::NoRuleFired {
                variable: "decision".into()
            }
        );
    }

    #[test]
    fn test_not_and_missing_input() {
        let BankLoan {
            score,
            ratio,
            credit,
            decision,
            vars,
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add("reject", credit.is(Credit::Good).not(), decision, Decision::Reject);
        rules.add("approve", score.is(Score::High).or(ratio.is(Ratio::Good)), decision, Decision::Approve);

        let model = ControlSystem::new(vars, rules).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(credit, 3.5);

        // ratio and score were never supplied
        assert_eq!(
            model.compute(&inputs).unwrap_err(),
            FuzzyError::MissingInput {
                variable: "score".into()
            }
        );

        inputs.add(score, 190.);
        inputs.add(ratio, 0.5);

        let outputs = model.compute(&inputs).unwrap();

        assert!((outputs.activation("reject").unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(outputs.activation("approve"), Some(1.));
    }

    #[test]
    fn test_rule_validation() {
        let BankLoan {
            score,
            decision,
            vars,
            ..
        } = bank_loan();

        let mut rules = Rules::new();
        rules.add("backwards", decision.is(Decision::Approve), decision, Decision::Approve);

        assert!(matches!(
            ControlSystem::new(vars, rules),
            Err(FuzzyError::RoleMismatch { .. })
        ));

        let BankLoan { vars, .. } = bank_loan();
        let mut rules = Rules::new();
        rules.add("to an input", score.is(Score::High), score, Score::Low);

        assert!(matches!(
            ControlSystem::new(vars, rules),
            Err(FuzzyError::RoleMismatch { .. })
        ));
    }

    #[test]
    fn test_rules_on_one_term_combine_by_max() {
        let BankLoan {
            score,
            credit,
            decision,
            vars,
            ..
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add("by score", score.is(Score::High), decision, Decision::Approve);
        rules.add("by credit", credit.is(Credit::Good), decision, Decision::Approve);

        let model = ControlSystem::new(vars, rules).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(score, 182.5);
        inputs.add(credit, 2.75);

        let outputs = model.compute(&inputs).unwrap();
        let aggregated = outputs.aggregated(decision).unwrap();

        assert_eq!(outputs.activation("by score"), Some(0.5));
        assert_eq!(outputs.activation("by credit"), Some(0.75));
        assert_eq!(aggregated.iter().copied().fold(0., f64::max), 0.75);

        // Same as the stronger rule on its own
        let BankLoan {
            credit: alone_credit,
            decision: alone_decision,
            vars,
            ..
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add("by credit", alone_credit.is(Credit::Good), alone_decision, Decision::Approve);

        let model = ControlSystem::new(vars, rules).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(alone_credit, 2.75);

        let alone = model.compute(&inputs).unwrap();

        assert_eq!(alone.aggregated(alone_decision), Some(aggregated));
        assert_eq!(alone.get(alone_decision), outputs.get(decision));
    }

    #[test]
    fn test_invalid_inputs_fail_in_variable_order() {
        let BankLoan {
            score,
            decision,
            vars,
            ..
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add("approve", score.is(Score::High), decision, Decision::Approve);

        let model = ControlSystem::new(vars, rules).unwrap();
        let mut stray = Variables::<VarTerms>::new();
        let mut unknown = None;

        // Past the last key `model` knows
        for i in 0..5 {
            let universe = Universe::linspace(0., 1., 2).unwrap();

            unknown = Some(stray.insert(format!("stray {i}"), Role::Antecedent, universe, []).unwrap());
        }

        let unknown = Variable::<Score>::new(unknown.unwrap());

        for _ in 0..8 {
            let mut inputs = Inputs::new();

            inputs.add(score, 190.);
            inputs.add(decision, 3.);

            assert_eq!(
                model.compute(&inputs).unwrap_err(),
                FuzzyError::RoleMismatch {
                    variable: "decision".into(),
                    expected: "an antecedent"
                }
            );

            inputs.add(unknown, 0.5);

            assert!(matches!(
                model.compute(&inputs),
                Err(FuzzyError::UnknownVariable { .. })
            ));
        }
    }

    #[test]
    fn test_inputs_for_consequents_are_rejected() {
        let BankLoan {
            score,
            decision,
            vars,
            ..
        } = bank_loan();
        let mut rules = Rules::new();

        rules.add("approve", score.is(Score::High), decision, Decision::Approve);

        let model = ControlSystem::new(vars, rules).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(score, 190.);
        inputs.add(decision, 3.);

        assert!(matches!(
            model.compute(&inputs),
            Err(FuzzyError::RoleMismatch { .. })
        ));
    }
}
