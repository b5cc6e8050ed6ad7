//! Condition compilation and per-attempt evaluation.

use rand::{Rng, RngExt};
use smallvec::SmallVec;

use crate::error::RuleError;
use crate::expr::{Bindings, BoolExpr, CompiledExpr, EvalEnv, NumExpr};
use crate::template::Condition;

/// One compiled condition, classified at compile time.
#[derive(Debug, Clone)]
enum CompiledCondition {
    /// `Always(false)`: the rule can never fire.
    Fail,
    /// A constant probability, sampled per attempt.
    Chance(f64),
    /// A boolean expression, re-evaluated per attempt.
    Gate(BoolExpr),
    /// A numeric expression sampled as a probability per attempt.
    Sample(NumExpr),
}

/// A rule's full condition list, compiled.
///
/// Evaluation is left to right and short-circuits on the first failing
/// gate or failed roll; every probability is sampled independently on
/// every attempt. An empty list is the trivial always-true predicate.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompiledConditions {
    conditions: SmallVec<[CompiledCondition; 2]>,
}

impl CompiledConditions {
    /// Classify and compile `conditions` against the rule's bindings.
    ///
    /// `Always(true)` entries are dropped (pure pass-through); constant
    /// probabilities outside `[0, 1]` are configuration errors.
    pub fn compile(
        conditions: &[Condition],
        bindings: &Bindings<'_>,
    ) -> Result<Self, RuleError> {
        let mut compiled = SmallVec::new();
        for condition in conditions {
            match condition {
                Condition::Always(true) => {}
                Condition::Always(false) => compiled.push(CompiledCondition::Fail),
                Condition::Chance(p) => {
                    if !p.is_finite() || !(0.0..=1.0).contains(p) {
                        return Err(RuleError::InvalidChance { value: *p });
                    }
                    compiled.push(CompiledCondition::Chance(*p));
                }
                Condition::Expr(text) => {
                    let expr = CompiledExpr::compile(text, bindings)?;
                    compiled.push(match expr {
                        CompiledExpr::Gate(e) => CompiledCondition::Gate(e),
                        CompiledExpr::Chance(e) => CompiledCondition::Sample(e),
                    });
                }
            }
        }
        Ok(Self {
            conditions: compiled,
        })
    }

    /// Evaluate the whole list for one attempt.
    pub fn eval<R: Rng>(&self, env: &EvalEnv<'_>, rng: &mut R) -> bool {
        for condition in &self.conditions {
            let pass = match condition {
                CompiledCondition::Fail => false,
                CompiledCondition::Chance(p) => rng.random::<f64>() < *p,
                CompiledCondition::Gate(e) => e.eval(env),
                // Expression results are clamped into [0, 1]; values at or
                // beyond the endpoints behave as never/always.
                CompiledCondition::Sample(e) => {
                    let p = e.eval(env).clamp(0.0, 1.0);
                    rng.random::<f64>() < p
                }
            };
            if !pass {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::layouts;
    use crate::template::Shape;
    use loam_core::{Alphabet, TraitSet};
    use loam_grid::Lattice;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn harness() -> (Alphabet, TraitSet, Lattice) {
        let alphabet = Alphabet::new([' ', '~']).unwrap();
        let traits = TraitSet::default();
        let lattice = Lattice::new(3, 3, ' ').unwrap();
        (alphabet, traits, lattice)
    }

    fn compile(conditions: &[Condition]) -> Result<CompiledConditions, RuleError> {
        let (alphabet, traits, _) = harness();
        let [layout, _] = layouts(Shape::Single);
        let bindings = Bindings {
            layout,
            traits: &traits,
            alphabet: &alphabet,
        };
        CompiledConditions::compile(conditions, &bindings)
    }

    fn eval(conditions: &[Condition], seed: u64) -> bool {
        let (_, traits, lattice) = harness();
        let [layout, _] = layouts(Shape::Single);
        let env = EvalEnv {
            lattice: &lattice,
            traits: &traits,
            boundary: ' ',
            x: 1,
            y: 1,
            layout,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        compile(conditions).unwrap().eval(&env, &mut rng)
    }

    #[test]
    fn empty_list_always_passes() {
        assert!(eval(&[], 0));
    }

    #[test]
    fn constant_true_is_dropped() {
        let compiled = compile(&[Condition::Always(true)]).unwrap();
        assert!(compiled.conditions.is_empty());
    }

    #[test]
    fn constant_false_always_fails() {
        for seed in 0..8 {
            assert!(!eval(&[Condition::Always(false)], seed));
        }
    }

    #[test]
    fn chance_endpoints() {
        for seed in 0..8 {
            assert!(eval(&[Condition::Chance(1.0)], seed));
            assert!(!eval(&[Condition::Chance(0.0)], seed));
        }
    }

    #[test]
    fn chance_out_of_range_rejected() {
        assert_eq!(
            compile(&[Condition::Chance(1.5)]).unwrap_err(),
            RuleError::InvalidChance { value: 1.5 }
        );
        assert!(compile(&[Condition::Chance(-0.1)]).is_err());
        assert!(compile(&[Condition::Chance(f64::NAN)]).is_err());
    }

    #[test]
    fn gate_expression_gates() {
        assert!(eval(&[Condition::Expr("c == ' '".into())], 0));
        assert!(!eval(&[Condition::Expr("c == '~'".into())], 0));
    }

    #[test]
    fn numeric_expression_is_sampled() {
        // count(' ') == 9 on an all-blank grid; 9 clamps to probability 1.
        for seed in 0..8 {
            assert!(eval(&[Condition::Expr("count(' ')".into())], seed));
            assert!(!eval(&[Condition::Expr("count('~')".into())], seed));
        }
    }

    #[test]
    fn first_failure_wins() {
        assert!(!eval(
            &[
                Condition::Always(false),
                Condition::Expr("count(' ') > 0".into()),
            ],
            0
        ));
        assert!(eval(
            &[
                Condition::Expr("count(' ') > 0".into()),
                Condition::Chance(1.0),
            ],
            0
        ));
    }
}
