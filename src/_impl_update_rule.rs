use crate::state_space::State;
use crate::UpdateRule::*;
use crate::{BinaryOp, BooleanNetwork, UpdateRule, VariableId};
use std::collections::HashSet;

/// Constructor and destructor utility methods. These mainly avoid unnecessary boxing
/// and exhaustive pattern matching when not necessary.
impl UpdateRule {
    /// Create a `true` formula.
    pub fn mk_true() -> UpdateRule {
        Const(true)
    }

    /// Create a `false` formula.
    pub fn mk_false() -> UpdateRule {
        Const(false)
    }

    /// Create an `x` formula where `x` is a Boolean variable.
    pub fn mk_var(id: VariableId) -> UpdateRule {
        Var(id)
    }

    /// Create a `!phi` formula, where `phi` is an inner `UpdateRule`.
    pub fn mk_not(inner: UpdateRule) -> UpdateRule {
        Not(Box::new(inner))
    }

    /// Create a `phi 'op' psi` where `phi` and `psi` are arguments of `op` operator.
    pub fn mk_binary(op: BinaryOp, left: UpdateRule, right: UpdateRule) -> UpdateRule {
        Binary(op, Box::new(left), Box::new(right))
    }

    /// Create a conjunction.
    pub fn and(self, other: UpdateRule) -> UpdateRule {
        UpdateRule::mk_binary(BinaryOp::And, self, other)
    }

    /// Create a disjunction.
    pub fn or(self, other: UpdateRule) -> UpdateRule {
        UpdateRule::mk_binary(BinaryOp::Or, self, other)
    }

    /// If `Const`, return the value, otherwise return `None`.
    pub fn as_const(&self) -> Option<bool> {
        match self {
            Const(value) => Some(*value),
            _ => None,
        }
    }

    /// If `Var`, return the id, otherwise return `None`.
    pub fn as_var(&self) -> Option<VariableId> {
        match self {
            Var(value) => Some(*value),
            _ => None,
        }
    }
}

/// Other utility methods.
impl UpdateRule {
    /// Return a sorted vector of all variables that are actually used as inputs in this rule.
    pub fn collect_arguments(&self) -> Vec<VariableId> {
        fn r_arguments(rule: &UpdateRule, args: &mut HashSet<VariableId>) {
            match rule {
                Const(_) => (),
                Var(id) => {
                    args.insert(*id);
                }
                Not(inner) => r_arguments(inner, args),
                Binary(_, l, r) => {
                    r_arguments(l, args);
                    r_arguments(r, args);
                }
            };
        }
        let mut args = HashSet::new();
        r_arguments(self, &mut args);
        let mut result: Vec<VariableId> = args.into_iter().collect();
        result.sort();
        result
    }

    /// Convert this rule to a string, taking names from the provided `BooleanNetwork`.
    pub fn to_string(&self, context: &BooleanNetwork) -> String {
        match self {
            Const(value) => value.to_string(),
            Var(id) => context.get_variable_name(*id).to_string(),
            Not(inner) => format!("!{}", inner.to_string(context)),
            Binary(op, l, r) => {
                format!("({} {} {})", l.to_string(context), op, r.to_string(context))
            }
        }
    }

    /// Evaluate this rule in the given network `state`.
    ///
    /// Variable `i` reads bit `i` of the state. The state must be wide enough to contain
    /// every variable used by the rule.
    pub fn evaluate(&self, state: State) -> bool {
        match self {
            Const(value) => *value,
            Var(id) => state.get_bit(id.to_index()),
            Not(inner) => !inner.evaluate(state),
            Binary(BinaryOp::And, left, right) => left.evaluate(state) && right.evaluate(state),
            Binary(BinaryOp::Or, left, right) => left.evaluate(state) || right.evaluate(state),
            Binary(op, left, right) => op.apply(left.evaluate(state), right.evaluate(state)),
        }
    }

    /// Fold all constant sub-expressions of this rule.
    ///
    /// The result is equivalent to the original rule. A rule that does not depend on any
    /// variable (e.g. `a & !a` is *not* detected, but `a & false` is) becomes a single
    /// `Const` leaf.
    pub fn simplify_constants(&self) -> UpdateRule {
        match self {
            Const(_) | Var(_) => self.clone(),
            Not(inner) => {
                let inner = inner.simplify_constants();
                match inner.as_const() {
                    Some(value) => Const(!value),
                    None => UpdateRule::mk_not(inner),
                }
            }
            Binary(op, left, right) => {
                let left = left.simplify_constants();
                let right = right.simplify_constants();
                match (left.as_const(), right.as_const()) {
                    (Some(l), Some(r)) => Const(op.apply(l, r)),
                    (Some(c), None) => simplify_with_constant(*op, c, right, true),
                    (None, Some(c)) => simplify_with_constant(*op, c, left, false),
                    (None, None) => UpdateRule::mk_binary(*op, left, right),
                }
            }
        }
    }
}

/// **(internal)** Simplify `op` applied to a constant and a non-constant `other` rule.
/// Use `constant_is_left` to indicate the position of the constant (matters for `=>`).
fn simplify_with_constant(
    op: BinaryOp,
    constant: bool,
    other: UpdateRule,
    constant_is_left: bool,
) -> UpdateRule {
    match (op, constant) {
        (BinaryOp::And, false) => Const(false),
        (BinaryOp::And, true) => other,
        (BinaryOp::Or, true) => Const(true),
        (BinaryOp::Or, false) => other,
        (BinaryOp::Xor, false) | (BinaryOp::Iff, true) => other,
        (BinaryOp::Xor, true) | (BinaryOp::Iff, false) => UpdateRule::mk_not(other),
        (BinaryOp::Imp, value) => {
            if constant_is_left {
                // false => x is true, true => x is x
                if value {
                    other
                } else {
                    Const(true)
                }
            } else if value {
                // x => true is true
                Const(true)
            } else {
                // x => false is !x
                UpdateRule::mk_not(other)
            }
        }
    }
}
