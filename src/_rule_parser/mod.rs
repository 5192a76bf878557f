use crate::BinaryOp;

/// **(internal)** Convert `RuleTemp` back to a Boolean expression string.
mod _display_rule_temp;
/// **(internal)** `RuleTemp` parsing.
mod _from_string_for_rule_temp;
/// **(internal)** Implementation of `RuleTemp`.
mod _impl_rule_temp;

pub(crate) use _from_string_for_rule_temp::constant_value;

/// **(internal)** A helper enum for representing a parsed `UpdateRule` whose variable names
/// have not been resolved against a `BooleanNetwork` yet.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum RuleTemp {
    Const(bool),
    Var(String),
    Not(Box<RuleTemp>),
    Binary(BinaryOp, Box<RuleTemp>, Box<RuleTemp>),
}
