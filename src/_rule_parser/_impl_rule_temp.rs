use crate::_rule_parser::RuleTemp;
use crate::_rule_parser::RuleTemp::*;
use crate::{UpdateRule, ValidationError, VariableId};
use fxhash::FxHashMap;
use std::collections::HashSet;

impl RuleTemp {
    /// Write all variable names that appear in the rule to the given set.
    pub fn dump_variables(&self, result: &mut HashSet<String>) {
        match self {
            Binary(_, l, r) => {
                l.dump_variables(result);
                r.dump_variables(result)
            }
            Not(inner) => inner.dump_variables(result),
            Var(name) => {
                result.insert(name.clone());
            }
            Const(_) => {}
        }
    }

    /// Safely build an actual update rule by resolving variable names using the given
    /// `variables` index. The `target` is the name of the variable that owns this rule
    /// and is only used for error reporting.
    pub fn into_update_rule(
        self,
        variables: &FxHashMap<String, VariableId>,
        target: &str,
    ) -> Result<Box<UpdateRule>, ValidationError> {
        Ok(Box::new(match self {
            Const(value) => UpdateRule::Const(value),
            Var(name) => match variables.get(&name) {
                Some(id) => UpdateRule::Var(*id),
                None => {
                    return Err(ValidationError::UnknownNode {
                        target: target.to_string(),
                        name,
                    })
                }
            },
            Not(inner) => UpdateRule::Not(inner.into_update_rule(variables, target)?),
            Binary(op, l, r) => UpdateRule::Binary(
                op,
                l.into_update_rule(variables, target)?,
                r.into_update_rule(variables, target)?,
            ),
        }))
    }
}
