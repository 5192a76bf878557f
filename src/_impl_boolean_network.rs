use crate::_rule_parser::{constant_value, RuleTemp};
use crate::state_space::State;
use crate::{
    BooleanNetwork, Error, UpdateRule, ValidationError, Variable, VariableId, VariableIdIterator,
    ID_REGEX, MAX_NODES,
};
use fxhash::FxHashMap;
use std::convert::TryFrom;
use std::ops::Index;

/// Methods for safely building `BooleanNetwork`s.
impl BooleanNetwork {
    /// Construct a new `BooleanNetwork` from a list of node names and an aligned list
    /// of update rule expressions.
    ///
    /// The construction fails with a `ParseError` if some rule is not a valid expression, or
    /// with a `ValidationError` if the names are invalid or duplicated, the two lists have
    /// different lengths, or a rule references a node which is not declared.
    pub fn new(node_names: Vec<String>, rule_strings: Vec<String>) -> Result<BooleanNetwork, Error> {
        if node_names.is_empty() {
            return Err(ValidationError::EmptyNetwork.into());
        }
        if node_names.len() > MAX_NODES {
            return Err(ValidationError::TooManyNodes(node_names.len()).into());
        }
        if node_names.len() != rule_strings.len() {
            return Err(ValidationError::LengthMismatch {
                nodes: node_names.len(),
                rules: rule_strings.len(),
            }
            .into());
        }

        let mut variable_to_index = FxHashMap::default();
        for (i, name) in node_names.iter().enumerate() {
            if !Self::is_valid_name(name) {
                return Err(ValidationError::InvalidNodeName(name.clone()).into());
            }
            if variable_to_index.insert(name.clone(), VariableId(i)).is_some() {
                return Err(ValidationError::DuplicateNode(name.clone()).into());
            }
        }

        let mut update_rules = Vec::with_capacity(rule_strings.len());
        for (name, rule) in node_names.iter().zip(rule_strings.iter()) {
            let template = RuleTemp::try_from(rule.as_str())?;
            let rule = template.into_update_rule(&variable_to_index, name)?;
            update_rules.push(rule.simplify_constants());
        }

        Ok(BooleanNetwork {
            variables: node_names.iter().map(|it| Variable::new(it)).collect(),
            update_rules,
            rule_strings,
            variable_to_index,
        })
    }

    /// A convenience variant of [BooleanNetwork::new] which takes `(name, rule)` pairs.
    pub fn try_from_rules(rules: &[(&str, &str)]) -> Result<BooleanNetwork, Error> {
        let names = rules.iter().map(|(name, _)| name.to_string()).collect();
        let rules = rules.iter().map(|(_, rule)| rule.to_string()).collect();
        Self::new(names, rules)
    }

    /// A static check that allows to verify validity of a node name.
    ///
    /// Names are alphanumeric (with `_`) and must not collide with the constants and
    /// keyword operators of the rule syntax.
    pub fn is_valid_name(name: &str) -> bool {
        let is_keyword = ["and", "or", "not"]
            .iter()
            .any(|it| name.eq_ignore_ascii_case(it));
        ID_REGEX.is_match(name) && !is_keyword && constant_value(name).is_none()
    }
}

/// Methods for accessing the structure of a `BooleanNetwork`.
impl BooleanNetwork {
    /// The number of variables (nodes) in this `BooleanNetwork`.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// The number of states of this network, i.e. `2^num_vars`.
    pub fn num_states(&self) -> usize {
        1 << self.num_vars()
    }

    /// Return an iterator over all variable ids of this network.
    pub fn variables(&self) -> VariableIdIterator {
        (0..self.variables.len()).map(VariableId)
    }

    /// Return the variable object based on the given `VariableId`.
    pub fn get_variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    /// Shorthand for `self.get_variable(id).get_name()`.
    pub fn get_variable_name(&self, id: VariableId) -> &String {
        &self.variables[id.0].name
    }

    /// Find a `VariableId` corresponding to the given variable `name`.
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variable_to_index.get(name).cloned()
    }

    /// Names of all nodes, in the order of their ids.
    pub fn node_names(&self) -> Vec<&str> {
        self.variables.iter().map(|it| it.name.as_str()).collect()
    }

    /// Get the parsed `UpdateRule` of the given variable.
    pub fn get_update_rule(&self, variable: VariableId) -> &UpdateRule {
        &self.update_rules[variable.0]
    }

    /// Get the rule expression of the given variable exactly as it was given
    /// during construction.
    pub fn get_rule_string(&self, variable: VariableId) -> &str {
        &self.rule_strings[variable.0]
    }

    /// All rule expressions, aligned with [BooleanNetwork::node_names].
    pub fn rule_strings(&self) -> &[String] {
        &self.rule_strings
    }

    /// Return a sorted list of variables that appear in the update rule of `target`.
    pub fn regulators(&self, target: VariableId) -> Vec<VariableId> {
        self.update_rules[target.0].collect_arguments()
    }

    /// Evaluate all update rules in the given `state`.
    ///
    /// The result contains the next value of every variable, indexed by variable ids.
    pub fn evaluate_all(&self, state: State) -> Vec<bool> {
        self.update_rules
            .iter()
            .map(|rule| rule.evaluate(state))
            .collect()
    }
}

/// Allow indexing `BooleanNetwork` using `VariableId` objects.
impl Index<VariableId> for BooleanNetwork {
    type Output = Variable;

    fn index(&self, index: VariableId) -> &Self::Output {
        self.get_variable(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::state_space::State;
    use crate::{BooleanNetwork, Error, ValidationError, MAX_NODES};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|it| it.to_string()).collect()
    }

    #[test]
    fn build_basic_network() {
        let bn = BooleanNetwork::try_from_rules(&[
            ("x0", "(x0 & ~x1) | x2"),
            ("x1", "x0"),
            ("x2", "FALSE"),
        ])
        .unwrap();
        assert_eq!(3, bn.num_vars());
        assert_eq!(8, bn.num_states());
        assert_eq!(vec!["x0", "x1", "x2"], bn.node_names());
        assert_eq!("(x0 & ~x1) | x2", bn.get_rule_string(bn.find_variable("x0").unwrap()));

        let x0 = bn.find_variable("x0").unwrap();
        let x1 = bn.find_variable("x1").unwrap();
        let x2 = bn.find_variable("x2").unwrap();
        assert_eq!(vec![x0, x1, x2], bn.regulators(x0));
        assert_eq!(Some(false), bn.get_update_rule(x2).as_const());
        assert_eq!(x1, bn.variables().nth(1).unwrap());

        // x0 = 1, x1 = 0, x2 = 0
        assert_eq!(vec![true, true, false], bn.evaluate_all(State::from(0b001)));
        // x0 = 1, x1 = 1, x2 = 0
        assert_eq!(vec![false, true, false], bn.evaluate_all(State::from(0b011)));
    }

    #[test]
    fn degenerate_rules_become_constants() {
        let bn = BooleanNetwork::try_from_rules(&[("a", "(b) & (a) & FALSE"), ("b", "!0")])
            .unwrap();
        let a = bn.find_variable("a").unwrap();
        let b = bn.find_variable("b").unwrap();
        assert_eq!(Some(false), bn.get_update_rule(a).as_const());
        assert_eq!(Some(true), bn.get_update_rule(b).as_const());
        assert!(bn.regulators(a).is_empty());
    }

    #[test]
    fn invalid_networks() {
        assert_eq!(
            Err(Error::Validation(ValidationError::EmptyNetwork)),
            BooleanNetwork::new(Vec::new(), Vec::new())
        );
        assert_eq!(
            Err(Error::Validation(ValidationError::LengthMismatch { nodes: 2, rules: 1 })),
            BooleanNetwork::new(names(&["a", "b"]), names(&["a"]))
        );
        assert_eq!(
            Err(Error::Validation(ValidationError::DuplicateNode("a".to_string()))),
            BooleanNetwork::new(names(&["a", "a"]), names(&["a", "a"]))
        );
        assert_eq!(
            Err(Error::Validation(ValidationError::UnknownNode {
                target: "b".to_string(),
                name: "c".to_string(),
            })),
            BooleanNetwork::new(names(&["a", "b"]), names(&["b", "a & c"]))
        );
        for name in ["a-b", "", "true", "FALSE", "0", "and", "Not"] {
            assert_eq!(
                Err(Error::Validation(ValidationError::InvalidNodeName(
                    name.to_string()
                ))),
                BooleanNetwork::new(names(&[name]), names(&["1"]))
            );
        }
        let too_many: Vec<String> = (0..=MAX_NODES).map(|i| format!("x{i}")).collect();
        assert_eq!(
            Err(Error::Validation(ValidationError::TooManyNodes(MAX_NODES + 1))),
            BooleanNetwork::new(too_many.clone(), too_many)
        );
    }

    #[test]
    fn parse_errors_are_reported() {
        let result = BooleanNetwork::new(names(&["a", "b"]), names(&["a &", "b"]));
        match result {
            Err(Error::Parse(e)) => assert_eq!("a &", e.expression()),
            other => panic!("Unexpected result: {:?}", other),
        }
        let result = BooleanNetwork::new(names(&["a"]), names(&["f(a)"]));
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
