use crate::_rule_parser::RuleTemp;
use crate::{BooleanNetwork, Error, ParseError, ValidationError};
use std::collections::HashSet;
use std::convert::TryFrom;
use std::path::Path;

impl BooleanNetwork {
    /// Try to load a Boolean network from a `.bnet` model.
    ///
    /// Nodes keep the order in which their rules appear in the model. Names which are only
    /// used as regulators (inputs without a rule) are appended in alphabetical order and
    /// receive an identity rule, i.e. they keep their initial value.
    pub fn try_from_bnet(model_string: &str) -> Result<BooleanNetwork, Error> {
        let mut names: Vec<String> = Vec::new();
        let mut rules: Vec<String> = Vec::new();
        let mut declared = HashSet::new();
        let mut referenced = HashSet::new();
        for line in model_string.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() || line.starts_with("targets,") {
                continue; // Skip comments, empty lines and header.
            }
            let Some((name, rule)) = line.split_once(',') else {
                return Err(
                    ParseError::new(line, "Expected a `target, rule` line.".to_string()).into(),
                );
            };
            let name = name.trim().to_string();
            let rule = rule.trim().to_string();
            if !declared.insert(name.clone()) {
                return Err(ValidationError::DuplicateNode(name).into());
            }

            let template = RuleTemp::try_from(rule.as_str())?;
            template.dump_variables(&mut referenced);

            names.push(name);
            rules.push(rule);
        }

        let mut inputs = referenced
            .difference(&declared)
            .cloned()
            .collect::<Vec<_>>();
        inputs.sort();
        for input in inputs {
            rules.push(input.clone());
            names.push(input);
        }

        BooleanNetwork::new(names, rules)
    }

    /// Read a `.bnet` model from a file.
    pub fn try_from_bnet_file<T: AsRef<Path>>(path: T) -> Result<BooleanNetwork, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("File not readable: {}", e))?;
        Self::try_from_bnet(&content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanNetwork, Error, ValidationError};

    #[test]
    fn read_bnet_with_inputs() {
        let bn = BooleanNetwork::try_from_bnet(
            r"
        # A small model with two inputs.
        targets, factors
        B, A & !C
        A, B | D
        ",
        )
        .unwrap();
        assert_eq!(vec!["B", "A", "C", "D"], bn.node_names());
        let c = bn.find_variable("C").unwrap();
        assert_eq!("C", bn.get_rule_string(c));
        assert_eq!(vec![c], bn.regulators(c));
    }

    #[test]
    fn read_invalid_bnet() {
        assert!(matches!(
            BooleanNetwork::try_from_bnet("A, B\nA, !B\nB, A"),
            Err(Error::Validation(ValidationError::DuplicateNode(_)))
        ));
        assert!(matches!(
            BooleanNetwork::try_from_bnet("A B"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            BooleanNetwork::try_from_bnet("A, B &"),
            Err(Error::Parse(_))
        ));
        assert!(BooleanNetwork::try_from_bnet_file("no/such/model.bnet").is_err());
    }
}
