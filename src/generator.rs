//! Random Boolean networks.
//!
//! Every node of a generated network has a random set of regulators (other nodes) and a
//! random truth table over them. The table is written as a disjunction of conjunctive
//! clauses, one for each row where the function is true, e.g. `(x1 & ~x2) | (~x1 & x2)`.
//! An all-false table becomes `(x1) & (x2) & FALSE`, which keeps the regulators visible
//! in the rule text.

use crate::{BooleanNetwork, Error, ValidationError, MAX_NODES};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

/// Parameters of random network generation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratorConfig {
    /// Smallest number of nodes (inclusive).
    pub min_nodes: usize,
    /// Largest number of nodes (inclusive).
    pub max_nodes: usize,
    /// Largest number of regulators of a single node. The actual number is drawn uniformly
    /// from `1..=max_regulators` and limited by the number of other nodes.
    pub max_regulators: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            min_nodes: 2,
            max_nodes: 3,
            max_regulators: 3,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_nodes == 0 || self.min_nodes > self.max_nodes || self.max_nodes > MAX_NODES {
            return Err(ValidationError::InvalidRange {
                name: "nodes",
                low: self.min_nodes,
                high: self.max_nodes,
            });
        }
        if self.max_regulators == 0 {
            return Err(ValidationError::InvalidRange {
                name: "regulators",
                low: 1,
                high: self.max_regulators,
            });
        }
        Ok(())
    }
}

/// Generate one random rule for every node in `names`.
///
/// A node is never its own regulator, unless it is the only node of the network.
pub fn generate_rules<R: Rng + ?Sized>(
    names: &[String],
    max_regulators: usize,
    rng: &mut R,
) -> Vec<String> {
    names
        .iter()
        .map(|target| {
            let candidates = if names.len() > 1 {
                names.iter().filter(|it| *it != target).collect::<Vec<_>>()
            } else {
                names.iter().collect::<Vec<_>>()
            };
            let size = rng.gen_range(1..=max_regulators.max(1)).min(candidates.len());
            let regulators = candidates
                .choose_multiple(&mut *rng, size)
                .map(|it| it.as_str())
                .collect::<Vec<_>>();
            let table = (0..(1usize << size))
                .map(|_| rng.gen_bool(0.5))
                .collect::<Vec<_>>();
            let rule = rule_from_table(&regulators, &table);
            info!(
                "Function for {} with regulators {:?} has values {:?}. Rule is {}.",
                target, regulators, table, rule
            );
            rule
        })
        .collect()
}

/// Write the truth `table` over `regulators` as a rule.
///
/// Row `i` of the table assigns `regulators[e]` the value of bit `e` of `i`.
pub fn rule_from_table(regulators: &[&str], table: &[bool]) -> String {
    let clauses = table
        .iter()
        .enumerate()
        .filter(|(_, value)| **value)
        .map(|(row, _)| {
            let literals = regulators
                .iter()
                .enumerate()
                .map(|(e, name)| {
                    if row & (1 << e) != 0 {
                        name.to_string()
                    } else {
                        format!("~{name}")
                    }
                })
                .collect::<Vec<_>>();
            format!("({})", literals.join(" & "))
        })
        .collect::<Vec<_>>();
    if clauses.is_empty() {
        format!("({}) & FALSE", regulators.join(") & ("))
    } else {
        clauses.join(" | ")
    }
}

/// Generate a random network with nodes `x0, x1, ...`.
pub fn generate_network<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<BooleanNetwork, Error> {
    config.validate()?;
    let size = rng.gen_range(config.min_nodes..=config.max_nodes);
    let names = (0..size).map(|i| format!("x{i}")).collect::<Vec<_>>();
    let rules = generate_rules(&names, config.max_regulators, rng);
    debug!("Generated network with {} nodes.", size);
    BooleanNetwork::new(names, rules)
}

/// Generate `count` random networks.
pub fn generate_networks<R: Rng + ?Sized>(
    count: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<BooleanNetwork>, Error> {
    (0..count)
        .map(|_| generate_network(config, &mut *rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::generator::{generate_network, generate_networks, rule_from_table, GeneratorConfig};
    use crate::state_space::{State, StateRange};
    use crate::test_utils::{init_logger, mk_network, mk_rng};
    use crate::{Error, ValidationError};

    #[test]
    fn table_to_rule() {
        // Rows: (a=0, b=0), (a=1, b=0), (a=0, b=1), (a=1, b=1).
        let rule = rule_from_table(&["a", "b"], &[false, true, true, false]);
        assert_eq!("(a & ~b) | (~a & b)", rule);
        let rule = rule_from_table(&["a", "b"], &[false; 4]);
        assert_eq!("(a) & (b) & FALSE", rule);
        let rule = rule_from_table(&["c"], &[true, false]);
        assert_eq!("(~c)", rule);
    }

    #[test]
    fn table_rule_evaluates_to_table() {
        let table = [true, false, false, true, true, true, false, true];
        let rule = rule_from_table(&["x1", "x2", "x3"], &table);
        let bn = mk_network(&[
            ("x0", "x0"),
            ("x1", rule.as_str()),
            ("x2", "x2"),
            ("x3", "x3"),
        ]);
        let x1 = bn.find_variable("x1").unwrap();
        for row in 0..8usize {
            // x1..x3 occupy bits 1..3 of the state.
            let state = State::from(row << 1);
            assert_eq!(table[row], bn.get_update_rule(x1).evaluate(state));
        }
    }

    #[test]
    fn generated_networks_are_valid() {
        init_logger();
        let mut rng = mk_rng(42);
        let config = GeneratorConfig::default();
        let networks = generate_networks(50, &config, &mut rng).unwrap();
        assert_eq!(50, networks.len());
        for bn in &networks {
            assert!((2..=3).contains(&bn.num_vars()));
            for var in bn.variables() {
                let rule = bn.get_rule_string(var);
                assert!(!rule.contains(bn.get_variable_name(var).as_str()));
            }
            // Evaluation works in every state.
            for state in StateRange::new(bn.num_vars()) {
                assert_eq!(bn.num_vars(), bn.evaluate_all(state).len());
            }
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let config = GeneratorConfig {
            min_nodes: 1,
            max_nodes: 6,
            max_regulators: 4,
        };
        let first = generate_networks(10, &config, &mut mk_rng(7)).unwrap();
        let second = generate_networks(10, &config, &mut mk_rng(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_generator_config() {
        let config = GeneratorConfig {
            min_nodes: 4,
            max_nodes: 3,
            max_regulators: 3,
        };
        assert_eq!(
            Err(Error::Validation(ValidationError::InvalidRange {
                name: "nodes",
                low: 4,
                high: 3
            })),
            generate_network(&config, &mut mk_rng(0))
        );
    }
}
