//! A library for explicit analysis of small Boolean networks and for sampling their
//! trajectories as training data for network inference.
//!
//! The main entry point is a [BooleanNetwork] (ordered node names with parsed update rules).
//! A [dynamics::NetworkDynamics] wraps the network together with its attractor sets and
//! parent indices (computed once, for both update semantics), and the [trajectory] module
//! samples trajectories with a requested ratio of transient states.
//!
//! ```rust
//! use bn_trajectories::BooleanNetwork;
//! use bn_trajectories::dynamics::{NetworkDynamics, UpdateSemantics};
//! use bn_trajectories::state_space::State;
//!
//! let network = BooleanNetwork::new(
//!     vec!["x0".to_string(), "x1".to_string()],
//!     vec!["x1".to_string(), "!x0".to_string()],
//! ).unwrap();
//! let dynamics = NetworkDynamics::new(network);
//! // `x0 = 1, x1 = 0` is encoded as `0b01`.
//! let state = State::from(0b01);
//! assert_eq!(State::from(0b00), dynamics.sync_successor(state));
//! assert!(dynamics.is_attractor(state, UpdateSemantics::Synchronous));
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use fxhash::FxHashMap;
use std::iter::Map;
use std::ops::Range;

pub mod attractors;
pub mod dataset;
pub mod dynamics;
pub mod error;
pub mod generator;
pub mod model_io;
pub mod parent_index;
pub mod state_space;
pub mod trajectory;

/// **(internal)** Reading of `.bnet` models.
mod _bnet_parser;
/// **(internal)** Utility methods for `BinaryOp`.
mod _impl_binary_op;
/// **(internal)** Utility methods for `BooleanNetwork`.
mod _impl_boolean_network;
/// **(internal)** `BooleanNetwork` to `.bnet` string.
mod _impl_display_boolean_network;
/// **(internal)** Utility methods for `UpdateRule`.
mod _impl_update_rule;
/// **(internal)** Utility methods for `Variable`.
mod _impl_variable;
/// **(internal)** Utility methods for `VariableId`.
mod _impl_variable_id;
/// **(internal)** Tokenizer and parser of update rule expressions.
mod _rule_parser;

#[cfg(test)]
mod test_utils;

pub use error::{DatasetError, Error, GenerationError, ParseError, ValidationError};

/// The largest number of nodes supported by the explicit state-space algorithms.
///
/// Every analysis enumerates all `2^n` states, so anything close to this limit is already
/// impractical. The cap only guarantees that state indices fit comfortably into `usize`.
pub const MAX_NODES: usize = 30;

lazy_static! {
    /// A regular expression that matches the identifiers allowed as names of network nodes.
    static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
}

/// A type-safe index of a `Variable` (node) inside a `BooleanNetwork`.
///
/// The index of a variable is also the position of its bit in a
/// [state_space::State].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(usize);

/// A node of a `BooleanNetwork`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    name: String,
}

/// Possible binary Boolean operators that can appear in an `UpdateRule`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Iff,
    Imp,
}

/// A Boolean formula over the variables of a `BooleanNetwork`.
///
/// An update rule specifies the next value of one specific `Variable`. Rules are parsed
/// once when the network is constructed and then only evaluated.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UpdateRule {
    Const(bool),
    Var(VariableId),
    Not(Box<UpdateRule>),
    Binary(BinaryOp, Box<UpdateRule>, Box<UpdateRule>),
}

/// A fully specified Boolean network: an ordered list of nodes, each with one update rule.
///
/// The network is an immutable value. Anything derived from it (attractors, parent indices)
/// is computed from a complete network and stays valid for as long as the network exists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BooleanNetwork {
    variables: Vec<Variable>,
    update_rules: Vec<UpdateRule>,
    rule_strings: Vec<String>,
    variable_to_index: FxHashMap<String, VariableId>,
}

/// An iterator over all `VariableId`s of a `BooleanNetwork`.
pub type VariableIdIterator = Map<Range<usize>, fn(usize) -> VariableId>;
