//! Error types of the crate.
//!
//! Construction of a network fails with a [ParseError] (malformed rule text) or a
//! [ValidationError] (inconsistent network description or invalid parameters). Sampling of a
//! trajectory fails with a [GenerationError] when a step limit is exceeded. All three are
//! unified by [Error]. File handling in `model_io` and `dataset` reports a [DatasetError].

use crate::dynamics::UpdateSemantics;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Any error produced by the dynamics engine.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// An update rule could not be parsed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Invalid update rule `{expression}`: {message}")]
pub struct ParseError {
    expression: String,
    message: String,
}

impl ParseError {
    pub fn new(expression: &str, message: String) -> ParseError {
        ParseError {
            expression: expression.to_string(),
            message,
        }
    }

    /// The rule text that failed to parse.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Human-readable description of the syntax problem.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A network description or a sampling request is inconsistent.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("A network must have at least one node.")]
    EmptyNetwork,
    #[error("Networks with {0} nodes are not supported (the limit is {max}).", max = crate::MAX_NODES)]
    TooManyNodes(usize),
    #[error("Found {nodes} node names, but {rules} update rules.")]
    LengthMismatch { nodes: usize, rules: usize },
    #[error("Node name `{0}` is declared more than once.")]
    DuplicateNode(String),
    #[error("`{0}` is not a valid node name.")]
    InvalidNodeName(String),
    #[error("Update rule of `{target}` references unknown node `{name}`.")]
    UnknownNode { target: String, name: String },
    #[error("Trajectory frequency must be at least one.")]
    ZeroFrequency,
    #[error("Trajectory length must be at least one.")]
    ZeroLength,
    #[error("Target transient ratio must be within [0, 1], but {0} was given.")]
    InvalidRatio(f64),
    #[error("The step limit must be at least one.")]
    ZeroStepLimit,
    #[error("Invalid range [{low}, {high}] of `{name}`.")]
    InvalidRange {
        name: &'static str,
        low: usize,
        high: usize,
    },
    #[error("Cannot read `{text}` as a state of {num_vars} nodes.")]
    InvalidState { text: String, num_vars: usize },
}

/// The trajectory sampling phase in which a [GenerationError] occurred.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GenerationPhase {
    /// Forward walk until enough samples exist and an attractor is reached.
    Forward,
    /// Additional forward steps that push transient states out of the window.
    ShrinkTransient,
    /// Backward steps that pull more transient states into the window.
    GrowTransient,
}

impl Display for GenerationPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GenerationPhase::Forward => "forward generation",
            GenerationPhase::ShrinkTransient => "transient shrinking",
            GenerationPhase::GrowTransient => "transient growing",
        };
        write!(f, "{name}")
    }
}

/// Trajectory sampling exceeded its step limit.
///
/// The error aborts only the trajectory that was being sampled. It carries enough context
/// for the caller to retry with different parameters.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error(
    "Step limit {limit} exceeded during {phase} of a {semantics} trajectory in network `{network}` (after {steps} steps)."
)]
pub struct GenerationError {
    pub network: String,
    pub semantics: UpdateSemantics,
    pub phase: GenerationPhase,
    pub steps: usize,
    pub limit: usize,
}

/// Reading or writing of model and dataset files failed.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] Error),
}

impl From<ValidationError> for DatasetError {
    fn from(value: ValidationError) -> Self {
        DatasetError::Engine(value.into())
    }
}
