//! Sampling of fixed-length trajectories with a target ratio of transient states.
//!
//! A trajectory is a sequence of `length` states, each `frequency` simulation steps after
//! the previous one. Sampling starts with a forward walk from a uniformly random state which
//! continues until the trajectory is long enough and the walk has entered an attractor. Then,
//! the window is shifted to match the requested fraction of transient (non-attractor) states:
//!
//!  - Forward, if there are too many transient states: new (attractor) samples are appended
//!    and the oldest samples are dropped.
//!  - Backward, if there are too few transient states: predecessors of the oldest sample are
//!    drawn from the parent index, prepended, and the newest samples are dropped. A state
//!    without predecessors ends this phase early and the trajectory is returned as is.
//!
//! All phases are bounded by [TrajectoryConfig::max_steps].

use crate::dynamics::UpdateSemantics;
use crate::state_space::State;
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// **(internal)** The three-phase sampling procedure.
mod _impl_sampler;
/// **(internal)** Conversions between `Trajectory` and `TrajectoryRecord`.
mod _impl_trajectory;

pub use _impl_sampler::generate_trajectory;

/// The default bound on the number of simulation steps of each sampling phase.
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Parameters of a single trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    pub semantics: UpdateSemantics,
    /// Number of simulation steps between two consecutive samples.
    pub frequency: usize,
    /// Number of samples in the trajectory.
    pub length: usize,
    /// Requested fraction of transient states, within `[0, 1]`.
    pub target_ratio: f64,
    /// Upper bound on the number of steps of each sampling phase.
    pub max_steps: usize,
}

/// A sampled trajectory together with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub semantics: UpdateSemantics,
    pub frequency: usize,
    pub length: usize,
    pub target_ratio: f64,
    pub achieved_ratio: f64,
    pub transient_count: usize,
    pub states: Vec<State>,
}

/// Serialized form of a [Trajectory]. States are written as bit strings
/// (see [State::to_bit_string]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub synchronous: bool,
    pub frequency: usize,
    pub length: usize,
    #[serde(default)]
    pub target_ratio: f64,
    #[serde(default)]
    pub achieved_ratio: f64,
    #[serde(default)]
    pub transient_count: usize,
    pub states: Vec<String>,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig {
            semantics: UpdateSemantics::Synchronous,
            frequency: 1,
            length: 10,
            target_ratio: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl TrajectoryConfig {
    pub fn new(semantics: UpdateSemantics, frequency: usize, length: usize) -> TrajectoryConfig {
        TrajectoryConfig {
            semantics,
            frequency,
            length,
            ..Default::default()
        }
    }

    pub fn with_target_ratio(mut self, target_ratio: f64) -> TrajectoryConfig {
        self.target_ratio = target_ratio;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> TrajectoryConfig {
        self.max_steps = max_steps;
        self
    }

    /// Check that the parameters describe a trajectory that can be sampled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.frequency == 0 {
            return Err(ValidationError::ZeroFrequency);
        }
        if self.length == 0 {
            return Err(ValidationError::ZeroLength);
        }
        if !self.target_ratio.is_finite() || !(0.0..=1.0).contains(&self.target_ratio) {
            return Err(ValidationError::InvalidRatio(self.target_ratio));
        }
        if self.max_steps == 0 {
            return Err(ValidationError::ZeroStepLimit);
        }
        Ok(())
    }

    /// The number of transient samples closest to `target_ratio * length`.
    pub fn target_transient_count(&self) -> usize {
        (self.target_ratio * self.length as f64).round() as usize
    }
}
