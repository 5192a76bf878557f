use crate::dynamics::{NetworkDynamics, UpdateSemantics};
use crate::error::GenerationPhase;
use crate::state_space::State;
use crate::trajectory::{Trajectory, TrajectoryConfig};
use crate::{Error, GenerationError};
use log::{debug, info, trace};
use rand::Rng;
use std::collections::VecDeque;

/// **(internal)** The sliding window of samples together with its transient count.
struct Window<'a> {
    dynamics: &'a NetworkDynamics,
    semantics: UpdateSemantics,
    length: usize,
    samples: VecDeque<State>,
    transient: usize,
}

impl<'a> Window<'a> {
    fn is_transient(&self, state: State) -> bool {
        !self.dynamics.is_attractor(state, self.semantics)
    }

    /// Append a new sample, dropping the oldest one if the window is full.
    fn push_back(&mut self, state: State) {
        if self.is_transient(state) {
            self.transient += 1;
        }
        self.samples.push_back(state);
        if self.samples.len() > self.length {
            if let Some(dropped) = self.samples.pop_front() {
                if self.is_transient(dropped) {
                    self.transient -= 1;
                }
            }
        }
    }

    /// Prepend a new sample, dropping the newest one if the window is full.
    fn push_front(&mut self, state: State) {
        if self.is_transient(state) {
            self.transient += 1;
        }
        self.samples.push_front(state);
        if self.samples.len() > self.length {
            if let Some(dropped) = self.samples.pop_back() {
                if self.is_transient(dropped) {
                    self.transient -= 1;
                }
            }
        }
    }
}

/// Sample one trajectory of `dynamics` according to `config`.
///
/// Fails with a `ValidationError` if `config` is invalid (before any step is taken), or
/// with a `GenerationError` if some phase exceeds `config.max_steps` steps.
pub fn generate_trajectory<R: Rng + ?Sized>(
    dynamics: &NetworkDynamics,
    config: &TrajectoryConfig,
    rng: &mut R,
) -> Result<Trajectory, Error> {
    config.validate()?;
    let semantics = config.semantics;
    let num_vars = dynamics.num_vars();
    let error = |phase: GenerationPhase, steps: usize| -> Error {
        GenerationError {
            network: dynamics.label().to_string(),
            semantics,
            phase,
            steps,
            limit: config.max_steps,
        }
        .into()
    };

    let initial = dynamics.random_state(rng);
    let mut window = Window {
        dynamics,
        semantics,
        length: config.length,
        samples: VecDeque::with_capacity(config.length + 1),
        transient: 0,
    };
    window.push_back(initial);

    // Forward generation: enough samples and at least one attractor state visited.
    let mut current = initial;
    let mut reached_attractor = dynamics.is_attractor(current, semantics);
    let mut step = 1;
    let mut steps = 0;
    while window.samples.len() < config.length || !reached_attractor {
        if steps >= config.max_steps {
            return Err(error(GenerationPhase::Forward, steps));
        }
        current = dynamics.sample_successor(current, semantics, rng);
        steps += 1;
        reached_attractor = reached_attractor || dynamics.is_attractor(current, semantics);
        if step % config.frequency == 0 {
            trace!("Forward sample {}.", current.to_bit_string(num_vars));
            window.push_back(current);
        }
        step += 1;
    }
    debug!(
        "Forward phase finished after {} steps with {} transient sample(s).",
        steps, window.transient
    );

    let target = config.target_transient_count();
    if window.transient > target {
        // Keep walking inside the attractor until enough transient samples fall out.
        let mut steps = 0;
        while window.transient > target {
            if steps >= config.max_steps {
                return Err(error(GenerationPhase::ShrinkTransient, steps));
            }
            current = dynamics.sample_successor(current, semantics, rng);
            steps += 1;
            if step % config.frequency == 0 {
                window.push_back(current);
            }
            step += 1;
        }
        debug!("Shrinking phase finished after {} steps.", steps);
    } else if window.transient < target {
        let mut position = window.samples.front().cloned().unwrap_or(initial);
        let mut steps = 0;
        while window.transient < target {
            if !dynamics.has_transient_ancestor(position, semantics) {
                debug!(
                    "No transient state precedes {}. Stopping with {} transient sample(s).",
                    position.to_bit_string(num_vars),
                    window.transient
                );
                break;
            }
            if steps >= config.max_steps {
                return Err(error(GenerationPhase::GrowTransient, steps));
            }
            let Some(parent) = dynamics.sample_parent(position, semantics, rng) else {
                debug!(
                    "State {} has no predecessor. Stopping with {} transient sample(s).",
                    position.to_bit_string(num_vars),
                    window.transient
                );
                break;
            };
            position = parent;
            steps += 1;
            if steps % config.frequency == 0 {
                trace!("Backward sample {}.", position.to_bit_string(num_vars));
                window.push_front(position);
            }
        }
        debug!("Growing phase finished after {} steps.", steps);
    }

    let states: Vec<State> = window.samples.into_iter().collect();
    let transient_count = window.transient;
    let achieved_ratio = transient_count as f64 / config.length as f64;
    info!(
        "Generated {} trajectory of length {} with frequency {} for network {}. Initial state: {}. Final state: {}. Transient ratio: {:.3} (target {:.3}).",
        semantics,
        config.length,
        config.frequency,
        dynamics.label(),
        states.first().map(|s| s.to_bit_string(num_vars)).unwrap_or_default(),
        states.last().map(|s| s.to_bit_string(num_vars)).unwrap_or_default(),
        achieved_ratio,
        config.target_ratio,
    );

    Ok(Trajectory {
        semantics,
        frequency: config.frequency,
        length: config.length,
        target_ratio: config.target_ratio,
        achieved_ratio,
        transient_count,
        states,
    })
}

impl NetworkDynamics {
    /// Sample one trajectory of this network. See [generate_trajectory].
    pub fn generate_trajectory<R: Rng + ?Sized>(
        &self,
        config: &TrajectoryConfig,
        rng: &mut R,
    ) -> Result<Trajectory, Error> {
        generate_trajectory(self, config, rng)
    }
}
