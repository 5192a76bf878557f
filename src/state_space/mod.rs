//! Explicit representation of network states.
//!
//! A [State] of a network with `n` variables is an `n`-bit integer: variable `i` is stored
//! in bit `i` (variable `0` is the least significant bit), so the index of a state is
//! `Σ value[i] * 2^i`. Textual forms ([State::to_bit_string], [State::to_tuple_string])
//! always list variable `0` first.

use serde::{Deserialize, Serialize};

/// **(internal)** Textual conversions of `State`.
mod _impl_state;

/// A state of a Boolean network, stored as its integer index.
///
/// The bit-width of a state is not stored; it is always given by the network.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct State(usize);

/// An iterator over all states `0..2^n` of a network, in ascending order.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StateRange {
    next: usize,
    remaining: usize,
}

/// `EvolutionOperator`s represent the evolution of a discrete dynamical system: given
/// a current state, they provide the possible states in the next time step.
///
/// Implementations return successors in ascending order and without duplicates.
pub trait EvolutionOperator {
    type Iterator: Iterator<Item = State>;
    fn step(&self, current: State) -> Self::Iterator;
}

impl From<usize> for State {
    fn from(val: usize) -> Self {
        State(val)
    }
}

impl From<State> for usize {
    fn from(state: State) -> Self {
        state.0
    }
}

impl State {
    /// The integer index of this state.
    pub fn index(self) -> usize {
        self.0
    }

    /// Test if the bit at the given position is set or not.
    pub fn get_bit(self, bit: usize) -> bool {
        (self.0 >> bit) & 1 == 1
    }

    /// Flip the bit at the given position.
    pub fn flip_bit(self, bit: usize) -> State {
        State(self.0 ^ (1 << bit))
    }

    /// Set the bit at the given position to `value`.
    pub fn set_bit(self, bit: usize, value: bool) -> State {
        if value {
            State(self.0 | (1 << bit))
        } else {
            State(self.0 & !(1 << bit))
        }
    }

    /// Build a state from explicit variable values (`values[i]` is the value of variable `i`).
    pub fn from_values(values: &[bool]) -> State {
        values
            .iter()
            .enumerate()
            .fold(State(0), |state, (i, value)| state.set_bit(i, *value))
    }

    /// The values of the first `num_vars` variables in this state.
    pub fn values(self, num_vars: usize) -> Vec<bool> {
        (0..num_vars).map(|i| self.get_bit(i)).collect()
    }
}

impl StateRange {
    /// All states of a network with `num_vars` variables.
    pub fn new(num_vars: usize) -> StateRange {
        StateRange {
            next: 0,
            remaining: 1 << num_vars,
        }
    }
}

impl Iterator for StateRange {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let result = self.next;
            self.remaining -= 1;
            self.next += 1;
            Some(State::from(result))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StateRange {}
