//! Inverted transition relation used for backward sampling.
//!
//! A [ParentIndex] maps every state to the list of its direct predecessors under one update
//! semantics. It is built once per network by enumerating all states in ascending order, so
//! the predecessor lists are sorted as well. A state that has no predecessor does not appear
//! in the index at all.

use crate::attractors::AttractorSet;
use crate::dynamics::UpdateSemantics;
use crate::state_space::{EvolutionOperator, State, StateRange};
use crate::BooleanNetwork;
use fxhash::{FxHashMap, FxHashSet};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Map from states to their direct predecessors.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParentIndex {
    parents: FxHashMap<State, Vec<State>>,
}

impl ParentIndex {
    /// Build the index of a state space with `num_vars` variables by inverting `operator`.
    pub fn build<E: EvolutionOperator>(num_vars: usize, operator: &E) -> ParentIndex {
        let mut parents: FxHashMap<State, Vec<State>> = FxHashMap::default();
        for state in StateRange::new(num_vars) {
            for successor in operator.step(state) {
                parents.entry(successor).or_default().push(state);
            }
        }
        debug!(
            "Built parent index with {} keys and {} edges.",
            parents.len(),
            parents.values().map(|it| it.len()).sum::<usize>()
        );
        ParentIndex { parents }
    }

    /// Build the index of `network` under the given `semantics`.
    pub fn for_network(network: &BooleanNetwork, semantics: UpdateSemantics) -> ParentIndex {
        match semantics {
            UpdateSemantics::Synchronous => Self::build(network.num_vars(), &network.sync_update()),
            UpdateSemantics::Asynchronous => {
                Self::build(network.num_vars(), &network.async_update())
            }
        }
    }

    /// Create an index from explicit `(state, predecessors)` pairs, e.g. loaded from a file.
    pub fn from_entries<I: IntoIterator<Item = (State, Vec<State>)>>(entries: I) -> ParentIndex {
        ParentIndex {
            parents: entries.into_iter().collect(),
        }
    }

    /// Predecessors of `state`, or `None` if `state` is not a key of the index.
    pub fn parents(&self, state: State) -> Option<&[State]> {
        self.parents.get(&state).map(|it| it.as_slice())
    }

    /// Draw one predecessor of `state` uniformly at random.
    ///
    /// Returns `None` if the state has no recorded predecessors.
    pub fn sample_parent<R: Rng + ?Sized>(&self, state: State, rng: &mut R) -> Option<State> {
        self.parents
            .get(&state)
            .and_then(|it| it.choose(rng))
            .cloned()
    }

    /// The number of states that have at least one entry in the index.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Attractor states from which a backward walk through this index can leave the
    /// attractors and reach a transient state.
    ///
    /// A backward walk that starts in any other attractor state stays inside its attractor
    /// forever.
    pub fn escapable_attractor_states(&self, attractors: &AttractorSet) -> FxHashSet<State> {
        let mut escapable = FxHashSet::default();
        let mut stack = Vec::new();
        // Attractor successors of each attractor state, restricted to indexed edges.
        let mut children: FxHashMap<State, Vec<State>> = FxHashMap::default();
        for state in attractors.states() {
            let parents = self.parents(*state).unwrap_or(&[]);
            for parent in parents {
                if attractors.contains(*parent) {
                    children.entry(*parent).or_default().push(*state);
                } else if escapable.insert(*state) {
                    stack.push(*state);
                }
            }
        }
        while let Some(state) = stack.pop() {
            for child in children.get(&state).map(|it| it.as_slice()).unwrap_or(&[]) {
                if escapable.insert(*child) {
                    stack.push(*child);
                }
            }
        }
        debug!(
            "{} of {} attractor state(s) have a transient ancestor.",
            escapable.len(),
            attractors.len()
        );
        escapable
    }

    /// All entries of the index, ordered by state.
    pub fn sorted_entries(&self) -> Vec<(State, &[State])> {
        let mut result = self
            .parents
            .iter()
            .map(|(k, v)| (*k, v.as_slice()))
            .collect::<Vec<_>>();
        result.sort_by_key(|(k, _)| *k);
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::attractors;
    use crate::dynamics::UpdateSemantics;
    use crate::parent_index::ParentIndex;
    use crate::state_space::{State, StateRange};
    use crate::test_utils::{mk_network, mk_rng, mk_shift_register};
    use pretty_assertions::assert_eq;

    #[test]
    fn sync_parents_of_shift_register() {
        let bn = mk_shift_register();
        let index = ParentIndex::for_network(&bn, UpdateSemantics::Synchronous);
        // New x0 is always 0, so states with x0 = 1 have no parents.
        for state in StateRange::new(3) {
            if state.get_bit(0) {
                assert_eq!(None, index.parents(state));
            } else {
                // The shifted-out bit (x2) is free, so every such state has two parents.
                assert_eq!(2, index.parents(state).unwrap().len());
            }
        }
        // (0, 0, 0) <- (0, 0, 0) and (0, 0, 1)
        assert_eq!(
            Some(&[State::from(0b000), State::from(0b100)][..]),
            index.parents(State::from(0))
        );
        assert_eq!(4, index.len());
    }

    #[test]
    fn async_parents_invert_successors() {
        let bn = mk_network(&[("a", "!b | c"), ("b", "a ^ c"), ("c", "a & b")]);
        let index = ParentIndex::for_network(&bn, UpdateSemantics::Asynchronous);
        for state in StateRange::new(bn.num_vars()) {
            for next in bn.async_successors(state) {
                assert!(index.parents(next).unwrap().contains(&state));
            }
        }
        let edges: usize = index.sorted_entries().iter().map(|(_, v)| v.len()).sum();
        let expected: usize = StateRange::new(bn.num_vars())
            .map(|s| bn.async_successors(s).len())
            .sum();
        assert_eq!(expected, edges);
    }

    #[test]
    fn sample_parent_is_uniform_member() {
        let bn = mk_shift_register();
        let index = ParentIndex::for_network(&bn, UpdateSemantics::Synchronous);
        let mut rng = mk_rng(7);
        let mut seen = Vec::new();
        for _ in 0..100 {
            let parent = index.sample_parent(State::from(0b010), &mut rng).unwrap();
            assert_eq!(State::from(0b010), bn.sync_successor(parent));
            if !seen.contains(&parent) {
                seen.push(parent);
            }
        }
        assert_eq!(2, seen.len());
        assert_eq!(None, index.sample_parent(State::from(0b001), &mut rng));
    }

    #[test]
    fn explicit_entries() {
        let index = ParentIndex::from_entries(vec![
            (State::from(1), vec![State::from(0)]),
            (State::from(0), vec![]),
        ]);
        assert_eq!(Some(&[][..]), index.parents(State::from(0)));
        assert_eq!(None, index.sample_parent(State::from(0), &mut mk_rng(1)));
        assert_eq!(None, index.parents(State::from(2)));
        assert_eq!(State::from(0), index.sorted_entries()[0].0);
    }

    #[test]
    fn attractors_with_transient_ancestors() {
        // Fixed points (0, 0), (1, 0) and (1, 1). Only (0, 1) is transient and it only
        // leads to (0, 0).
        let bn = mk_network(&[("x0", "x0"), ("x1", "x0 & x1")]);
        for semantics in [UpdateSemantics::Synchronous, UpdateSemantics::Asynchronous] {
            let index = ParentIndex::for_network(&bn, semantics);
            let attractors = attractors::attractors(&bn, semantics);
            let escapable = index.escapable_attractor_states(&attractors);
            assert_eq!(1, escapable.len());
            assert!(escapable.contains(&State::from(0b00)));
        }

        // Attractor states with a transient parent are always escapable.
        let bn = mk_network(&[("a", "b"), ("b", "a"), ("c", "!c & a")]);
        let index = ParentIndex::for_network(&bn, UpdateSemantics::Synchronous);
        let attractors = attractors::attractors(&bn, UpdateSemantics::Synchronous);
        let escapable = index.escapable_attractor_states(&attractors);
        for state in escapable.iter() {
            assert!(attractors.contains(*state));
        }
        for state in attractors.states() {
            let has_transient_parent = index
                .parents(*state)
                .unwrap_or(&[])
                .iter()
                .any(|p| !attractors.contains(*p));
            if has_transient_parent {
                assert!(escapable.contains(state));
            }
        }
    }
}
