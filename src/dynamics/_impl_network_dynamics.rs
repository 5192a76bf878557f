use crate::attractors::{self, AttractorSet};
use crate::dynamics::{NetworkDynamics, PrecomputedDynamics, UpdateSemantics};
use crate::parent_index::ParentIndex;
use crate::state_space::State;
use crate::BooleanNetwork;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

impl NetworkDynamics {
    /// Analyse the given `network`: compute attractors and parent indices for both
    /// update semantics.
    pub fn new(network: BooleanNetwork) -> NetworkDynamics {
        Self::from_precomputed(network, PrecomputedDynamics::default())
    }

    /// Build the dynamics of `network` re-using the provided precomputed components.
    ///
    /// Provided components are trusted: they are not checked against the update rules.
    pub fn from_precomputed(
        network: BooleanNetwork,
        precomputed: PrecomputedDynamics,
    ) -> NetworkDynamics {
        let label = format!("[{}]", network.node_names().join(", "));
        let sync_attractors = precomputed
            .sync_attractors
            .unwrap_or_else(|| attractors::synchronous_attractors(&network));
        let async_attractors = precomputed
            .async_attractors
            .unwrap_or_else(|| attractors::asynchronous_attractors(&network));
        let sync_parents = precomputed
            .sync_parents
            .unwrap_or_else(|| ParentIndex::for_network(&network, UpdateSemantics::Synchronous));
        let async_parents = precomputed
            .async_parents
            .unwrap_or_else(|| ParentIndex::for_network(&network, UpdateSemantics::Asynchronous));
        let sync_escapable = sync_parents.escapable_attractor_states(&sync_attractors);
        let async_escapable = async_parents.escapable_attractor_states(&async_attractors);
        info!(
            "Network {} with {} node(s): {} synchronous and {} asynchronous attractor state(s).",
            label,
            network.num_vars(),
            sync_attractors.len(),
            async_attractors.len()
        );
        NetworkDynamics {
            network,
            label,
            sync_attractors,
            async_attractors,
            sync_parents,
            async_parents,
            sync_escapable,
            async_escapable,
        }
    }

    /// Replace the label used to identify this network in logs and errors.
    pub fn with_label(mut self, label: &str) -> NetworkDynamics {
        self.label = label.to_string();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn network(&self) -> &BooleanNetwork {
        &self.network
    }

    pub fn num_vars(&self) -> usize {
        self.network.num_vars()
    }

    /// The cached attractor set of the given `semantics`.
    pub fn attractors(&self, semantics: UpdateSemantics) -> &AttractorSet {
        match semantics {
            UpdateSemantics::Synchronous => &self.sync_attractors,
            UpdateSemantics::Asynchronous => &self.async_attractors,
        }
    }

    /// The cached parent index of the given `semantics`.
    pub fn parent_index(&self, semantics: UpdateSemantics) -> &ParentIndex {
        match semantics {
            UpdateSemantics::Synchronous => &self.sync_parents,
            UpdateSemantics::Asynchronous => &self.async_parents,
        }
    }

    /// True if `state` lies in an attractor under the given `semantics`.
    pub fn is_attractor(&self, state: State, semantics: UpdateSemantics) -> bool {
        self.attractors(semantics).contains(state)
    }

    /// True if `state` is transient, or if a backward walk from `state` under the given
    /// `semantics` can reach a transient state.
    pub fn has_transient_ancestor(&self, state: State, semantics: UpdateSemantics) -> bool {
        let escapable = match semantics {
            UpdateSemantics::Synchronous => &self.sync_escapable,
            UpdateSemantics::Asynchronous => &self.async_escapable,
        };
        !self.is_attractor(state, semantics) || escapable.contains(&state)
    }

    pub fn sync_successor(&self, state: State) -> State {
        self.network.sync_successor(state)
    }

    pub fn async_successors(&self, state: State) -> Vec<State> {
        self.network.async_successors(state)
    }

    /// Perform one random step from `state`. The synchronous step is deterministic; the
    /// asynchronous step picks uniformly among the distinct successors.
    pub fn sample_successor<R: Rng + ?Sized>(
        &self,
        state: State,
        semantics: UpdateSemantics,
        rng: &mut R,
    ) -> State {
        match semantics {
            UpdateSemantics::Synchronous => self.network.sync_successor(state),
            UpdateSemantics::Asynchronous => {
                let successors = self.network.async_successors(state);
                // There is always at least one successor.
                successors.choose(rng).cloned().unwrap_or(state)
            }
        }
    }

    /// Draw a random predecessor of `state` from the parent index of `semantics`.
    pub fn sample_parent<R: Rng + ?Sized>(
        &self,
        state: State,
        semantics: UpdateSemantics,
        rng: &mut R,
    ) -> Option<State> {
        self.parent_index(semantics).sample_parent(state, rng)
    }

    /// Draw a state of this network uniformly at random.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        State::from(rng.gen_range(0..self.network.num_states()))
    }
}
