//! Explicit attractor detection.
//!
//! Under synchronous update, every state has exactly one successor, so the attractors are
//! exactly the cycles of the successor map. These are found by a memoized forward walk
//! (see [synchronous_attractors]).
//!
//! Under asynchronous update, the attractors are the sink (terminal) strongly connected
//! components of the state transition graph. These are found using an iterative variant of
//! Tarjan's algorithm over the complete graph (see [sink_components]), which works for any
//! [EvolutionOperator].

use crate::dynamics::UpdateSemantics;
use crate::state_space::State;
use crate::BooleanNetwork;
use fxhash::FxHashSet;

/// **(internal)** Construction and queries of `AttractorSet`.
mod _impl_attractor_set;
/// **(internal)** Tarjan's decomposition restricted to sink components.
mod _impl_sink_components;
/// **(internal)** Cycle detection in the synchronous successor map.
mod _impl_sync_attractors;

pub use _impl_sink_components::sink_components;
pub use _impl_sync_attractors::sync_cycles;

/// The set of all attractor states of a network under one update semantics.
///
/// Membership queries are constant-time. If the set was computed (as opposed to loaded from
/// a state list), the individual attractors are available as well.
#[derive(Clone, Debug, Default)]
pub struct AttractorSet {
    states: FxHashSet<State>,
    components: Option<Vec<Vec<State>>>,
}

/// Compute the synchronous attractors (cycles) of the given `network`.
pub fn synchronous_attractors(network: &BooleanNetwork) -> AttractorSet {
    AttractorSet::from_components(sync_cycles(network))
}

/// Compute the asynchronous attractors (sink components) of the given `network`.
pub fn asynchronous_attractors(network: &BooleanNetwork) -> AttractorSet {
    AttractorSet::from_components(sink_components(
        network.num_vars(),
        &network.async_update(),
    ))
}

/// Compute the attractors of the given `network` under the given `semantics`.
pub fn attractors(network: &BooleanNetwork, semantics: UpdateSemantics) -> AttractorSet {
    match semantics {
        UpdateSemantics::Synchronous => synchronous_attractors(network),
        UpdateSemantics::Asynchronous => asynchronous_attractors(network),
    }
}
