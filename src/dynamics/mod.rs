//! Explicit state-transition semantics of a `BooleanNetwork`.
//!
//! Two update semantics are supported. Under [UpdateSemantics::Synchronous] all variables
//! are updated at once, giving exactly one successor of every state ([SyncUpdate]). Under
//! [UpdateSemantics::Asynchronous] a single variable is updated in each step, giving
//! between one and `n` successors ([AsyncUpdate]); a variable whose rule agrees with its
//! current value produces a self-loop.
//!
//! [NetworkDynamics] bundles a network with the attractor sets and parent indices of both
//! semantics. These are computed once and then only queried.

use crate::attractors::AttractorSet;
use crate::parent_index::ParentIndex;
use crate::state_space::State;
use crate::BooleanNetwork;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// **(internal)** `EvolutionOperator` implementations and successor methods of `BooleanNetwork`.
mod _impl_evolution_operators;
/// **(internal)** Construction and queries of `NetworkDynamics`.
mod _impl_network_dynamics;

/// The update semantics of a Boolean network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateSemantics {
    Synchronous,
    Asynchronous,
}

/// Synchronous evolution operator: every state has exactly one successor.
#[derive(Clone, Copy, Debug)]
pub struct SyncUpdate<'a> {
    network: &'a BooleanNetwork,
}

/// Asynchronous evolution operator: every state has `1..=n` successors, each differing
/// from it in at most one variable.
#[derive(Clone, Copy, Debug)]
pub struct AsyncUpdate<'a> {
    network: &'a BooleanNetwork,
}

/// A `BooleanNetwork` together with its cached attractor sets and parent indices.
///
/// All components are immutable once constructed, so a single instance can be shared
/// by any number of threads sampling trajectories at the same time.
#[derive(Clone, Debug)]
pub struct NetworkDynamics {
    network: BooleanNetwork,
    label: String,
    sync_attractors: AttractorSet,
    async_attractors: AttractorSet,
    sync_parents: ParentIndex,
    async_parents: ParentIndex,
    sync_escapable: FxHashSet<State>,
    async_escapable: FxHashSet<State>,
}

/// Attractor sets and parent indices that were computed elsewhere (typically loaded
/// from a file). Missing items are computed from the network.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedDynamics {
    pub sync_attractors: Option<AttractorSet>,
    pub async_attractors: Option<AttractorSet>,
    pub sync_parents: Option<ParentIndex>,
    pub async_parents: Option<ParentIndex>,
}
