use crate::dynamics::{AsyncUpdate, SyncUpdate, UpdateSemantics};
use crate::state_space::{EvolutionOperator, State};
use crate::BooleanNetwork;
use std::fmt::{Display, Error, Formatter};

impl UpdateSemantics {
    /// Translate the usual `synchronous: bool` flag into semantics.
    pub fn from_synchronous(synchronous: bool) -> UpdateSemantics {
        if synchronous {
            UpdateSemantics::Synchronous
        } else {
            UpdateSemantics::Asynchronous
        }
    }

    pub fn is_synchronous(self) -> bool {
        self == UpdateSemantics::Synchronous
    }
}

impl Display for UpdateSemantics {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            UpdateSemantics::Synchronous => write!(f, "synchronous"),
            UpdateSemantics::Asynchronous => write!(f, "asynchronous"),
        }
    }
}

/// Successor computation directly on the network.
impl BooleanNetwork {
    /// Compute the synchronous successor of `state`: every rule is evaluated in `state`
    /// and all variables are updated at once.
    pub fn sync_successor(&self, state: State) -> State {
        self.variables().fold(state, |next, var| {
            let value = self.get_update_rule(var).evaluate(state);
            next.set_bit(var.to_index(), value)
        })
    }

    /// Compute the asynchronous successors of `state`: for every variable, the state
    /// where only this variable is updated.
    ///
    /// Identical candidates are merged, so the result has `1..=num_vars` states. It is
    /// sorted in ascending order.
    pub fn async_successors(&self, state: State) -> Vec<State> {
        let mut result = self
            .variables()
            .map(|var| {
                let value = self.get_update_rule(var).evaluate(state);
                state.set_bit(var.to_index(), value)
            })
            .collect::<Vec<_>>();
        result.sort();
        result.dedup();
        result
    }

    /// The synchronous evolution operator of this network.
    pub fn sync_update(&self) -> SyncUpdate<'_> {
        SyncUpdate { network: self }
    }

    /// The asynchronous evolution operator of this network.
    pub fn async_update(&self) -> AsyncUpdate<'_> {
        AsyncUpdate { network: self }
    }
}

impl<'a> EvolutionOperator for SyncUpdate<'a> {
    type Iterator = std::iter::Once<State>;

    fn step(&self, current: State) -> Self::Iterator {
        std::iter::once(self.network.sync_successor(current))
    }
}

impl<'a> EvolutionOperator for AsyncUpdate<'a> {
    type Iterator = std::vec::IntoIter<State>;

    fn step(&self, current: State) -> Self::Iterator {
        self.network.async_successors(current).into_iter()
    }
}
