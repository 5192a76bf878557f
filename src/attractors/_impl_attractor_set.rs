use crate::attractors::AttractorSet;
use crate::state_space::State;
use fxhash::FxHashSet;

impl AttractorSet {
    /// Create a set from individual attractors. The attractors are kept as they are given.
    pub fn from_components(components: Vec<Vec<State>>) -> AttractorSet {
        let states = components.iter().flatten().cloned().collect();
        AttractorSet {
            states,
            components: Some(components),
        }
    }

    /// Create a set from a flat collection of attractor states (e.g. loaded from a file).
    /// Such set does not know the individual attractors.
    pub fn from_states<I: IntoIterator<Item = State>>(states: I) -> AttractorSet {
        AttractorSet {
            states: states.into_iter().collect(),
            components: None,
        }
    }

    /// True if `state` lies in some attractor.
    pub fn contains(&self, state: State) -> bool {
        self.states.contains(&state)
    }

    /// The number of attractor states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All attractor states in ascending order.
    pub fn sorted_states(&self) -> Vec<State> {
        let mut result = self.states.iter().cloned().collect::<Vec<_>>();
        result.sort();
        result
    }

    /// The underlying set of attractor states.
    pub fn states(&self) -> &FxHashSet<State> {
        &self.states
    }

    /// The individual attractors (each sorted), or `None` if the set was created
    /// from a flat list of states.
    pub fn components(&self) -> Option<&[Vec<State>]> {
        self.components.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use crate::attractors::AttractorSet;
    use crate::state_space::State;

    #[test]
    fn set_from_components() {
        let set = AttractorSet::from_components(vec![
            vec![State::from(3)],
            vec![State::from(0), State::from(5)],
        ]);
        assert_eq!(3, set.len());
        assert!(!set.is_empty());
        assert!(set.contains(State::from(5)));
        assert!(!set.contains(State::from(1)));
        assert_eq!(
            vec![State::from(0), State::from(3), State::from(5)],
            set.sorted_states()
        );
        assert_eq!(2, set.components().unwrap().len());
    }

    #[test]
    fn set_from_states() {
        let set = AttractorSet::from_states([State::from(2), State::from(2), State::from(1)]);
        assert_eq!(2, set.len());
        assert!(set.components().is_none());
        assert!(AttractorSet::default().is_empty());
    }
}
