use crate::state_space::{State, StateRange};
use crate::BooleanNetwork;
use log::debug;

/// Find all cycles of the synchronous successor map of `network`.
///
/// Every state is walked forward at most once: each walk marks the states it visits with
/// its own identifier and stops at the first state that was already marked. If the mark
/// belongs to the current walk, the walk has just closed a new cycle. Otherwise it ran into
/// a previously explored part of the graph and found nothing new.
///
/// Each cycle is returned sorted. Cycles are ordered by their smallest state.
pub fn sync_cycles(network: &BooleanNetwork) -> Vec<Vec<State>> {
    // Zero means unvisited, otherwise it is `start + 1` of the walk that got there first.
    let mut visited_by = vec![0usize; network.num_states()];
    let mut cycles = Vec::new();
    for start in StateRange::new(network.num_vars()) {
        if visited_by[start.index()] != 0 {
            continue;
        }
        let walk = start.index() + 1;
        let mut current = start;
        while visited_by[current.index()] == 0 {
            visited_by[current.index()] = walk;
            current = network.sync_successor(current);
        }
        if visited_by[current.index()] == walk {
            let mut cycle = vec![current];
            let mut next = network.sync_successor(current);
            while next != current {
                cycle.push(next);
                next = network.sync_successor(next);
            }
            cycle.sort();
            cycles.push(cycle);
        }
    }
    cycles.sort();
    debug!(
        "Found {} synchronous attractor(s) covering {} state(s).",
        cycles.len(),
        cycles.iter().map(|it| it.len()).sum::<usize>()
    );
    cycles
}

#[cfg(test)]
mod tests {
    use crate::attractors::{sync_cycles, synchronous_attractors};
    use crate::state_space::{State, StateRange};
    use crate::test_utils::{init_logger, mk_network, mk_oscillator, mk_shift_register};

    #[test]
    fn identity_swap_network() {
        init_logger();
        // x0 = x1, x1 = x0: (0,0) and (1,1) are fixed points, (1,0) <-> (0,1) is a cycle.
        let bn = mk_network(&[("x0", "x1"), ("x1", "x0")]);
        let attractors = synchronous_attractors(&bn);
        assert_eq!(4, attractors.len());
        for state in StateRange::new(2) {
            assert!(attractors.contains(state));
        }
        assert_eq!(
            vec![
                vec![State::from(0)],
                vec![State::from(1), State::from(2)],
                vec![State::from(3)],
            ],
            sync_cycles(&bn)
        );
    }

    #[test]
    fn constant_false_network() {
        let bn = mk_network(&[("x0", "FALSE")]);
        let attractors = synchronous_attractors(&bn);
        assert_eq!(vec![State::from(0)], attractors.sorted_states());
        assert!(!attractors.contains(State::from(1)));
        assert_eq!(State::from(0), bn.sync_successor(State::from(1)));
    }

    #[test]
    fn single_long_cycle() {
        let bn = mk_oscillator();
        assert_eq!(
            vec![vec![
                State::from(0),
                State::from(1),
                State::from(2),
                State::from(3)
            ]],
            sync_cycles(&bn)
        );
    }

    #[test]
    fn attractor_states_return_to_themselves() {
        let networks = [
            mk_shift_register(),
            mk_oscillator(),
            mk_network(&[
                ("a", "!b | c"),
                ("b", "a ^ c"),
                ("c", "a & b"),
                ("d", "!d"),
            ]),
        ];
        for bn in &networks {
            let attractors = synchronous_attractors(bn);
            assert!(!attractors.is_empty());
            for state in attractors.sorted_states() {
                let mut current = bn.sync_successor(state);
                let mut steps = 1;
                while current != state {
                    assert!(steps <= bn.num_states());
                    current = bn.sync_successor(current);
                    steps += 1;
                }
            }
            // Every state eventually reaches an attractor state.
            for state in StateRange::new(bn.num_vars()) {
                let mut current = state;
                for _ in 0..bn.num_states() {
                    current = bn.sync_successor(current);
                }
                assert!(attractors.contains(current));
            }
        }
    }
}
