use crate::state_space::{EvolutionOperator, State, StateRange};
use log::{debug, trace};
use std::cmp::min;

const UNVISITED: usize = usize::MAX;

/// Find all sink strongly connected components of the state transition graph given
/// by `operator` over all `2^num_vars` states.
///
/// The graph is first materialized as a compact adjacency list and then decomposed using
/// an iterative Tarjan's algorithm. A component is a sink if no edge leaves it. Since
/// Tarjan's algorithm completes components in reverse topological order, all successors of
/// a completed component are already assigned to a component when the check is performed.
///
/// Each component is returned sorted. Components are ordered by their smallest state.
pub fn sink_components<E: EvolutionOperator>(num_vars: usize, operator: &E) -> Vec<Vec<State>> {
    let num_states = 1usize << num_vars;

    // Compressed adjacency: successors of `s` are `targets[offsets[s]..offsets[s + 1]]`.
    let mut offsets = Vec::with_capacity(num_states + 1);
    let mut targets = Vec::with_capacity(num_states);
    for state in StateRange::new(num_vars) {
        offsets.push(targets.len());
        targets.extend(operator.step(state).map(|it| it.index()));
    }
    offsets.push(targets.len());
    debug!(
        "Built transition graph with {} states and {} edges.",
        num_states,
        targets.len()
    );

    let mut index = vec![UNVISITED; num_states];
    let mut low_link = vec![0usize; num_states];
    let mut on_stack = vec![false; num_states];
    let mut component = vec![UNVISITED; num_states];
    let mut next_index = 0;
    let mut next_component = 0;

    let mut stack: Vec<usize> = Vec::new();
    // Frames of the simulated recursion: a vertex and the position of its next edge.
    let mut call_stack: Vec<(usize, usize)> = Vec::new();
    let mut sinks = Vec::new();

    for root in 0..num_states {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = next_index;
        low_link[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        call_stack.push((root, offsets[root]));

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.0;
            if frame.1 < offsets[v + 1] {
                let w = targets[frame.1];
                frame.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    low_link[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call_stack.push((w, offsets[w]));
                } else if on_stack[w] {
                    low_link[v] = min(low_link[v], index[w]);
                }
                continue;
            }

            call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                low_link[parent] = min(low_link[parent], low_link[v]);
            }
            if low_link[v] != index[v] {
                continue;
            }

            let mut members = Vec::new();
            while let Some(w) = stack.pop() {
                on_stack[w] = false;
                component[w] = next_component;
                members.push(w);
                if w == v {
                    break;
                }
            }
            let is_sink = members.iter().all(|m| {
                targets[offsets[*m]..offsets[*m + 1]]
                    .iter()
                    .all(|t| component[*t] == next_component)
            });
            if is_sink {
                trace!("Found sink component with {} state(s).", members.len());
                let mut states = members.into_iter().map(State::from).collect::<Vec<_>>();
                states.sort();
                sinks.push(states);
            }
            next_component += 1;
        }
    }

    sinks.sort();
    debug!(
        "Found {} sink component(s) among {} component(s).",
        sinks.len(),
        next_component
    );
    sinks
}
