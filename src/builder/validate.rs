//! Structural validation of state graphs.
//!
//! Checks are accumulated with `Validation` rather than failing fast, so a
//! host sees every problem in its declaration at once.

use crate::builder::error::{BuildError, GraphViolation};
use crate::core::{GraphDefinition, State, Transition};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<GraphViolation>>;

fn pass() -> Check {
    Validation::success(())
}

fn violation(violation: GraphViolation) -> Check {
    Validation::fail(violation)
}

/// Validate a declaration and assemble the graph. All-or-nothing: no graph
/// is produced unless every check passes.
pub(crate) fn validate<C>(
    states: Vec<State>,
    mut transitions: Vec<Transition<C>>,
) -> Result<GraphDefinition<C>, BuildError> {
    let mut checks: Vec<Check> = Vec::new();

    // State names
    let mut index: HashMap<String, usize> = HashMap::with_capacity(states.len());
    for (position, state) in states.iter().enumerate() {
        let check = if state.name().is_empty() {
            violation(GraphViolation::EmptyStateName { position })
        } else if index.contains_key(state.name()) {
            violation(GraphViolation::DuplicateState {
                name: state.name().to_string(),
            })
        } else {
            index.insert(state.name().to_string(), position);
            pass()
        };
        checks.push(check);
    }

    // Exactly one initial state
    let initials: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_initial())
        .map(|(i, _)| i)
        .collect();
    checks.push(match initials.as_slice() {
        [] => violation(GraphViolation::MissingInitialState),
        [_] => pass(),
        many => violation(GraphViolation::MultipleInitialStates {
            names: many.iter().map(|&i| states[i].name().to_string()).collect(),
        }),
    });

    // Transition endpoints
    for (order, transition) in transitions.iter().enumerate() {
        if transition.event().is_empty() {
            checks.push(violation(GraphViolation::EmptyEventName { order }));
        }
        if !index.contains_key(transition.source()) {
            checks.push(violation(GraphViolation::UnknownSource {
                transition: transition.name().to_string(),
                state: transition.source().to_string(),
            }));
        }
        if !index.contains_key(transition.target()) {
            checks.push(violation(GraphViolation::UnknownTarget {
                transition: transition.name().to_string(),
                state: transition.target().to_string(),
            }));
        }
    }

    if let Validation::Failure(errors) = Validation::all_vec(checks) {
        let violations: Vec<GraphViolation> = errors.iter().cloned().collect();
        tracing::debug!(violations = violations.len(), "state graph rejected");
        return Err(BuildError::InvalidStateGraph { violations });
    }

    let mut outgoing = vec![Vec::new(); states.len()];
    for (order, transition) in transitions.iter_mut().enumerate() {
        transition.order = order;
        transition.source_index = index[transition.source()];
        transition.target_index = index[transition.target()];
        outgoing[transition.source_index].push(order);
    }

    tracing::debug!(
        states = states.len(),
        transitions = transitions.len(),
        initial = states[initials[0]].name(),
        "state graph validated"
    );

    Ok(GraphDefinition {
        initial: initials[0],
        states,
        transitions,
        index,
        outgoing,
    })
}
