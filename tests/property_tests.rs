//! Property-based tests for graph validation and trigger resolution.
//!
//! Graphs are generated with fixed-outcome guards so the expected result of
//! any trigger can be computed independently of the engine.

use proptest::prelude::*;
use statecraft::builder::{BuildError, GraphViolation};
use statecraft::core::{GraphDefinition, State};
use statecraft::runtime::{Machine, TriggerError};
use std::sync::Arc;

const EVENTS: [&str; 3] = ["a", "b", "c"];

#[derive(Clone, Debug)]
struct Edge {
    source: usize,
    target: usize,
    event: usize,
    passes: bool,
}

fn states(count: usize, initial: impl Fn(usize) -> bool) -> Vec<State> {
    (0..count)
        .map(|i| {
            let state = State::new(format!("s{i}"));
            if initial(i) {
                state.initial()
            } else {
                state
            }
        })
        .collect()
}

fn build(count: usize, edges: &[Edge]) -> Arc<GraphDefinition<()>> {
    let states = states(count, |i| i == 0);
    let transitions = edges
        .iter()
        .map(|edge| {
            let passes = edge.passes;
            states[edge.source]
                .to(&states[edge.target], EVENTS[edge.event])
                .when(move |_: &(), _| passes)
        })
        .collect();

    GraphDefinition::build(states, transitions).unwrap()
}

/// Expected outcome of triggering `event` from `state`, by declaration order.
fn expected(edges: &[Edge], state: usize, event: usize) -> Result<usize, bool> {
    let mut candidates = edges
        .iter()
        .filter(|e| e.source == state && e.event == event)
        .peekable();
    if candidates.peek().is_none() {
        return Err(true);
    }
    candidates.find(|e| e.passes).map(|e| e.target).ok_or(false)
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    (1usize..6).prop_flat_map(|count| {
        let edge = (0..count, 0..count, 0..EVENTS.len(), any::<bool>()).prop_map(
            |(source, target, event, passes)| Edge {
                source,
                target,
                event,
                passes,
            },
        );
        (Just(count), prop::collection::vec(edge, 0..12))
    })
}

proptest! {
    #[test]
    fn initial_count_other_than_one_is_rejected(
        flags in prop::collection::vec(any::<bool>(), 1..8)
            .prop_filter("exactly one initial is valid", |f| f.iter().filter(|&&b| b).count() != 1)
    ) {
        let states = states(flags.len(), |i| flags[i]);
        let err = GraphDefinition::<()>::build(states, vec![]).unwrap_err();

        let BuildError::InvalidStateGraph { violations } = err;
        let initial_count = flags.iter().filter(|&&b| b).count();
        let reported = violations.iter().any(|v| match v {
            GraphViolation::MissingInitialState => initial_count == 0,
            GraphViolation::MultipleInitialStates { names } => names.len() == initial_count,
            _ => false,
        });
        prop_assert!(reported);
    }

    #[test]
    fn new_machine_starts_in_initial_state((count, edges) in graph_strategy()) {
        let graph = build(count, &edges);
        let machine = Machine::new(graph, ()).unwrap();

        prop_assert_eq!(machine.current_state().name(), "s0");
        prop_assert!(machine.current_state().is_initial());
    }

    #[test]
    fn trigger_takes_first_passing_candidate(
        (count, edges) in graph_strategy(),
        events in prop::collection::vec(0..EVENTS.len(), 1..10),
    ) {
        let graph = build(count, &edges);
        let mut machine = Machine::new(graph, ()).unwrap();
        let mut current = 0;

        for event in events {
            let outcome = machine.trigger(EVENTS[event]).map(|s| s.name().to_string());
            match (expected(&edges, current, event), outcome) {
                (Ok(target), Ok(name)) => {
                    prop_assert_eq!(name, format!("s{target}"));
                    current = target;
                }
                (Err(true), Err(TriggerError::UnknownEvent { .. })) => {}
                (Err(false), Err(TriggerError::NoTransition { .. })) => {}
                (want, got) => prop_assert!(false, "expected {:?}, got {:?}", want, got),
            }
            prop_assert_eq!(machine.current_state().name(), format!("s{current}"));
        }
    }

    #[test]
    fn identical_event_sequences_give_identical_paths(
        (count, edges) in graph_strategy(),
        events in prop::collection::vec(0..EVENTS.len(), 0..10),
    ) {
        let graph = build(count, &edges);
        let mut first = Machine::new(Arc::clone(&graph), ()).unwrap();
        let mut second = Machine::new(graph, ()).unwrap();

        for &event in &events {
            let a = first.trigger(EVENTS[event]).map(|s| s.name().to_string()).ok();
            let b = second.trigger(EVENTS[event]).map(|s| s.name().to_string()).ok();
            prop_assert_eq!(a, b);
        }

        let first_path = first.history().map(|h| h.get_path());
        let second_path = second.history().map(|h| h.get_path());
        prop_assert_eq!(first_path, second_path);
    }

    #[test]
    fn rejected_triggers_record_nothing(
        (count, edges) in graph_strategy(),
        event in 0..EVENTS.len(),
    ) {
        let graph = build(count, &edges);
        let mut machine = Machine::new(graph, ()).unwrap();

        if machine.trigger(EVENTS[event]).is_err() {
            prop_assert_eq!(machine.current_state().name(), "s0");
            prop_assert_eq!(machine.history().map(|h| h.len()), Some(0));
        } else {
            prop_assert_eq!(machine.history().map(|h| h.len()), Some(1));
        }
    }

    #[test]
    fn available_events_match_declared_candidates(
        (count, edges) in graph_strategy(),
    ) {
        let graph = build(count, &edges);
        let machine = Machine::new(graph, ()).unwrap();

        for (i, name) in EVENTS.iter().enumerate() {
            let declared = edges.iter().any(|e| e.source == 0 && e.event == i);
            prop_assert_eq!(machine.can_trigger(name), declared);
            prop_assert_eq!(machine.available_events().contains(name), declared);
        }
    }
}
