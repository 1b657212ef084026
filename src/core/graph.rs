//! The validated, immutable state graph shared by every machine of one type.

use super::state::State;
use super::transition::Transition;
use serde::Serialize;
use std::collections::HashMap;

/// Validated set of states and transitions.
///
/// A graph is only obtainable through [`GraphDefinition::build`] or
/// [`GraphBuilder`](crate::builder::GraphBuilder), both of which validate it
/// up front. It is never mutated afterwards and is shared behind an `Arc`.
#[derive(Debug)]
pub struct GraphDefinition<C> {
    pub(crate) states: Vec<State>,
    pub(crate) transitions: Vec<Transition<C>>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) outgoing: Vec<Vec<usize>>,
    pub(crate) initial: usize,
}

impl<C> GraphDefinition<C> {
    /// States in declaration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> &[Transition<C>] {
        &self.transitions
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    pub fn initial_state(&self) -> &State {
        &self.states[self.initial]
    }

    pub fn final_states(&self) -> impl Iterator<Item = &State> {
        self.states.iter().filter(|s| s.is_final())
    }

    /// Transitions leaving `state`, in declaration order. Empty for unknown names.
    pub fn outgoing(&self, state: &str) -> impl Iterator<Item = &Transition<C>> {
        let indices: &[usize] = self
            .index
            .get(state)
            .map(|&i| self.outgoing[i].as_slice())
            .unwrap_or(&[]);
        indices.iter().map(move |&i| &self.transitions[i])
    }

    /// Serializable view of the graph for external exporters.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            initial: self.initial_state().name().to_string(),
            states: self.states.clone(),
            transitions: self
                .transitions
                .iter()
                .map(|t| TransitionSnapshot {
                    name: t.name().to_string(),
                    source: t.source().to_string(),
                    target: t.target().to_string(),
                    event: t.event().to_string(),
                    description: t.description().map(str::to_string),
                    guarded: t.has_guard(),
                    guard: t.guard_ref().and_then(|g| g.name()).map(str::to_string),
                    order: t.order(),
                })
                .collect(),
        }
    }

    pub(crate) fn state_at(&self, index: usize) -> &State {
        &self.states[index]
    }

    pub(crate) fn transition_at(&self, index: usize) -> &Transition<C> {
        &self.transitions[index]
    }

    pub(crate) fn outgoing_indices(&self, state: usize) -> &[usize] {
        &self.outgoing[state]
    }
}

/// Plain-data copy of a graph, suitable for rendering or JSON export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub initial: String,
    pub states: Vec<State>,
    pub transitions: Vec<TransitionSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionSnapshot {
    pub name: String,
    pub source: String,
    pub target: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub guarded: bool,
    /// Guard name when the guard is resolved from bindings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    pub order: usize,
}
