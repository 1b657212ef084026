//! Fluent assembly of state graphs.

use crate::builder::error::BuildError;
use crate::builder::validate::validate;
use crate::core::{GraphDefinition, State, Transition};
use std::sync::Arc;

/// Builder for constructing state graphs with a fluent API.
///
/// Nothing is checked until [`build`](Self::build), which validates the
/// whole declaration at once.
pub struct GraphBuilder<C> {
    states: Vec<State>,
    transitions: Vec<Transition<C>>,
}

impl<C> GraphBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Declare a state. Declaration order is preserved.
    pub fn state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Declare several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.states.extend(states);
        self
    }

    /// Declare a transition. Its position here is its declaration order.
    pub fn transition(mut self, transition: Transition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Declare several transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<C>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<Arc<GraphDefinition<C>>, BuildError> {
        GraphDefinition::build(self.states, self.transitions)
    }
}

impl<C> Default for GraphBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> GraphDefinition<C> {
    /// Validate `states` and `transitions` and freeze them into a shareable graph.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statecraft::core::{GraphDefinition, State};
    ///
    /// let heads = State::new("heads").initial();
    /// let tails = State::new("tails");
    ///
    /// let graph = GraphDefinition::<()>::build(
    ///     vec![heads.clone(), tails.clone()],
    ///     vec![heads.to(&tails, "toss"), tails.to(&heads, "toss")],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(graph.initial_state().name(), "heads");
    /// ```
    pub fn build(
        states: Vec<State>,
        transitions: Vec<Transition<C>>,
    ) -> Result<Arc<Self>, BuildError> {
        validate(states, transitions).map(Arc::new)
    }
}
