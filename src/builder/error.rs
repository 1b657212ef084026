//! Errors raised while building a state graph.

use thiserror::Error;

/// A single structural problem found in a graph declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("state at position {position} has an empty name")]
    EmptyStateName { position: usize },

    #[error("state '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("no initial state declared. Mark exactly one state with .initial()")]
    MissingInitialState,

    #[error("only one initial state is permitted, found: {}", .names.join(", "))]
    MultipleInitialStates { names: Vec<String> },

    #[error("transition at position {order} has an empty event name")]
    EmptyEventName { order: usize },

    #[error("transition '{transition}' leaves undeclared state '{state}'")]
    UnknownSource { transition: String, state: String },

    #[error("transition '{transition}' enters undeclared state '{state}'")]
    UnknownTarget { transition: String, state: String },
}

/// Errors that can occur when building a state graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Every violation found is reported, not just the first.
    #[error("invalid state graph: {}", render(.violations))]
    InvalidStateGraph { violations: Vec<GraphViolation> },
}

impl BuildError {
    pub fn violations(&self) -> &[GraphViolation] {
        match self {
            Self::InvalidStateGraph { violations } => violations,
        }
    }
}

fn render(violations: &[GraphViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
