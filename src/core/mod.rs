//! Core state graph types.
//!
//! This module contains the declarative side of the engine:
//! - States and transitions as plain declarations
//! - Guard predicates and their evaluation
//! - The validated, shareable graph
//! - In-memory transition history
//!
//! Nothing here owns a current state; that lives in
//! [`runtime::Machine`](crate::runtime::Machine).

pub mod guard;
mod graph;
mod history;
mod state;
mod transition;

pub use guard::{Guard, GuardRef, HookError};
pub use graph::{GraphDefinition, GraphSnapshot, TransitionSnapshot};
pub use history::{StateHistory, TransitionRecord};
pub use state::{State, StateHandle};
pub use transition::{Transition, TransitionHandle};
