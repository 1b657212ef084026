//! Builder API for assembling and validating state graphs.
//!
//! Graphs are declared explicitly, either with [`GraphBuilder`] or with
//! [`GraphDefinition::build`](crate::core::GraphDefinition::build), and
//! validated exactly once before any machine can be created from them.

pub mod error;
pub mod graph;
mod validate;

pub use error::{BuildError, GraphViolation};
pub use graph::GraphBuilder;
