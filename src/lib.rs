//! Statecraft: an event-driven finite state machine engine
//!
//! A host declares a graph of named states and guarded transitions once,
//! then drives any number of machine instances through it with external
//! events. Each trigger selects a transition, runs lifecycle hooks around the
//! state change and returns synchronously. The engine performs no I/O and
//! never schedules anything on its own.
//!
//! # Core Concepts
//!
//! - **Graph**: validated, immutable states and transitions, shared via `Arc`
//! - **Guards**: typed predicates over the host context, evaluated in
//!   declaration order; the first to pass wins
//! - **Hooks**: optional `before`, `on_exit`, `on_transition`, `after` and
//!   `on_enter` callbacks
//! - **Machine**: one instance with its own context and current state
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::GraphBuilder;
//! use statecraft::core::State;
//! use statecraft::runtime::{Bindings, Machine, TriggerError};
//!
//! struct Door {
//!     locked: bool,
//! }
//!
//! fn main() -> statecraft::Result<()> {
//!     let open = State::new("open").initial();
//!     let closed = State::new("closed");
//!     let locked = State::new("locked");
//!
//!     let graph = GraphBuilder::<Door>::new()
//!         .states([open.clone(), closed.clone(), locked.clone()])
//!         .transition(open.to(&closed, "close"))
//!         .transition(closed.to(&open, "open").guard_named("is_unlocked"))
//!         .transition(closed.to(&locked, "lock"))
//!         .transition(locked.to(&closed, "unlock"))
//!         .build()?;
//!
//!     let bindings = Bindings::<Door>::new()
//!         .guard("is_unlocked", |door, _| !door.locked)
//!         .on_enter("locked", |door, _, _| {
//!             door.locked = true;
//!             Ok(())
//!         })
//!         .on_exit("locked", |door, _, _| {
//!             door.locked = false;
//!             Ok(())
//!         });
//!
//!     let mut door = Machine::builder(graph)
//!         .bindings(bindings)
//!         .build(Door { locked: false })?;
//!
//!     door.trigger("close")?;
//!     door.trigger("lock")?;
//!     assert!(matches!(
//!         door.trigger("open"),
//!         Err(TriggerError::UnknownEvent { .. })
//!     ));
//!     assert_eq!(door.current_state().name(), "locked");
//!
//!     door.trigger("unlock")?;
//!     assert_eq!(door.trigger("open")?.name(), "open");
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, GraphBuilder};
pub use config::MachineConfig;
pub use core::{GraphDefinition, Guard, State, Transition};
pub use error::{Error, Result};
pub use runtime::{Bindings, Event, Machine, StepResult, TriggerError};
