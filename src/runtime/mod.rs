//! Running machines.
//!
//! A [`Machine`] pairs a shared graph with shared [`Bindings`] and owns the
//! host context plus its current-state cursor.
//!
//! # Key Concepts
//!
//! - **Trigger**: event-driven, first passing candidate in declaration order wins
//! - **Step**: polling variant that considers every outgoing transition
//! - **Hooks**: `before` → `on_exit` → `on_transition` → `after` → commit → `on_enter`

mod bindings;
mod error;
mod event;
mod hooks;
mod machine;

pub use bindings::Bindings;
pub use error::{BindError, CallbackError, HookPhase, TriggerError};
pub use event::Event;
pub use hooks::{HookKind, Hooks, StateHook, TransitionHook};
pub use machine::{Machine, MachineBuilder, StepResult};
