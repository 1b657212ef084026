//! Errors raised while constructing or driving a machine.

use crate::core::HookError;
use crate::runtime::hooks::HookKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when binding a graph to a machine instance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("transition '{transition}' references guard '{guard}', which is not bound")]
    UnresolvedGuard { transition: String, guard: String },

    #[error("{kind} hook registered for '{name}', which is not part of the graph")]
    UnknownHookTarget { kind: HookKind, name: String },
}

/// Where in the trigger protocol a user callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HookPhase {
    Guard,
    Before,
    Exit,
    Transition,
    After,
    Enter,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Guard => "guard",
            Self::Before => "before",
            Self::Exit => "on_exit",
            Self::Transition => "on_transition",
            Self::After => "after",
            Self::Enter => "on_enter",
        })
    }
}

/// A guard or hook returned an error during a trigger.
///
/// `committed` tells whether the machine had already moved to `to` when the
/// failure happened. Only `on_enter` failures are committed, and the machine
/// stays in the target state.
#[derive(Debug, Error)]
#[error("{phase} failed during '{transition}' ({from} -> {to}, committed: {committed}): {source}")]
pub struct CallbackError {
    pub phase: HookPhase,
    pub transition: String,
    pub from: String,
    pub to: String,
    pub committed: bool,
    #[source]
    pub source: HookError,
}

/// Errors that can occur when triggering an event.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("state '{state}' has no transition for event '{event}'")]
    UnknownEvent { state: String, event: String },

    #[error("every guard rejected event '{event}' in state '{state}' ({candidates} candidates)")]
    NoTransition {
        state: String,
        event: String,
        candidates: usize,
    },

    #[error("state '{state}' is not final but has no outgoing transitions")]
    DeadEnd { state: String },

    #[error(transparent)]
    Callback(#[from] CallbackError),
}

impl TriggerError {
    /// True for "this event is not valid right now" outcomes, which leave
    /// the machine untouched and are expected in normal operation.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::UnknownEvent { .. } | Self::NoTransition { .. })
    }

    /// True when the machine's state changed despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Callback(err) if err.committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_error_exposes_source() {
        let err = CallbackError {
            phase: HookPhase::Enter,
            transition: "closing".to_string(),
            from: "open".to_string(),
            to: "closed".to_string(),
            committed: true,
            source: "latch stuck".into(),
        };

        assert_eq!(
            err.to_string(),
            "on_enter failed during 'closing' (open -> closed, committed: true): latch stuck"
        );
        let source = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("latch stuck"));
    }

    #[test]
    fn rejection_classification() {
        let unknown = TriggerError::UnknownEvent {
            state: "locked".to_string(),
            event: "open".to_string(),
        };
        let dead_end = TriggerError::DeadEnd {
            state: "stuck".to_string(),
        };

        assert!(unknown.is_rejection());
        assert!(!unknown.is_committed());
        assert!(!dead_end.is_rejection());
    }

    #[test]
    fn committed_only_for_committed_callbacks() {
        let err: TriggerError = CallbackError {
            phase: HookPhase::Exit,
            transition: "t".to_string(),
            from: "a".to_string(),
            to: "b".to_string(),
            committed: false,
            source: "boom".into(),
        }
        .into();

        assert!(!err.is_committed());
        assert!(!err.is_rejection());
    }
}
