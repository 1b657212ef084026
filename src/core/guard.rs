//! Guard predicates for controlling state transitions.
//!
//! Guards decide whether a candidate transition is eligible. They only ever
//! see shared borrows of the host context and the current state, so a guard
//! can consult domain state outside the graph but cannot move the machine.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Error type returned by fallible guards and by hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type Predicate<C> = dyn Fn(&C, &State) -> Result<bool, HookError> + Send + Sync;

/// Typed predicate bound to a machine's context.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Guard, State};
///
/// struct Door {
///     locked: bool,
/// }
///
/// let unlocked = Guard::new(|door: &Door, _state: &State| !door.locked);
/// let closed = State::new("closed");
///
/// assert!(unlocked.check(&Door { locked: false }, &closed).unwrap());
/// assert!(!unlocked.check(&Door { locked: true }, &closed).unwrap());
/// ```
pub struct Guard<C> {
    predicate: Arc<Predicate<C>>,
}

impl<C: 'static> Guard<C> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &State) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(move |context: &C, state: &State| -> Result<bool, HookError> {
                Ok(predicate(context, state))
            }),
        }
    }

    /// Create a guard whose evaluation may fail.
    ///
    /// A failing guard aborts the trigger before any hook runs.
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &State) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }
}

impl<C> Guard<C> {
    /// Evaluate the predicate against `context` while the machine sits in `state`.
    pub fn check(&self, context: &C, state: &State) -> Result<bool, HookError> {
        (self.predicate)(context, state)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(<fn>)")
    }
}

/// How a transition refers to its guard.
pub enum GuardRef<C> {
    /// A predicate supplied directly at declaration time.
    Inline(Guard<C>),
    /// A predicate registered under this name in the machine's bindings,
    /// resolved when an instance is constructed.
    Named(String),
}

impl<C> GuardRef<C> {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Inline(_) => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl<C> Clone for GuardRef<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Inline(guard) => Self::Inline(guard.clone()),
            Self::Named(name) => Self::Named(name.clone()),
        }
    }
}

impl<C> fmt::Debug for GuardRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Inline(<fn>)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Decide whether a candidate transition may fire.
///
/// An absent guard always passes.
pub fn evaluate<C>(
    guard: Option<&Guard<C>>,
    context: &C,
    state: &State,
) -> Result<bool, HookError> {
    match guard {
        None => Ok(true),
        Some(guard) => guard.check(context, state),
    }
}
