//! Named guards and hooks attached to a machine type.

use crate::core::{Guard, HookError, State, Transition};
use crate::runtime::event::Event;
use crate::runtime::hooks::Hooks;
use std::collections::HashMap;

/// The behaviour a host binds to a graph: guards referenced by name from
/// transitions, and lifecycle hooks.
///
/// Bindings are shared behind an `Arc` by every machine of one type. Named
/// guards are resolved once when a machine is constructed, so a missing
/// guard is reported before the first trigger.
///
/// # Example
///
/// ```rust
/// use statecraft::runtime::Bindings;
///
/// struct Door {
///     locked: bool,
///     opened: u32,
/// }
///
/// let bindings = Bindings::<Door>::new()
///     .guard("is_unlocked", |door, _| !door.locked)
///     .on_enter("open", |door, _, _| {
///         door.opened += 1;
///         Ok(())
///     });
///
/// assert!(bindings.has_guard("is_unlocked"));
/// ```
pub struct Bindings<C> {
    guards: HashMap<String, Guard<C>>,
    hooks: Hooks<C>,
}

impl<C> Bindings<C> {
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
            hooks: Hooks::new(),
        }
    }

    pub fn has_guard(&self, name: &str) -> bool {
        self.guards.contains_key(name)
    }

    pub(crate) fn resolve_guard(&self, name: &str) -> Option<&Guard<C>> {
        self.guards.get(name)
    }

    pub fn hooks(&self) -> &Hooks<C> {
        &self.hooks
    }
}

impl<C: 'static> Bindings<C> {
    /// Register a guard under `name`.
    pub fn guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C, &State) -> bool + Send + Sync + 'static,
    {
        self.guards.insert(name.into(), Guard::new(predicate));
        self
    }

    /// Register a guard whose evaluation may fail.
    pub fn try_guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C, &State) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        self.guards.insert(name.into(), Guard::try_new(predicate));
        self
    }

    pub fn on_enter<F>(mut self, state: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, &State, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on_enter(state, hook);
        self
    }

    pub fn on_exit<F>(mut self, state: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, &State, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on_exit(state, hook);
        self
    }

    /// Run ahead of `on_exit` whenever the named transition is taken.
    pub fn before<F>(mut self, transition: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.before(transition, hook);
        self
    }

    pub fn on_transition<F>(mut self, transition: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on_transition(transition, hook);
        self
    }

    /// Run after `on_transition` and before the new state is committed.
    pub fn after<F>(mut self, transition: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.after(transition, hook);
        self
    }
}

impl<C> Default for Bindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Coin {
        heads: bool,
    }

    #[test]
    fn guards_resolve_by_name() {
        let bindings = Bindings::<Coin>::new().guard("is_heads", |coin, _| coin.heads);
        let guard = bindings.resolve_guard("is_heads").unwrap();

        assert!(guard.check(&Coin { heads: true }, &State::new("heads")).unwrap());
        assert!(bindings.resolve_guard("is_tails").is_none());
    }

    #[test]
    fn fallible_guards_are_registered() {
        let bindings = Bindings::<Coin>::new().try_guard("flaky", |_, _| Err("no coin".into()));

        let err = bindings
            .resolve_guard("flaky")
            .unwrap()
            .check(&Coin { heads: true }, &State::new("heads"))
            .unwrap_err();
        assert_eq!(err.to_string(), "no coin");
    }

    #[test]
    fn hooks_are_forwarded() {
        let bindings = Bindings::<Coin>::new()
            .on_enter("heads", |_, _, _| Ok(()))
            .on_exit("tails", |_, _, _| Ok(()))
            .on_transition("toss", |_, _, _| Ok(()))
            .before("toss", |_, _, _| Ok(()))
            .after("toss", |_, _, _| Ok(()));

        assert_eq!(bindings.hooks().targets().count(), 5);
    }
}
