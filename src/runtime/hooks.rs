//! Lifecycle hook registry and dispatch.
//!
//! A taken transition fires up to five hooks, in order: `before(transition)`,
//! `on_exit(source)`, `on_transition(transition)`, `after(transition)`, then
//! `on_enter(target)` once the new state is committed.
//!
//! Hooks are optional. Dispatching a kind for which nothing is registered
//! is a no-op; a registered hook runs synchronously and its error is
//! returned to the caller untouched.

use crate::core::{HookError, State, Transition};
use crate::runtime::event::Event;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Hook run when a state is entered or exited.
pub type StateHook<C> = dyn Fn(&mut C, &State, &Event) -> Result<(), HookError> + Send + Sync;

/// Hook run while a transition is being taken.
pub type TransitionHook<C> =
    dyn Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HookKind {
    Before,
    Exit,
    Transition,
    After,
    Enter,
}

impl HookKind {
    /// Whether hooks of this kind are keyed by transition name rather than
    /// state name.
    pub fn is_transition_keyed(self) -> bool {
        matches!(self, Self::Before | Self::Transition | Self::After)
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "before",
            Self::Exit => "on_exit",
            Self::Transition => "on_transition",
            Self::After => "after",
            Self::Enter => "on_enter",
        })
    }
}

/// Hooks keyed by state name (enter/exit) or transition name
/// (before/transition/after).
///
/// At most one hook per kind and name; registering again replaces it.
pub struct Hooks<C> {
    enter: HashMap<String, Arc<StateHook<C>>>,
    exit: HashMap<String, Arc<StateHook<C>>>,
    before: HashMap<String, Arc<TransitionHook<C>>>,
    transition: HashMap<String, Arc<TransitionHook<C>>>,
    after: HashMap<String, Arc<TransitionHook<C>>>,
}

impl<C> Hooks<C> {
    pub fn new() -> Self {
        Self {
            enter: HashMap::new(),
            exit: HashMap::new(),
            before: HashMap::new(),
            transition: HashMap::new(),
            after: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty()
            && self.exit.is_empty()
            && self.before.is_empty()
            && self.transition.is_empty()
            && self.after.is_empty()
    }

    pub fn has(&self, kind: HookKind, name: &str) -> bool {
        match kind {
            HookKind::Before => self.before.contains_key(name),
            HookKind::Exit => self.exit.contains_key(name),
            HookKind::Transition => self.transition.contains_key(name),
            HookKind::After => self.after.contains_key(name),
            HookKind::Enter => self.enter.contains_key(name),
        }
    }

    /// Every registered (kind, name) pair.
    pub fn targets(&self) -> impl Iterator<Item = (HookKind, &str)> {
        keys(HookKind::Before, &self.before)
            .chain(keys(HookKind::Exit, &self.exit))
            .chain(keys(HookKind::Transition, &self.transition))
            .chain(keys(HookKind::After, &self.after))
            .chain(keys(HookKind::Enter, &self.enter))
    }

    pub fn invoke_before(
        &self,
        context: &mut C,
        transition: &Transition<C>,
        event: &Event,
    ) -> Result<(), HookError> {
        dispatch_transition(&self.before, context, transition, event)
    }

    pub fn invoke_exit(
        &self,
        context: &mut C,
        state: &State,
        event: &Event,
    ) -> Result<(), HookError> {
        dispatch_state(&self.exit, context, state, event)
    }

    pub fn invoke_transition(
        &self,
        context: &mut C,
        transition: &Transition<C>,
        event: &Event,
    ) -> Result<(), HookError> {
        dispatch_transition(&self.transition, context, transition, event)
    }

    pub fn invoke_after(
        &self,
        context: &mut C,
        transition: &Transition<C>,
        event: &Event,
    ) -> Result<(), HookError> {
        dispatch_transition(&self.after, context, transition, event)
    }

    pub fn invoke_enter(
        &self,
        context: &mut C,
        state: &State,
        event: &Event,
    ) -> Result<(), HookError> {
        dispatch_state(&self.enter, context, state, event)
    }
}

impl<C: 'static> Hooks<C> {
    pub fn on_enter<F>(&mut self, state: impl Into<String>, hook: F)
    where
        F: Fn(&mut C, &State, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.enter.insert(state.into(), Arc::new(hook));
    }

    pub fn on_exit<F>(&mut self, state: impl Into<String>, hook: F)
    where
        F: Fn(&mut C, &State, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.exit.insert(state.into(), Arc::new(hook));
    }

    pub fn before<F>(&mut self, transition: impl Into<String>, hook: F)
    where
        F: Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.before.insert(transition.into(), Arc::new(hook));
    }

    pub fn on_transition<F>(&mut self, transition: impl Into<String>, hook: F)
    where
        F: Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.transition.insert(transition.into(), Arc::new(hook));
    }

    pub fn after<F>(&mut self, transition: impl Into<String>, hook: F)
    where
        F: Fn(&mut C, &Transition<C>, &Event) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.after.insert(transition.into(), Arc::new(hook));
    }
}

fn keys<V>(
    kind: HookKind,
    hooks: &HashMap<String, V>,
) -> impl Iterator<Item = (HookKind, &str)> {
    hooks.keys().map(move |name| (kind, name.as_str()))
}

fn dispatch_state<C>(
    hooks: &HashMap<String, Arc<StateHook<C>>>,
    context: &mut C,
    state: &State,
    event: &Event,
) -> Result<(), HookError> {
    match hooks.get(state.name()) {
        Some(hook) => hook(context, state, event),
        None => Ok(()),
    }
}

fn dispatch_transition<C>(
    hooks: &HashMap<String, Arc<TransitionHook<C>>>,
    context: &mut C,
    transition: &Transition<C>,
    event: &Event,
) -> Result<(), HookError> {
    match hooks.get(transition.name()) {
        Some(hook) => hook(context, transition, event),
        None => Ok(()),
    }
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Hooks<C> {
    fn clone(&self) -> Self {
        Self {
            enter: self.enter.clone(),
            exit: self.exit.clone(),
            before: self.before.clone(),
            transition: self.transition.clone(),
            after: self.after.clone(),
        }
    }
}
