//! Transition declarations.

use super::guard::{Guard, GuardRef, HookError};
use super::state::State;
use std::fmt;

/// A directed edge between two states, taken when its event is triggered
/// and its guard (if any) passes.
///
/// Source and target are stored by name and resolved when the graph is
/// built. Several transitions may share a source and an event; the first
/// one in declaration order whose guard passes wins.
pub struct Transition<C> {
    name: Option<String>,
    source: String,
    target: String,
    event: String,
    guard: Option<GuardRef<C>>,
    description: Option<String>,
    pub(crate) order: usize,
    pub(crate) source_index: usize,
    pub(crate) target_index: usize,
}

/// Handle returned when a transition is declared.
pub type TransitionHandle<C> = Transition<C>;

impl<C> Transition<C> {
    pub(crate) fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            source: source.into(),
            target: target.into(),
            event: event.into(),
            guard: None,
            description: None,
            order: 0,
            source_index: 0,
            target_index: 0,
        }
    }

    /// Declare a transition with every attribute spelled out.
    pub fn declare(
        source: &State,
        target: &State,
        event: impl Into<String>,
        guard: Option<GuardRef<C>>,
        description: impl Into<String>,
    ) -> Self {
        let mut transition = Self::new(source.name(), target.name(), event);
        transition.guard = guard;
        transition.description = Some(description.into());
        transition
    }

    /// Reference a guard registered by name in the machine's bindings.
    pub fn guard_named(mut self, name: impl Into<String>) -> Self {
        self.guard = Some(GuardRef::Named(name.into()));
        self
    }

    /// Attach a pre-built guard.
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(GuardRef::Inline(guard));
        self
    }

    /// Name the transition. `on_transition` hooks are keyed by this name,
    /// which defaults to the event name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.event)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Position in the graph's declaration order. Only meaningful once the
    /// transition belongs to a built graph.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    pub fn guard_ref(&self) -> Option<&GuardRef<C>> {
        self.guard.as_ref()
    }
}

impl<C: 'static> Transition<C> {
    /// Guard this transition with a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&C, &State) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Guard this transition with a closure that may fail.
    pub fn try_when<F>(self, predicate: F) -> Self
    where
        F: Fn(&C, &State) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        self.guard(Guard::try_new(predicate))
    }
}

impl<C> Clone for Transition<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
            event: self.event.clone(),
            guard: self.guard.clone(),
            description: self.description.clone(),
            order: self.order,
            source_index: self.source_index,
            target_index: self.target_index,
        }
    }
}

impl<C> fmt::Debug for Transition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name())
            .field("source", &self.source)
            .field("target", &self.target)
            .field("event", &self.event)
            .field("guard", &self.guard)
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Door {
        locked: bool,
    }

    #[test]
    fn name_defaults_to_event() {
        let t: Transition<Door> = State::new("open").to(&State::new("closed"), "close");
        assert_eq!(t.name(), "close");

        let t = t.named("closing");
        assert_eq!(t.name(), "closing");
        assert_eq!(t.event(), "close");
    }

    #[test]
    fn declare_records_guard_and_description() {
        let closed = State::new("closed");
        let open = State::new("open");
        let t: Transition<Door> = Transition::declare(
            &closed,
            &open,
            "open",
            Some(GuardRef::Named("is_unlocked".to_string())),
            "open the door",
        );

        assert_eq!(t.description(), Some("open the door"));
        assert_eq!(t.guard_ref().and_then(GuardRef::name), Some("is_unlocked"));
    }

    #[test]
    fn when_installs_inline_guard() {
        let t = State::new("closed")
            .to(&State::new("open"), "open")
            .when(|door: &Door, _| !door.locked);

        match t.guard_ref() {
            Some(GuardRef::Inline(guard)) => {
                let state = State::new("closed");
                assert!(guard.check(&Door::default(), &state).unwrap());
                assert!(!guard.check(&Door { locked: true }, &state).unwrap());
            }
            other => panic!("expected inline guard, got {:?}", other),
        }
    }

    #[test]
    fn clone_keeps_every_field() {
        let t: Transition<Door> = State::new("locked")
            .to(&State::new("closed"), "unlock")
            .named("unlocking")
            .describe("unlock the door")
            .guard_named("has_key");
        let cloned = t.clone();

        assert_eq!(cloned.name(), "unlocking");
        assert_eq!(cloned.description(), Some("unlock the door"));
        assert!(cloned.has_guard());
    }
}
