//! State declarations.
//!
//! A [`State`] is a named node of the graph. The value itself is the handle
//! hosts declare transitions against, so it is cheap to clone and carries
//! no per-instance data.

use super::transition::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named node in a state graph.
///
/// Exactly one state in a graph must be marked initial. Any number of
/// states, including none, may be marked final.
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
///
/// let open = State::new("open").initial().describe("door is open");
/// let closed = State::new("closed");
///
/// assert!(open.is_initial());
/// assert!(!closed.is_final());
/// assert_eq!(open.description(), Some("door is open"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    initial: bool,
    #[serde(default, rename = "final")]
    terminal: bool,
}

/// Handle returned when a state is declared.
pub type StateHandle = State;

impl State {
    /// Declare a plain (non-initial, non-final) state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            initial: false,
            terminal: false,
        }
    }

    /// Declare a state with every attribute spelled out.
    pub fn declare(
        name: impl Into<String>,
        description: impl Into<String>,
        initial: bool,
        is_final: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            initial,
            terminal: is_final,
        }
    }

    /// Mark this state as the graph's entry point.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Mark this state as final.
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Attach a human-readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Final states are not special-cased by `trigger`; a well-formed graph
    /// simply declares no transitions leaving them.
    pub fn is_final(&self) -> bool {
        self.terminal
    }

    /// Declare a transition from this state to `target` on `event`.
    ///
    /// ```rust
    /// use statecraft::core::{State, Transition};
    ///
    /// let open = State::new("open").initial();
    /// let closed = State::new("closed");
    /// let closing: Transition<()> = open.to(&closed, "close");
    ///
    /// assert_eq!(closing.source(), "open");
    /// assert_eq!(closing.target(), "closed");
    /// assert_eq!(closing.event(), "close");
    /// ```
    pub fn to<C>(&self, target: &State, event: impl Into<String>) -> Transition<C> {
        Transition::new(self.name.clone(), target.name.clone(), event)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_no_flags() {
        let state = State::new("idle");

        assert_eq!(state.name(), "idle");
        assert!(!state.is_initial());
        assert!(!state.is_final());
        assert_eq!(state.description(), None);
    }

    #[test]
    fn builder_flags_are_applied() {
        let state = State::new("done").terminal().describe("all work finished");

        assert!(state.is_final());
        assert!(!state.is_initial());
        assert_eq!(state.description(), Some("all work finished"));
    }

    #[test]
    fn declare_sets_every_attribute() {
        let state = State::declare("ready", "waiting for a coin", true, false);

        assert_eq!(state.name(), "ready");
        assert_eq!(state.description(), Some("waiting for a coin"));
        assert!(state.is_initial());
        assert!(!state.is_final());
    }

    #[test]
    fn to_links_source_and_target_by_name() {
        let locked = State::new("locked");
        let closed = State::new("closed");

        let unlocking: Transition<()> = locked.to(&closed, "unlock");

        assert_eq!(unlocking.source(), "locked");
        assert_eq!(unlocking.target(), "closed");
        assert_eq!(unlocking.event(), "unlock");
        assert!(!unlocking.has_guard());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(State::new("heads").to_string(), "heads");
    }

    #[test]
    fn state_serializes_with_final_key() {
        let state = State::new("done").terminal();
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["name"], "done");
        assert_eq!(json["final"], true);
        assert_eq!(json["initial"], false);

        let back: State = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
