//! Machine instances and the trigger protocol.

use crate::config::MachineConfig;
use crate::core::guard::{self, Guard, GuardRef};
use crate::core::{GraphDefinition, HookError, State, StateHistory, Transition, TransitionRecord};
use crate::runtime::bindings::Bindings;
use crate::runtime::error::{BindError, CallbackError, HookPhase, TriggerError};
use crate::runtime::event::Event;
use crate::runtime::hooks::HookKind;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// Result of a polling [`Machine::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Moved to the named state
    Transitioned(String),

    /// Every outgoing guard rejected; state unchanged
    Blocked,

    /// Current state is final; nothing was evaluated
    Finished,
}

/// One running instance of a state graph.
///
/// The graph and bindings are shared with every other instance of the same
/// type. The current state, the host context and the history belong to this
/// instance alone. `trigger` takes `&mut self`; hosts that drive one machine
/// from several threads must wrap it in their own lock.
pub struct Machine<C> {
    graph: Arc<GraphDefinition<C>>,
    bindings: Arc<Bindings<C>>,
    guards: Vec<Option<Guard<C>>>,
    context: C,
    current: usize,
    history: Option<StateHistory>,
}

/// Builder for constructing machines.
pub struct MachineBuilder<C> {
    graph: Arc<GraphDefinition<C>>,
    bindings: Arc<Bindings<C>>,
    config: MachineConfig,
}

impl<C> MachineBuilder<C> {
    /// Attach named guards and hooks. Without this, the machine has no hooks
    /// and any transition referencing a guard by name fails to bind.
    pub fn bindings(mut self, bindings: impl Into<Arc<Bindings<C>>>) -> Self {
        self.bindings = bindings.into();
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve guards and hook targets, then place the machine in the
    /// graph's initial state.
    pub fn build(self, context: C) -> Result<Machine<C>, BindError> {
        let guards = resolve_guards(&self.graph, &self.bindings)?;
        check_hook_targets(&self.graph, &self.bindings)?;

        let history = self
            .config
            .record_history
            .then(|| match self.config.history_limit {
                Some(limit) => StateHistory::bounded(limit),
                None => StateHistory::new(),
            });

        let current = self.graph.initial;
        tracing::debug!(
            initial = self.graph.state_at(current).name(),
            history = history.is_some(),
            "machine constructed"
        );

        Ok(Machine {
            graph: self.graph,
            bindings: self.bindings,
            guards,
            context,
            current,
            history,
        })
    }
}

fn resolve_guards<C>(
    graph: &GraphDefinition<C>,
    bindings: &Bindings<C>,
) -> Result<Vec<Option<Guard<C>>>, BindError> {
    graph
        .transitions()
        .iter()
        .map(|transition| match transition.guard_ref() {
            None => Ok(None),
            Some(GuardRef::Inline(guard)) => Ok(Some(guard.clone())),
            Some(GuardRef::Named(name)) => bindings
                .resolve_guard(name)
                .cloned()
                .map(Some)
                .ok_or_else(|| BindError::UnresolvedGuard {
                    transition: transition.name().to_string(),
                    guard: name.clone(),
                }),
        })
        .collect()
}

fn check_hook_targets<C>(
    graph: &GraphDefinition<C>,
    bindings: &Bindings<C>,
) -> Result<(), BindError> {
    let mut unknown: Vec<(HookKind, &str)> = bindings
        .hooks()
        .targets()
        .filter(|&(kind, name)| {
            if kind.is_transition_keyed() {
                !graph.transitions().iter().any(|t| t.name() == name)
            } else {
                graph.state(name).is_none()
            }
        })
        .collect();
    unknown.sort();

    match unknown.first() {
        Some(&(kind, name)) => Err(BindError::UnknownHookTarget {
            kind,
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn callback_error<C>(
    phase: HookPhase,
    transition: &Transition<C>,
    committed: bool,
    source: HookError,
) -> CallbackError {
    tracing::debug!(
        %phase,
        transition = transition.name(),
        committed,
        error = %source,
        "callback failed"
    );
    CallbackError {
        phase,
        transition: transition.name().to_string(),
        from: transition.source().to_string(),
        to: transition.target().to_string(),
        committed,
        source,
    }
}

impl<C> Machine<C> {
    /// Create a machine with no bindings and the default configuration.
    pub fn new(graph: Arc<GraphDefinition<C>>, context: C) -> Result<Self, BindError> {
        Self::builder(graph).build(context)
    }

    pub fn builder(graph: Arc<GraphDefinition<C>>) -> MachineBuilder<C> {
        MachineBuilder {
            graph,
            bindings: Arc::new(Bindings::new()),
            config: MachineConfig::default(),
        }
    }

    pub fn current_state(&self) -> &State {
        self.graph.state_at(self.current)
    }

    pub fn is_final(&self) -> bool {
        self.current_state().is_final()
    }

    pub fn graph(&self) -> &Arc<GraphDefinition<C>> {
        &self.graph
    }

    pub fn bindings(&self) -> &Arc<Bindings<C>> {
        &self.bindings
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// `None` when history recording is disabled.
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    /// Distinct event names with at least one transition leaving the current
    /// state, in declaration order. Guards are not evaluated.
    pub fn available_events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = Vec::new();
        for &index in self.graph.outgoing_indices(self.current) {
            let event = self.graph.transition_at(index).event();
            if !events.contains(&event) {
                events.push(event);
            }
        }
        events
    }

    /// Whether `event` has any candidate from the current state. Guards are
    /// not evaluated.
    pub fn can_trigger(&self, event: &str) -> bool {
        self.graph
            .outgoing_indices(self.current)
            .iter()
            .any(|&i| self.graph.transition_at(i).event() == event)
    }

    /// Trigger `event` with no arguments.
    pub fn trigger(&mut self, event: &str) -> Result<&State, TriggerError> {
        self.trigger_with(Event::new(event))
    }

    /// Trigger an event and return the state the machine ends up in.
    ///
    /// Candidates are the transitions leaving the current state for this
    /// event, in declaration order. The first whose guard passes is taken:
    /// `before(selected)`, `on_exit(current)`, `on_transition(selected)`,
    /// `after(selected)`, commit, then `on_enter(target)`. A failure before
    /// the commit leaves the machine where it was; an `on_enter` failure
    /// leaves it in the target state.
    pub fn trigger_with(&mut self, event: impl Into<Event>) -> Result<&State, TriggerError> {
        let event = event.into();
        let graph = Arc::clone(&self.graph);
        let from = graph.state_at(self.current);

        let candidates: Vec<usize> = graph
            .outgoing_indices(self.current)
            .iter()
            .copied()
            .filter(|&i| graph.transition_at(i).event() == event.name())
            .collect();

        if candidates.is_empty() {
            tracing::trace!(state = from.name(), event = event.name(), "no transition for event");
            return Err(TriggerError::UnknownEvent {
                state: from.name().to_string(),
                event: event.name().to_string(),
            });
        }

        let Some(index) = self.select(&graph, &candidates)? else {
            tracing::trace!(
                state = from.name(),
                event = event.name(),
                candidates = candidates.len(),
                "all guards rejected"
            );
            return Err(TriggerError::NoTransition {
                state: from.name().to_string(),
                event: event.name().to_string(),
                candidates: candidates.len(),
            });
        };

        self.fire(&graph, index, &event)?;
        Ok(self.current_state())
    }

    /// Take the first eligible transition leaving the current state,
    /// whatever its event.
    ///
    /// Hooks receive an [`Event`] named after the selected transition's event.
    pub fn step(&mut self) -> Result<StepResult, TriggerError> {
        let graph = Arc::clone(&self.graph);
        let from = graph.state_at(self.current);

        if from.is_final() {
            return Ok(StepResult::Finished);
        }

        let outgoing = graph.outgoing_indices(self.current);
        if outgoing.is_empty() {
            return Err(TriggerError::DeadEnd {
                state: from.name().to_string(),
            });
        }

        let Some(index) = self.select(&graph, outgoing)? else {
            return Ok(StepResult::Blocked);
        };

        let event = Event::new(graph.transition_at(index).event());
        self.fire(&graph, index, &event)?;
        Ok(StepResult::Transitioned(self.current_state().name().to_string()))
    }

    /// First candidate whose guard passes. Stops evaluating at the first
    /// success.
    fn select(
        &self,
        graph: &GraphDefinition<C>,
        candidates: &[usize],
    ) -> Result<Option<usize>, CallbackError> {
        let from = graph.state_at(self.current);
        for &index in candidates {
            let transition = graph.transition_at(index);
            let passed = guard::evaluate(self.guards[index].as_ref(), &self.context, from)
                .map_err(|source| callback_error(HookPhase::Guard, transition, false, source))?;

            tracing::trace!(
                transition = transition.name(),
                order = transition.order(),
                passed,
                "guard evaluated"
            );
            if passed {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn fire(
        &mut self,
        graph: &GraphDefinition<C>,
        index: usize,
        event: &Event,
    ) -> Result<(), CallbackError> {
        let transition = graph.transition_at(index);
        let from = graph.state_at(transition.source_index);
        let to = graph.state_at(transition.target_index);
        let hooks = self.bindings.hooks();

        hooks
            .invoke_before(&mut self.context, transition, event)
            .map_err(|source| callback_error(HookPhase::Before, transition, false, source))?;
        hooks
            .invoke_exit(&mut self.context, from, event)
            .map_err(|source| callback_error(HookPhase::Exit, transition, false, source))?;
        hooks
            .invoke_transition(&mut self.context, transition, event)
            .map_err(|source| callback_error(HookPhase::Transition, transition, false, source))?;
        hooks
            .invoke_after(&mut self.context, transition, event)
            .map_err(|source| callback_error(HookPhase::After, transition, false, source))?;

        self.current = transition.target_index;
        self.history = self.history.as_ref().map(|history| {
            history.record(TransitionRecord {
                from: from.name().to_string(),
                to: to.name().to_string(),
                event: event.name().to_string(),
                transition: transition.name().to_string(),
                order: transition.order(),
                timestamp: Utc::now(),
            })
        });
        tracing::debug!(
            from = from.name(),
            to = to.name(),
            event = event.name(),
            transition = transition.name(),
            "transition committed"
        );

        hooks
            .invoke_enter(&mut self.context, to, event)
            .map_err(|source| callback_error(HookPhase::Enter, transition, true, source))
    }
}

impl<C> fmt::Debug for Machine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.current_state().name())
            .field("history", &self.history.as_ref().map(StateHistory::len))
            .finish_non_exhaustive()
    }
}
