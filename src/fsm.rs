//! A generic finite state machine with one tick timer per state.
//!
//! States are a closed set of plain values (normally a fieldless enum). Behaviour is attached
//! per state as a table of `fn` pointers rather than through trait objects, so the same machine
//! type drives intro screens, intermissions and menus alike.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use smallvec::SmallVec;
use tracing::{debug, error};

use crate::error::StateError;
use crate::timer::{TickTimer, TimerDuration};

/// Identifies one state of a machine.
pub trait StateId: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> StateId for T where T: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A state callback. It receives the machine itself, so it can read the state's timer
/// and request transitions, along with the scene context `C`.
pub type StateFn<S, C> = fn(&mut StateMachine<S, C>, &mut C);

/// The enter/update/exit contract of one state. Every callback is optional.
pub struct StateHandlers<S: StateId, C> {
    on_enter: Option<StateFn<S, C>>,
    on_update: Option<StateFn<S, C>>,
    on_exit: Option<StateFn<S, C>>,
}

impl<S: StateId, C> Clone for StateHandlers<S, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: StateId, C> Copy for StateHandlers<S, C> {}

impl<S: StateId, C> Default for StateHandlers<S, C> {
    fn default() -> Self {
        Self {
            on_enter: None,
            on_update: None,
            on_exit: None,
        }
    }
}

impl<S: StateId, C> StateHandlers<S, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(mut self, f: StateFn<S, C>) -> Self {
        self.on_enter = Some(f);
        self
    }

    pub fn on_update(mut self, f: StateFn<S, C>) -> Self {
        self.on_update = Some(f);
        self
    }

    pub fn on_exit(mut self, f: StateFn<S, C>) -> Self {
        self.on_exit = Some(f);
        self
    }
}

struct StateEntry<S: StateId, C> {
    handlers: StateHandlers<S, C>,
    timer: TickTimer,
}

pub struct StateMachineBuilder<S: StateId, C> {
    name: &'static str,
    states: HashMap<S, StateEntry<S, C>>,
    duplicate: Option<S>,
}

impl<S: StateId, C> StateMachineBuilder<S, C> {
    /// Declares a state. Declaring the same state twice fails the build.
    pub fn state(mut self, id: S, handlers: StateHandlers<S, C>) -> Self {
        let entry = StateEntry {
            handlers,
            timer: TickTimer::indefinite(),
        };
        if self.states.insert(id, entry).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(id);
        }
        self
    }

    /// Finishes the machine. It stays inert until [`StateMachine::restart`] enters `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::AlreadyDeclared`] if a state was declared twice and
    /// [`StateError::Undeclared`] if `initial` was never declared.
    pub fn build(self, initial: S) -> Result<StateMachine<S, C>, StateError> {
        if let Some(state) = self.duplicate {
            return Err(StateError::AlreadyDeclared {
                machine: self.name.to_string(),
                state: format!("{state:?}"),
            });
        }
        if !self.states.contains_key(&initial) {
            return Err(undeclared(self.name, initial));
        }

        Ok(StateMachine {
            name: self.name,
            states: self.states,
            current: initial,
            previous: None,
            changes: SmallVec::new(),
        })
    }
}

fn undeclared<S: StateId>(machine: &str, state: S) -> StateError {
    StateError::Undeclared {
        machine: machine.to_string(),
        state: format!("{state:?}"),
    }
}

/// Exactly one state is active at a time. A transition runs `on_exit` of the old state, rewinds
/// the new state's timer and then runs its `on_enter`, all before the call returns.
pub struct StateMachine<S: StateId, C> {
    name: &'static str,
    states: HashMap<S, StateEntry<S, C>>,
    current: S,
    previous: Option<S>,
    changes: SmallVec<[S; 2]>,
}

impl<S: StateId, C> fmt::Debug for StateMachine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("timer", &self.timer())
            .finish()
    }
}

impl<S: StateId, C> StateMachine<S, C> {
    pub fn builder(name: &'static str) -> StateMachineBuilder<S, C> {
        StateMachineBuilder {
            name,
            states: HashMap::new(),
            duplicate: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    pub fn is_declared(&self, state: S) -> bool {
        self.states.contains_key(&state)
    }

    /// The timer of the active state.
    pub fn timer(&self) -> &TickTimer {
        &self.entry(self.current).timer
    }

    pub fn timer_mut(&mut self) -> &mut TickTimer {
        let current = self.current;
        &mut self.entry_mut(current).timer
    }

    pub fn timer_of(&self, state: S) -> Option<&TickTimer> {
        self.states.get(&state).map(|entry| &entry.timer)
    }

    /// Takes the states entered since the last call, in order.
    pub fn drain_changes(&mut self) -> SmallVec<[S; 2]> {
        std::mem::take(&mut self.changes)
    }

    /// Re-initializes the machine: rewinds every timer and enters `initial` without exiting the old state.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not declared. Use [`StateMachine::try_restart`] to check instead.
    pub fn restart(&mut self, initial: S, context: &mut C) {
        if let Err(error) = self.try_restart(initial, context) {
            error!(machine = self.name, %error, "Illegal restart");
            panic!("{error}");
        }
    }

    pub fn try_restart(&mut self, initial: S, context: &mut C) -> Result<(), StateError> {
        if !self.is_declared(initial) {
            return Err(undeclared(self.name, initial));
        }

        for entry in self.states.values_mut() {
            entry.timer.reset(TimerDuration::Indefinite);
        }
        self.previous = None;
        self.changes.clear();

        debug!(machine = self.name, state = ?initial, "Restarting state machine");
        self.enter(initial, context);
        Ok(())
    }

    /// Advances the active state's timer by one tick, then runs its `on_update`.
    pub fn update(&mut self, context: &mut C) {
        let current = self.current;
        let entry = self.entry_mut(current);
        entry.timer.tick();

        let on_update = entry.handlers.on_update;
        if let Some(on_update) = on_update {
            on_update(self, context);
        }
    }

    /// Transitions to `next`. Self-transitions are allowed and still run exit and enter.
    ///
    /// # Panics
    ///
    /// Panics if `next` is not declared; the state set is closed at construction, so this is a
    /// programming error. Use [`StateMachine::try_change_state`] to check instead.
    pub fn change_state(&mut self, next: S, context: &mut C) {
        if let Err(error) = self.try_change_state(next, context) {
            error!(machine = self.name, %error, "Illegal state transition");
            panic!("{error}");
        }
    }

    pub fn try_change_state(&mut self, next: S, context: &mut C) -> Result<(), StateError> {
        if !self.is_declared(next) {
            return Err(undeclared(self.name, next));
        }

        let old = self.current;
        let on_exit = self.entry(old).handlers.on_exit;
        if let Some(on_exit) = on_exit {
            on_exit(self, context);
        }

        debug!(machine = self.name, from = ?old, to = ?next, "State change");
        self.previous = Some(old);
        self.enter(next, context);
        Ok(())
    }

    fn enter(&mut self, state: S, context: &mut C) {
        self.current = state;
        self.changes.push(state);

        let entry = self.entry_mut(state);
        entry.timer.restart_indefinitely();

        let on_enter = entry.handlers.on_enter;
        if let Some(on_enter) = on_enter {
            on_enter(self, context);
        }
    }

    // Both lookups are infallible: `current` and every entered state are checked against `states` first.
    fn entry(&self, state: S) -> &StateEntry<S, C> {
        match self.states.get(&state) {
            Some(entry) => entry,
            None => unreachable!("state {state:?} of machine '{}' was checked on entry", self.name),
        }
    }

    fn entry_mut(&mut self, state: S) -> &mut StateEntry<S, C> {
        let name = self.name;
        match self.states.get_mut(&state) {
            Some(entry) => entry,
            None => unreachable!("state {state:?} of machine '{name}' was checked on entry"),
        }
    }
}
