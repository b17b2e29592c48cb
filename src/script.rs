//! Choreography scripts: fixed tables of tick-triggered actions.
//!
//! A script is validated once when it is built. At runtime it is only ever looked up by exact
//! tick, so dispatch stays a binary search no matter how long the scene runs.

use smallvec::SmallVec;

use crate::actor::Command;
use crate::error::ScriptError;

/// One effect of a cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action<K, A> {
    /// Applies a command to the actor cast under `K`.
    Actor(K, Command<A>),
    /// Raises a named scene-local marker, reported to the game controller.
    Signal(&'static str),
    /// Ends the scene.
    Terminate,
}

impl<K, A> Action<K, A> {
    pub fn actor(key: K, command: Command<A>) -> Self {
        Action::Actor(key, command)
    }
}

/// Everything that happens on one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue<K, A> {
    pub tick: u64,
    pub actions: SmallVec<[Action<K, A>; 4]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Script<K, A> {
    cues: Vec<Cue<K, A>>,
}

impl<K, A> Default for Script<K, A> {
    fn default() -> Self {
        Self { cues: Vec::new() }
    }
}

impl<K, A> Script<K, A> {
    pub fn builder() -> ScriptBuilder<K, A> {
        ScriptBuilder { cues: Vec::new() }
    }

    /// A script with no cues, for scenes driven entirely by their states.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a script from cues in authoring order.
    ///
    /// # Errors
    ///
    /// Cue ticks start at 1 ([`ScriptError::ZeroTick`]) and must be strictly increasing: a
    /// repeated tick is a [`ScriptError::DuplicateTick`] and a decreasing one is a
    /// [`ScriptError::OutOfOrder`].
    pub fn from_cues(cues: Vec<Cue<K, A>>) -> Result<Self, ScriptError> {
        if cues.iter().any(|cue| cue.tick == 0) {
            return Err(ScriptError::ZeroTick);
        }
        for pair in cues.windows(2) {
            let (previous, tick) = (pair[0].tick, pair[1].tick);
            if tick == previous {
                return Err(ScriptError::DuplicateTick(tick));
            }
            if tick < previous {
                return Err(ScriptError::OutOfOrder { previous, tick });
            }
        }
        Ok(Self { cues })
    }

    /// The cue scheduled for exactly `tick`, if any.
    pub fn cue_at(&self, tick: u64) -> Option<&Cue<K, A>> {
        self.cues
            .binary_search_by_key(&tick, |cue| cue.tick)
            .ok()
            .map(|index| &self.cues[index])
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.cues.last().map(|cue| cue.tick)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue<K, A>> {
        self.cues.iter()
    }
}

pub struct ScriptBuilder<K, A> {
    cues: Vec<Cue<K, A>>,
}

impl<K, A> ScriptBuilder<K, A> {
    /// Schedules `actions` for `tick`.
    pub fn at(mut self, tick: u64, actions: impl IntoIterator<Item = Action<K, A>>) -> Self {
        self.cues.push(Cue {
            tick,
            actions: actions.into_iter().collect(),
        });
        self
    }

    pub fn build(self) -> Result<Script<K, A>, ScriptError> {
        Script::from_cues(self.cues)
    }
}
