//! Scenes: a state machine, its stage (actors plus script) and the lifecycle events they raise.
//!
//! Within one [`Scene::update`] the order is fixed: the active state's timer ticks, the state's
//! logic runs (cue dispatch, motion, script-local rules), and only then are actor animations
//! advanced. The renderer reads afterwards.

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::event::Event;
use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use crate::actor::{Actor, Command, RenderQuery};
use crate::animation::AnimationId;
use crate::config::SceneConfig;
use crate::fsm::{StateId, StateMachine};
use crate::input::InputSnapshot;
use crate::script::{Action, Script};

/// Keys naming the members of a scene's cast.
pub trait CastKey: Copy + Ord + fmt::Debug + Send + Sync + 'static {}

impl<T> CastKey for T where T: Copy + Ord + fmt::Debug + Send + Sync + 'static {}

/// Lifecycle notifications consumed by the game controller.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// The scene's state machine entered `state` (including the initial state).
    StateChanged { scene: &'static str, state: String },
    /// A script raised a named marker.
    Signal { scene: &'static str, name: &'static str },
    /// The scene is over. Raised exactly once per run.
    Terminated { scene: &'static str },
}

/// Everything a scene's states act on: the cast, the script, and scene-specific data `D`.
///
/// The stage owns its actors exclusively; nothing else mutates them while the scene runs.
pub struct Stage<K: CastKey, A: AnimationId, D = ()> {
    pub name: &'static str,
    pub config: SceneConfig,
    /// The buttons for the current tick.
    pub input: InputSnapshot,
    /// Scene-specific bookkeeping.
    pub data: D,
    cast: BTreeMap<K, Actor<A>>,
    script: Script<K, A>,
    clock: u64,
    /// Scene tick of the last dispatch.
    dispatched_at: Option<u64>,
    events: Vec<SceneEvent>,
    terminated: bool,
    /// Cast and data as they were when the scene first started, restored on every restart.
    opening: Option<(BTreeMap<K, Actor<A>>, D)>,
}

impl<K: CastKey, A: AnimationId, D> Stage<K, A, D> {
    pub fn new(name: &'static str, config: SceneConfig, script: Script<K, A>, data: D) -> Self {
        Self {
            name,
            config,
            input: InputSnapshot::default(),
            data,
            cast: BTreeMap::new(),
            script,
            clock: 0,
            dispatched_at: None,
            events: Vec::new(),
            terminated: false,
            opening: None,
        }
    }

    pub fn with_actor(mut self, key: K, actor: Actor<A>) -> Self {
        self.cast.insert(key, actor);
        self
    }

    pub fn actor(&self, key: K) -> Option<&Actor<A>> {
        self.cast.get(&key)
    }

    pub fn actor_mut(&mut self, key: K) -> Option<&mut Actor<A>> {
        self.cast.get_mut(&key)
    }

    pub fn actors(&self) -> impl Iterator<Item = (&K, &Actor<A>)> {
        self.cast.iter()
    }

    /// Applies a command to a cast member. Unknown keys are logged and ignored.
    pub fn apply(&mut self, key: K, command: Command<A>) {
        match self.cast.get_mut(&key) {
            Some(actor) => actor.apply(command),
            None => warn!(scene = self.name, key = ?key, command = ?command, "Command for an actor not in the cast"),
        }
    }

    /// Applies several commands to one cast member, in order.
    pub fn apply_all(&mut self, key: K, commands: impl IntoIterator<Item = Command<A>>) {
        for command in commands {
            self.apply(key, command);
        }
    }

    pub fn perform(&mut self, action: Action<K, A>) {
        match action {
            Action::Actor(key, command) => self.apply(key, command),
            Action::Signal(name) => self.signal(name),
            Action::Terminate => self.terminate(),
        }
    }

    /// Runs the cue scheduled for script tick `tick`.
    ///
    /// Only the first dispatch of each scene tick counts, so evaluating the script twice in
    /// one update cannot repeat a cue.
    pub fn dispatch(&mut self, tick: u64) {
        if self.dispatched_at == Some(self.clock) {
            return;
        }
        self.dispatched_at = Some(self.clock);

        let Some(cue) = self.script.cue_at(tick) else {
            return;
        };
        let actions: SmallVec<[Action<K, A>; 4]> = cue.actions.clone();
        trace!(scene = self.name, tick, actions = actions.len(), "Dispatching cue");
        for action in actions {
            self.perform(action);
        }
    }

    /// Moves every moving actor by one tick of velocity.
    pub fn integrate(&mut self) {
        for actor in self.cast.values_mut() {
            actor.integrate();
        }
    }

    /// The usual body of a scripted state: dispatch the cue for `tick`, then integrate motion.
    pub fn step(&mut self, tick: u64) {
        self.dispatch(tick);
        self.integrate();
    }

    pub fn advance_animations(&mut self) {
        for actor in self.cast.values_mut() {
            actor.update_animation();
        }
    }

    pub fn signal(&mut self, name: &'static str) {
        debug!(scene = self.name, signal = name, tick = self.clock, "Scene signal");
        self.events.push(SceneEvent::Signal { scene: self.name, name });
    }

    /// Ends the scene. Calling it again has no further effect.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        info!(scene = self.name, tick = self.clock, "Scene terminated");
        self.events.push(SceneEvent::Terminated { scene: self.name });
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Ticks since the scene started.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn script(&self) -> &Script<K, A> {
        &self.script
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render queries for the cast, in key order. Hidden actors are only included with the debug overlay.
    pub fn render(&self) -> Vec<RenderQuery> {
        self.cast
            .values()
            .map(Actor::render_query)
            .filter(|query| query.visible || self.config.debug_overlay)
            .collect()
    }
}

impl<K: CastKey, A: AnimationId, D: Clone> Stage<K, A, D> {
    /// Puts the stage back as it was at the first start. The first call records that state.
    fn rewind(&mut self) {
        match &self.opening {
            Some((cast, data)) => {
                self.cast = cast.clone();
                self.data = data.clone();
            }
            None => self.opening = Some((self.cast.clone(), self.data.clone())),
        }
        self.clock = 0;
        self.dispatched_at = None;
        self.terminated = false;
        self.events.clear();
        self.input = InputSnapshot::default();
    }
}

/// A playable scene: one state machine driving one stage.
pub struct Scene<S: StateId, K: CastKey, A: AnimationId, D = ()> {
    fsm: StateMachine<S, Stage<K, A, D>>,
    stage: Stage<K, A, D>,
    initial: S,
    started: bool,
}

impl<S: StateId, K: CastKey, A: AnimationId, D: Clone> Scene<S, K, A, D> {
    pub fn new(fsm: StateMachine<S, Stage<K, A, D>>, stage: Stage<K, A, D>, initial: S) -> Self {
        Self {
            fsm,
            stage,
            initial,
            started: false,
        }
    }

    /// Starts the scene from its initial state. Restarting replays it exactly as a fresh run.
    pub fn start(&mut self) {
        info!(scene = self.stage.name, state = ?self.initial, "Starting scene");
        self.stage.rewind();
        self.fsm.restart(self.initial, &mut self.stage);
        self.started = true;
        self.collect_state_changes();
    }

    /// Advances the scene by exactly one tick. Does nothing once the scene has terminated.
    pub fn update(&mut self, input: InputSnapshot) {
        if !self.started {
            self.start();
        }
        if self.stage.terminated {
            return;
        }

        self.stage.input = input;
        self.stage.clock += 1;
        self.fsm.update(&mut self.stage);
        self.stage.advance_animations();
        self.collect_state_changes();
    }

    /// Forces a transition from outside the scene's own logic, e.g. on a controller request.
    pub fn change_state(&mut self, next: S) {
        self.fsm.change_state(next, &mut self.stage);
        self.collect_state_changes();
    }

    pub fn state(&self) -> S {
        self.fsm.current()
    }

    pub fn machine(&self) -> &StateMachine<S, Stage<K, A, D>> {
        &self.fsm
    }

    pub fn stage(&self) -> &Stage<K, A, D> {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage<K, A, D> {
        &mut self.stage
    }

    pub fn is_terminated(&self) -> bool {
        self.stage.terminated
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.stage.drain_events()
    }

    fn collect_state_changes(&mut self) {
        let scene = self.stage.name;
        for state in self.fsm.drain_changes() {
            self.stage.events.push(SceneEvent::StateChanged {
                scene,
                state: format!("{state:?}"),
            });
        }
    }
}

/// The object-safe face of a scene, so the director can run unrelated scene types.
pub trait Playable: Send + Sync {
    fn name(&self) -> &'static str;
    fn start(&mut self);
    fn update(&mut self, input: InputSnapshot);
    fn is_terminated(&self) -> bool;
    fn drain_events(&mut self) -> Vec<SceneEvent>;
    fn render(&self) -> Vec<RenderQuery>;
}

impl<S, K, A, D> Playable for Scene<S, K, A, D>
where
    S: StateId,
    K: CastKey,
    A: AnimationId,
    D: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.stage.name
    }

    fn start(&mut self) {
        Scene::start(self);
    }

    fn update(&mut self, input: InputSnapshot) {
        Scene::update(self, input);
    }

    fn is_terminated(&self) -> bool {
        Scene::is_terminated(self)
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        Scene::drain_events(self)
    }

    fn render(&self) -> Vec<RenderQuery> {
        self.stage.render()
    }
}
