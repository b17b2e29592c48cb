#![allow(dead_code)]

use choreo::{
    actor::Actor,
    animation::{AnimationSequence, AnimationSet},
    config::SceneConfig,
    fsm::{StateHandlers, StateMachine},
    scene::{Scene, Stage},
    script::Script,
    sprites::SpriteRegion,
};

/// A distinct 16x16 region per index, laid out along the top row of the sheet.
pub fn frame(index: u16) -> SpriteRegion {
    SpriteRegion::cell(index, 0, 16)
}

pub fn frames(count: u16) -> Vec<SpriteRegion> {
    (0..count).map(frame).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestAnim {
    Walk,
    Jump,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestKey {
    Hero,
    Sidekick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestState {
    Idle,
    Running,
    Done,
}

/// Walk loops over 3 frames, Jump plays 2 frames once, Idle is a still frame.
pub fn animation_set() -> AnimationSet<TestAnim> {
    AnimationSet::new()
        .with(TestAnim::Walk, AnimationSequence::looping(frames(3), 2).unwrap())
        .unwrap()
        .with(TestAnim::Jump, AnimationSequence::once(vec![frame(5), frame(6)], 3).unwrap())
        .unwrap()
        .with(TestAnim::Idle, AnimationSequence::still(frame(9)))
        .unwrap()
}

pub fn actor(name: &'static str) -> Actor<TestAnim> {
    Actor::new(name, animation_set())
}

pub type TestStage = Stage<TestKey, TestAnim>;
pub type TestScene = Scene<TestState, TestKey, TestAnim>;

fn run_script(fsm: &mut StateMachine<TestState, TestStage>, stage: &mut TestStage) {
    stage.step(fsm.timer().elapsed_ticks());
}

/// A single-state scene stepping `script` on its state timer, with a hidden hero in the cast.
pub fn scripted_scene(script: Script<TestKey, TestAnim>) -> TestScene {
    let stage = Stage::new("test", SceneConfig::default(), script, ()).with_actor(TestKey::Hero, actor("hero"));
    let fsm = StateMachine::builder("test")
        .state(TestState::Running, StateHandlers::new().on_update(run_script))
        .build(TestState::Running)
        .unwrap();
    Scene::new(fsm, stage, TestState::Running)
}

/// Records every handler call of a machine, in order.
#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: Vec<String>,
    /// The active state's elapsed ticks observed by each `on_enter`.
    pub enter_elapsed: Vec<u64>,
}

pub type LogMachine = StateMachine<TestState, CallLog>;

fn log_enter(fsm: &mut LogMachine, log: &mut CallLog) {
    log.calls.push(format!("enter {:?}", fsm.current()));
    log.enter_elapsed.push(fsm.timer().elapsed_ticks());
}

fn log_update(fsm: &mut LogMachine, log: &mut CallLog) {
    log.calls.push(format!("update {:?}", fsm.current()));
}

fn log_exit(fsm: &mut LogMachine, log: &mut CallLog) {
    log.calls.push(format!("exit {:?}", fsm.current()));
}

pub fn logging_handlers() -> StateHandlers<TestState, CallLog> {
    StateHandlers::new().on_enter(log_enter).on_update(log_update).on_exit(log_exit)
}

/// Declares `Idle` and `Running` (not `Done`), both logging every call.
pub fn logging_machine() -> LogMachine {
    StateMachine::builder("log")
        .state(TestState::Idle, logging_handlers())
        .state(TestState::Running, logging_handlers())
        .build(TestState::Idle)
        .unwrap()
}
