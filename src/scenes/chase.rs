//! Pac-Man intermission one.
//!
//! Blinky chases Pac-Man off the left edge, turns frightened and flees back the way he came,
//! and an oversized Pac-Man chases him across the screen.

use glam::Vec2;

use crate::actor::Command::*;
use crate::config::SceneConfig;
use crate::constants::{speed, LEFT_BORDER, RIGHT_BORDER};
use crate::direction::Direction;
use crate::error::{GameResult, ScriptError};
use crate::fsm::{StateHandlers, StateMachine};
use crate::scene::{Scene, Stage};
use crate::scenes::cast::{self, lane, Anim, Role};
use crate::script::{Action, Script};
use crate::sprites::Ghost;

pub const NAME: &str = "chase";

/// The lane everybody runs along.
pub const LANE_ROW: i32 = 20;
/// Tick on which the scene ends.
pub const END_TICK: u64 = 775;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChaseState {
    Running,
}

pub type ChaseScene = Scene<ChaseState, Role, Anim>;
type ChaseStage = Stage<Role, Anim>;

pub fn script() -> Result<Script<Role, Anim>, ScriptError> {
    let y = lane(LANE_ROW);
    Script::builder()
        .at(1, [Action::Signal("music")])
        .at(
            130,
            [
                Action::actor(Role::PacMan, Place(Vec2::new(RIGHT_BORDER, y))),
                Action::actor(Role::PacMan, Head(Direction::Left, speed::PACMAN)),
                Action::actor(Role::PacMan, Select(Anim::Munching)),
                Action::actor(Role::PacMan, Show),
            ],
        )
        .at(
            160,
            [
                Action::actor(Role::Blinky, Place(Vec2::new(RIGHT_BORDER, y))),
                Action::actor(Role::Blinky, Head(Direction::Left, speed::GHOST)),
                Action::actor(Role::Blinky, Select(Anim::Normal)),
                Action::actor(Role::Blinky, Show),
            ],
        )
        .at(
            390,
            [
                Action::actor(Role::Blinky, Head(Direction::Right, speed::GHOST_FRIGHTENED)),
                Action::actor(Role::Blinky, Select(Anim::Frightened)),
                Action::actor(Role::PacMan, Hide),
                Action::actor(Role::PacMan, Halt),
            ],
        )
        .at(
            530,
            [
                Action::actor(Role::PacMan, Place(Vec2::new(LEFT_BORDER - 16.0, lane(LANE_ROW - 1)))),
                Action::actor(Role::PacMan, Select(Anim::BigPacman)),
                Action::actor(Role::PacMan, Head(Direction::Right, speed::BIG_PACMAN)),
                Action::actor(Role::PacMan, Show),
            ],
        )
        .at(END_TICK, [Action::Terminate])
        .build()
}

fn running(fsm: &mut StateMachine<ChaseState, ChaseStage>, stage: &mut ChaseStage) {
    stage.step(fsm.timer().elapsed_ticks());
}

pub fn build(config: SceneConfig) -> GameResult<ChaseScene> {
    let stage = Stage::new(NAME, config, script()?, ())
        .with_actor(Role::PacMan, cast::pacman()?)
        .with_actor(Role::Blinky, cast::ghost(Ghost::Blinky)?);

    let fsm = StateMachine::builder(NAME)
        .state(ChaseState::Running, StateHandlers::new().on_update(running))
        .build(ChaseState::Running)?;

    Ok(Scene::new(fsm, stage, ChaseState::Running))
}
