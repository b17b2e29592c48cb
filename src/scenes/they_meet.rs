//! Ms. Pac-Man act one.
//!
//! After the clapperboard, Pac-Man and Ms. Pac-Man are chased along separate lanes, then meet
//! in the middle lane. They dodge upwards, the pursuing ghosts collide, bounce off each other
//! and drop back to the floor, and a heart appears over the couple.

use glam::Vec2;

use crate::actor::Command::*;
use crate::config::SceneConfig;
use crate::constants::{speed, LEFT_BORDER, RIGHT_BORDER, TILE_SIZE};
use crate::direction::Direction;
use crate::error::{GameResult, ScriptError};
use crate::fsm::{StateHandlers, StateMachine};
use crate::scene::{Scene, Stage};
use crate::scenes::cast::{self, lane, Anim, Role};
use crate::script::{Action, Script};
use crate::sprites::Ghost;

pub const NAME: &str = "they_meet";

pub const UPPER_ROW: i32 = 12;
pub const LOWER_ROW: i32 = 24;
pub const MIDDLE_ROW: i32 = 18;

/// Ticks the chase may last before the couple is brought together regardless.
pub const CHASE_TICKS: u64 = 600;
/// Ghosts closer than this along the middle lane have collided, in pixels.
pub const COLLISION_DISTANCE: f32 = 16.0;

const FOLLOW_GAP: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TheyMeetState {
    Flapping,
    Chasing,
    Together,
}

/// Bookkeeping for the script-local bounce rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TheyMeetData {
    pub bounced: bool,
    pub landed: u8,
}

pub type TheyMeetScene = Scene<TheyMeetState, Role, Anim, TheyMeetData>;
type TheyMeetStage = Stage<Role, Anim, TheyMeetData>;
type Machine = StateMachine<TheyMeetState, TheyMeetStage>;

/// Cues of the `Chasing` state, keyed on that state's timer.
pub fn script() -> Result<Script<Role, Anim>, ScriptError> {
    let (upper, middle, lower) = (lane(UPPER_ROW), lane(MIDDLE_ROW), lane(LOWER_ROW));

    Script::builder()
        .at(
            1,
            [
                Action::actor(Role::PacMan, Place(Vec2::new(LEFT_BORDER, upper))),
                Action::actor(Role::PacMan, Head(Direction::Right, speed::COUPLE)),
                Action::actor(Role::PacMan, Select(Anim::Munching)),
                Action::actor(Role::PacMan, Show),
                Action::actor(Role::MsPacMan, Place(Vec2::new(RIGHT_BORDER, lower))),
                Action::actor(Role::MsPacMan, Head(Direction::Left, speed::COUPLE)),
                Action::actor(Role::MsPacMan, Select(Anim::Munching)),
                Action::actor(Role::MsPacMan, Show),
                Action::Signal("music"),
            ],
        )
        .at(
            40,
            [
                Action::actor(Role::Inky, Place(Vec2::new(LEFT_BORDER, upper))),
                Action::actor(Role::Inky, Head(Direction::Right, speed::CHASING_GHOST)),
                Action::actor(Role::Inky, Select(Anim::Normal)),
                Action::actor(Role::Inky, Show),
                Action::actor(Role::Pinky, Place(Vec2::new(RIGHT_BORDER, lower))),
                Action::actor(Role::Pinky, Head(Direction::Left, speed::CHASING_GHOST)),
                Action::actor(Role::Pinky, Select(Anim::Normal)),
                Action::actor(Role::Pinky, Show),
            ],
        )
        .at(
            300,
            [
                Action::actor(Role::PacMan, Place(Vec2::new(RIGHT_BORDER, middle))),
                Action::actor(Role::PacMan, Head(Direction::Left, speed::COUPLE)),
                Action::actor(Role::MsPacMan, Place(Vec2::new(LEFT_BORDER, middle))),
                Action::actor(Role::MsPacMan, Head(Direction::Right, speed::COUPLE)),
                Action::actor(Role::Inky, Place(Vec2::new(RIGHT_BORDER + FOLLOW_GAP, middle))),
                Action::actor(Role::Inky, Head(Direction::Left, speed::CHASING_GHOST)),
                Action::actor(Role::Pinky, Place(Vec2::new(LEFT_BORDER - FOLLOW_GAP, middle))),
                Action::actor(Role::Pinky, Head(Direction::Right, speed::CHASING_GHOST)),
            ],
        )
        .at(
            416,
            [
                Action::actor(Role::PacMan, Head(Direction::Up, speed::COUPLE)),
                Action::actor(Role::MsPacMan, Head(Direction::Up, speed::COUPLE)),
            ],
        )
        .at(
            440,
            [
                Action::actor(Role::PacMan, Halt),
                Action::actor(Role::PacMan, Face(Direction::Left)),
                Action::actor(Role::MsPacMan, Halt),
                Action::actor(Role::MsPacMan, Face(Direction::Right)),
            ],
        )
        .build()
}

fn enter_flapping(fsm: &mut Machine, stage: &mut TheyMeetStage) {
    stage.apply_all(
        Role::Clapperboard,
        [
            PlaceAtTile {
                x: 3,
                y: 10,
                offset: Vec2::ZERO,
            },
            Select(Anim::Clapperboard),
            Show,
        ],
    );
    fsm.timer_mut().restart_seconds(2.0);
}

fn update_flapping(fsm: &mut Machine, stage: &mut TheyMeetStage) {
    if fsm.timer().has_expired() {
        stage.apply(Role::Clapperboard, Hide);
        fsm.change_state(TheyMeetState::Chasing, stage);
    }
}

fn enter_chasing(fsm: &mut Machine, stage: &mut TheyMeetStage) {
    stage.data = TheyMeetData::default();
    fsm.timer_mut().restart_ticks(CHASE_TICKS);
}

fn update_chasing(fsm: &mut Machine, stage: &mut TheyMeetStage) {
    stage.step(fsm.timer().elapsed_ticks());

    if !stage.data.bounced {
        bounce_if_met(stage);
    } else {
        land_on_floor(stage);
    }

    if stage.data.landed == 2 || fsm.timer().has_expired() {
        fsm.change_state(TheyMeetState::Together, stage);
    }
}

/// Pushes the ghosts apart and up once they run into each other on the middle lane.
fn bounce_if_met(stage: &mut TheyMeetStage) {
    let middle = lane(MIDDLE_ROW);
    let (Some(inky), Some(pinky)) = (stage.actor(Role::Inky), stage.actor(Role::Pinky)) else {
        return;
    };
    if inky.position.y != middle || pinky.position.y != middle {
        return;
    }
    if (inky.position.x - pinky.position.x).abs() > COLLISION_DISTANCE {
        return;
    }

    let push = if inky.position.x < pinky.position.x { -0.5 } else { 0.5 };
    stage.apply_all(
        Role::Inky,
        [Velocity(Vec2::new(push, speed::BOUNCE)), Acceleration(Vec2::new(0.0, speed::GRAVITY))],
    );
    stage.apply_all(
        Role::Pinky,
        [Velocity(Vec2::new(-push, speed::BOUNCE)), Acceleration(Vec2::new(0.0, speed::GRAVITY))],
    );
    stage.data.bounced = true;
    stage.signal("bump");
}

fn land_on_floor(stage: &mut TheyMeetStage) {
    let floor = lane(MIDDLE_ROW);
    for role in [Role::Inky, Role::Pinky] {
        let Some(ghost) = stage.actor(role) else {
            continue;
        };
        if !ghost.moving || ghost.velocity.y <= 0.0 || ghost.position.y < floor {
            continue;
        }
        let x = ghost.position.x;
        stage.apply_all(role, [Place(Vec2::new(x, floor)), Halt]);
        stage.data.landed += 1;
    }
}

fn enter_together(fsm: &mut Machine, stage: &mut TheyMeetStage) {
    let couple = [Role::PacMan, Role::MsPacMan].map(|role| stage.actor(role).map(|actor| actor.position));
    if let [Some(pacman), Some(ms_pacman)] = couple {
        let above = (pacman + ms_pacman) / 2.0 - Vec2::new(0.0, 2.0 * TILE_SIZE as f32);
        stage.apply_all(Role::Heart, [Place(above), Select(Anim::Still), Show]);
    }
    fsm.timer_mut().restart_seconds(3.0);
}

fn update_together(fsm: &mut Machine, stage: &mut TheyMeetStage) {
    if fsm.timer().has_expired() {
        stage.terminate();
    }
}

pub fn build(config: SceneConfig) -> GameResult<TheyMeetScene> {
    let stage = Stage::new(NAME, config, script()?, TheyMeetData::default())
        .with_actor(Role::Clapperboard, cast::clapperboard()?)
        .with_actor(Role::Heart, cast::heart()?)
        .with_actor(Role::PacMan, cast::pacman()?)
        .with_actor(Role::MsPacMan, cast::ms_pacman()?)
        .with_actor(Role::Inky, cast::ghost(Ghost::Inky)?)
        .with_actor(Role::Pinky, cast::ghost(Ghost::Pinky)?);

    let fsm = StateMachine::builder(NAME)
        .state(
            TheyMeetState::Flapping,
            StateHandlers::new().on_enter(enter_flapping).on_update(update_flapping),
        )
        .state(
            TheyMeetState::Chasing,
            StateHandlers::new().on_enter(enter_chasing).on_update(update_chasing),
        )
        .state(
            TheyMeetState::Together,
            StateHandlers::new().on_enter(enter_together).on_update(update_together),
        )
        .build(TheyMeetState::Flapping)?;

    Ok(Scene::new(fsm, stage, TheyMeetState::Flapping))
}
