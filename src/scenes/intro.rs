//! The attract-mode intro: the ghost gallery, the points legend, and Pac-Man turning the
//! tables on the ghosts after eating an energizer.
//!
//! Pressing START in any state cuts the intro short.

use glam::Vec2;

use crate::actor::Command::*;
use crate::config::SceneConfig;
use crate::constants::{speed, RIGHT_BORDER, TILE_SIZE};
use crate::direction::Direction;
use crate::error::GameResult;
use crate::fsm::{StateHandlers, StateMachine};
use crate::input::Buttons;
use crate::scene::{Scene, Stage};
use crate::scenes::cast::{self, lane, Anim, Role};
use crate::script::Script;
use crate::timer::sec_to_ticks;

pub const NAME: &str = "intro";

/// The row Pac-Man and the ghosts run along.
pub const CHASE_ROW: i32 = 20;
/// Column of the energizer Pac-Man runs for.
pub const ENERGIZER_COLUMN: i32 = 3;
/// Pac-Man eats a ghost that is at most this far ahead of him, in pixels.
pub const EAT_DISTANCE: f32 = 4.0;

/// Seconds each ghost's points value stays on screen.
const POINTS_SECONDS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroState {
    Starting,
    PresentingGhosts,
    ShowingPoints,
    ChasingPac,
    ChasingGhosts,
    ReadyToPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntroData {
    /// Ghosts introduced in the gallery so far.
    pub presented: usize,
    /// `ChasingGhosts` tick on which each ghost was eaten.
    pub eaten_at: [Option<u64>; 4],
}

impl IntroData {
    pub fn eaten(&self) -> usize {
        self.eaten_at.iter().flatten().count()
    }
}

pub type IntroScene = Scene<IntroState, Role, Anim, IntroData>;
type IntroStage = Stage<Role, Anim, IntroData>;
type Machine = StateMachine<IntroState, IntroStage>;

/// Ends the intro when START was pressed this tick.
fn skipped(stage: &mut IntroStage) -> bool {
    if !stage.input.just_pressed(Buttons::START) {
        return false;
    }
    stage.signal("start_game");
    stage.terminate();
    true
}

fn enter_starting(fsm: &mut Machine, _stage: &mut IntroStage) {
    fsm.timer_mut().restart_seconds(1.0);
}

fn update_starting(fsm: &mut Machine, stage: &mut IntroStage) {
    if skipped(stage) {
        return;
    }
    if fsm.timer().has_expired() {
        fsm.change_state(IntroState::PresentingGhosts, stage);
    }
}

fn enter_presenting(_fsm: &mut Machine, stage: &mut IntroStage) {
    stage.data.presented = 0;
}

/// One two-second cycle per ghost, restarted until all four have been shown.
fn update_presenting(fsm: &mut Machine, stage: &mut IntroStage) {
    if skipped(stage) {
        return;
    }

    let index = stage.data.presented;
    let role = Role::GHOSTS[index];
    let timer = fsm.timer();

    if timer.at_second(0.5) {
        stage.apply_all(
            role,
            [
                PlaceAtTile {
                    x: 4,
                    y: 7 + 3 * index as i32,
                    offset: Vec2::ZERO,
                },
                Face(Direction::Right),
                Select(Anim::Normal),
                Show,
            ],
        );
    } else if timer.at_second(1.0) {
        stage.signal("character");
    } else if timer.at_second(1.5) {
        stage.signal("nickname");
    } else if timer.at_second(2.0) {
        stage.data.presented += 1;
        if stage.data.presented == Role::GHOSTS.len() {
            fsm.change_state(IntroState::ShowingPoints, stage);
        } else {
            fsm.timer_mut().restart_indefinitely();
        }
    }
}

fn enter_showing_points(fsm: &mut Machine, stage: &mut IntroStage) {
    stage.apply_all(
        Role::Energizer,
        [
            PlaceAtTile {
                x: ENERGIZER_COLUMN,
                y: CHASE_ROW,
                offset: Vec2::ZERO,
            },
            Select(Anim::Blinking),
            Show,
        ],
    );
    fsm.timer_mut().restart_seconds(1.0);
}

fn update_showing_points(fsm: &mut Machine, stage: &mut IntroStage) {
    if skipped(stage) {
        return;
    }
    if fsm.timer().has_expired() {
        fsm.change_state(IntroState::ChasingPac, stage);
    }
}

fn exit_showing_points(_fsm: &mut Machine, stage: &mut IntroStage) {
    for role in Role::GHOSTS {
        stage.apply(role, Hide);
    }
}

fn enter_chasing_pac(_fsm: &mut Machine, stage: &mut IntroStage) {
    let y = lane(CHASE_ROW);
    stage.apply_all(
        Role::PacMan,
        [
            Place(Vec2::new(RIGHT_BORDER, y)),
            Head(Direction::Left, speed::PACMAN),
            Select(Anim::Munching),
            Show,
        ],
    );
    for (index, role) in Role::GHOSTS.into_iter().enumerate() {
        let x = RIGHT_BORDER + (2 * TILE_SIZE) as f32 * (index + 1) as f32;
        stage.apply_all(
            role,
            [Place(Vec2::new(x, y)), Head(Direction::Left, speed::GHOST), Select(Anim::Normal), Show],
        );
    }
}

/// Runs until Pac-Man reaches the energizer; the timer has no fixed length and is expired then.
fn update_chasing_pac(fsm: &mut Machine, stage: &mut IntroStage) {
    if skipped(stage) {
        return;
    }
    stage.integrate();

    let (Some(pacman), Some(energizer)) = (stage.actor(Role::PacMan), stage.actor(Role::Energizer)) else {
        return;
    };
    if energizer.visible && pacman.position.x <= energizer.position.x {
        stage.apply(Role::Energizer, Hide);
        stage.signal("energizer");
        fsm.timer_mut().expire();
    }

    if fsm.timer().has_expired() {
        fsm.change_state(IntroState::ChasingGhosts, stage);
    }
}

fn enter_chasing_ghosts(_fsm: &mut Machine, stage: &mut IntroStage) {
    stage.data.eaten_at = [None; 4];
    stage.apply(Role::PacMan, Head(Direction::Right, speed::PACMAN));
    for role in Role::GHOSTS {
        stage.apply_all(role, [Head(Direction::Right, speed::GHOST_FRIGHTENED), Select(Anim::Frightened)]);
    }
}

fn update_chasing_ghosts(fsm: &mut Machine, stage: &mut IntroStage) {
    if skipped(stage) {
        return;
    }
    stage.integrate();

    let elapsed = fsm.timer().elapsed_ticks();
    let flashing = fsm.timer().between_seconds(1.5, 2.5);
    let Some(pacman_x) = stage.actor(Role::PacMan).map(|pacman| pacman.position.x) else {
        return;
    };

    for (index, role) in Role::GHOSTS.into_iter().enumerate() {
        match stage.data.eaten_at[index] {
            Some(at) => {
                if elapsed - at == sec_to_ticks(POINTS_SECONDS) {
                    stage.apply(role, Hide);
                }
            }
            None => {
                let Some(ghost) = stage.actor(role) else {
                    continue;
                };
                if ghost.position.x - pacman_x <= EAT_DISTANCE {
                    let value = stage.data.eaten();
                    stage.apply_all(role, [Halt, SelectAt(Anim::Points, value), StopAnimation]);
                    stage.data.eaten_at[index] = Some(elapsed);
                    stage.signal("ghost_eaten");
                } else if flashing {
                    // Re-selected every tick; the flashing cycle keeps its place.
                    stage.apply(role, Select(Anim::Flashing));
                }
            }
        }
    }

    let last_eaten = stage.data.eaten_at.iter().flatten().max().copied();
    if let (4, Some(last)) = (stage.data.eaten(), last_eaten) {
        if elapsed - last >= sec_to_ticks(POINTS_SECONDS) {
            fsm.change_state(IntroState::ReadyToPlay, stage);
        }
    }
}

fn enter_ready(fsm: &mut Machine, stage: &mut IntroStage) {
    stage.apply_all(Role::PacMan, [Halt, Hide]);
    stage.signal("ready");
    fsm.timer_mut().restart_seconds(3.0);
}

fn update_ready(fsm: &mut Machine, stage: &mut IntroStage) {
    if skipped(stage) {
        return;
    }
    if fsm.timer().has_expired() {
        stage.terminate();
    }
}

pub fn build(config: SceneConfig) -> GameResult<IntroScene> {
    let mut stage = Stage::new(NAME, config, Script::empty(), IntroData::default())
        .with_actor(Role::PacMan, cast::pacman()?)
        .with_actor(Role::Energizer, cast::energizer()?);
    for role in Role::GHOSTS {
        if let Some(ghost) = role.ghost() {
            stage = stage.with_actor(role, cast::ghost(ghost)?);
        }
    }

    let fsm = StateMachine::builder(NAME)
        .state(
            IntroState::Starting,
            StateHandlers::new().on_enter(enter_starting).on_update(update_starting),
        )
        .state(
            IntroState::PresentingGhosts,
            StateHandlers::new().on_enter(enter_presenting).on_update(update_presenting),
        )
        .state(
            IntroState::ShowingPoints,
            StateHandlers::new()
                .on_enter(enter_showing_points)
                .on_update(update_showing_points)
                .on_exit(exit_showing_points),
        )
        .state(
            IntroState::ChasingPac,
            StateHandlers::new().on_enter(enter_chasing_pac).on_update(update_chasing_pac),
        )
        .state(
            IntroState::ChasingGhosts,
            StateHandlers::new().on_enter(enter_chasing_ghosts).on_update(update_chasing_ghosts),
        )
        .state(
            IntroState::ReadyToPlay,
            StateHandlers::new().on_enter(enter_ready).on_update(update_ready),
        )
        .build(IntroState::Starting)?;

    Ok(Scene::new(fsm, stage, IntroState::Starting))
}
