//! The shared cast of the scripted scenes and the animations each member carries.

use glam::Vec2;

use crate::actor::Actor;
use crate::animation::{AnimationSequence, AnimationSet, DirectionalFrames, DirectionalTiles};
use crate::constants::animation::{
    BIG_PACMAN_HOLD, CLAPPERBOARD_HOLD, ENERGIZER_BLINK_HOLD, GHOST_FLUTTER_HOLD, GHOST_FRIGHTENED_HOLD, PACMAN_MUNCH_HOLD,
};
use crate::direction::Direction;
use crate::error::GameResult;
use crate::sprites::{regions, FrightenedColor, GameSprite, Ghost, SpriteRegion};

/// Cast members, ordered by draw layer (props first, Pac-Man last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Clapperboard,
    Energizer,
    Heart,
    Blinky,
    Pinky,
    Inky,
    Clyde,
    MsPacMan,
    PacMan,
}

impl Role {
    pub const GHOSTS: [Role; 4] = [Role::Blinky, Role::Pinky, Role::Inky, Role::Clyde];

    pub fn ghost(self) -> Option<Ghost> {
        match self {
            Role::Blinky => Some(Ghost::Blinky),
            Role::Pinky => Some(Ghost::Pinky),
            Role::Inky => Some(Ghost::Inky),
            Role::Clyde => Some(Ghost::Clyde),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anim {
    Munching,
    BigPacman,
    Normal,
    Frightened,
    /// Frightened, alternating blue and white as the effect wears off.
    Flashing,
    Eyes,
    Points,
    Clapperboard,
    Still,
    Blinking,
}

fn munching(sprite: fn(Direction, u8) -> GameSprite, direction: Direction) -> Vec<SpriteRegion> {
    regions([sprite(direction, 0), sprite(direction, 1), sprite(direction, 2), sprite(direction, 1)])
}

fn munching_actor(name: &'static str, sprite: fn(Direction, u8) -> GameSprite) -> GameResult<Actor<Anim>> {
    let resolver = DirectionalFrames::new().with_stopped(
        Anim::Munching,
        DirectionalTiles::from_fn(|direction| munching(sprite, direction)),
        DirectionalTiles::from_fn(|direction| regions([sprite(direction, 1)])),
    );

    let animations = AnimationSet::new()
        .with(
            Anim::Munching,
            AnimationSequence::looping(munching(sprite, Direction::Left), PACMAN_MUNCH_HOLD)?,
        )?
        .with_resolver(resolver);
    Ok(Actor::new(name, animations))
}

/// Pac-Man, with the munching cycle and the oversized intermission sprite.
pub fn pacman() -> GameResult<Actor<Anim>> {
    let mut actor = munching_actor("pacman", GameSprite::Pacman)?;
    actor.animations.insert(
        Anim::BigPacman,
        AnimationSequence::looping(
            regions([
                GameSprite::BigPacman(0),
                GameSprite::BigPacman(1),
                GameSprite::BigPacman(2),
                GameSprite::BigPacman(1),
            ]),
            BIG_PACMAN_HOLD,
        )?,
    )?;
    Ok(actor)
}

pub fn ms_pacman() -> GameResult<Actor<Anim>> {
    munching_actor("ms_pacman", GameSprite::MsPacman)
}

/// A ghost with its normal, frightened, flashing, eyes and bonus-points looks.
pub fn ghost(ghost: Ghost) -> GameResult<Actor<Anim>> {
    let body = |direction| regions([GameSprite::Ghost(ghost, direction, 0), GameSprite::Ghost(ghost, direction, 1)]);
    let resolver = DirectionalFrames::new()
        .with(Anim::Normal, DirectionalTiles::from_fn(body))
        .with(Anim::Eyes, DirectionalTiles::from_fn(|direction| regions([GameSprite::Eyes(direction)])));

    let animations = AnimationSet::new()
        .with(Anim::Normal, AnimationSequence::looping(body(Direction::Left), GHOST_FLUTTER_HOLD)?)?
        .with(
            Anim::Frightened,
            AnimationSequence::looping(
                regions([
                    GameSprite::Frightened(FrightenedColor::Blue, 0),
                    GameSprite::Frightened(FrightenedColor::Blue, 1),
                ]),
                GHOST_FRIGHTENED_HOLD,
            )?,
        )?
        .with(
            Anim::Flashing,
            AnimationSequence::looping(
                regions([
                    GameSprite::Frightened(FrightenedColor::Blue, 0),
                    GameSprite::Frightened(FrightenedColor::White, 0),
                    GameSprite::Frightened(FrightenedColor::Blue, 1),
                    GameSprite::Frightened(FrightenedColor::White, 1),
                ]),
                GHOST_FRIGHTENED_HOLD,
            )?,
        )?
        .with(Anim::Eyes, AnimationSequence::still(GameSprite::Eyes(Direction::Left).into()))?
        .with(
            Anim::Points,
            AnimationSequence::once(
                regions([GameSprite::Points(0), GameSprite::Points(1), GameSprite::Points(2), GameSprite::Points(3)]),
                1,
            )?,
        )?
        .with_resolver(resolver);

    Ok(Actor::new(ghost.name(), animations))
}

/// The opening clapperboard of a Ms. Pac-Man act; it claps once and stays shut.
pub fn clapperboard() -> GameResult<Actor<Anim>> {
    let animations = AnimationSet::new().with(
        Anim::Clapperboard,
        AnimationSequence::once(
            regions([
                GameSprite::Clapperboard(0),
                GameSprite::Clapperboard(1),
                GameSprite::Clapperboard(2),
            ]),
            CLAPPERBOARD_HOLD,
        )?,
    )?;
    Ok(Actor::new("clapperboard", animations))
}

pub fn heart() -> GameResult<Actor<Anim>> {
    let animations = AnimationSet::new().with(Anim::Still, AnimationSequence::still(GameSprite::Heart.into()))?;
    Ok(Actor::new("heart", animations))
}

pub fn energizer() -> GameResult<Actor<Anim>> {
    let animations = AnimationSet::new().with(
        Anim::Blinking,
        AnimationSequence::looping(regions([GameSprite::Energizer, GameSprite::Blank]), ENERGIZER_BLINK_HOLD)?,
    )?;
    Ok(Actor::new("energizer", animations))
}

/// Screen row of a lane, in pixels.
pub const fn lane(tile_row: i32) -> f32 {
    crate::constants::tile_to_world(0, tile_row, Vec2::ZERO).y
}
