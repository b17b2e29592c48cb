//! Sprite identifiers and the regions they occupy on the sprite sheet.
//!
//! The renderer owns the sheet itself; the engine only hands out [`SpriteRegion`]s.

use glam::U16Vec2;
use strum_macros::{AsRefStr, EnumIter};

use crate::direction::Direction;

/// A rectangle on the sprite sheet. This is the frame reference handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteRegion {
    pub pos: U16Vec2,
    pub size: U16Vec2,
}

impl SpriteRegion {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            pos: U16Vec2::new(x, y),
            size: U16Vec2::new(width, height),
        }
    }

    /// A square cell on a grid of `cell`-sized tiles.
    pub const fn cell(column: u16, row: u16, cell: u16) -> Self {
        Self::new(column * cell, row * cell, cell, cell)
    }
}

/// The size of a regular actor cell on the sheet, in pixels.
const CELL: u16 = 16;
/// The size of an oversized cell (big Pac-Man, clapperboard), in pixels.
const LARGE_CELL: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    pub const fn as_usize(self) -> usize {
        match self {
            Ghost::Blinky => 0,
            Ghost::Pinky => 1,
            Ghost::Inky => 2,
            Ghost::Clyde => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Ghost::Blinky => "blinky",
            Ghost::Pinky => "pinky",
            Ghost::Inky => "inky",
            Ghost::Clyde => "clyde",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrightenedColor {
    Blue,
    White,
}

/// Every sprite the scripted scenes can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSprite {
    /// Pac-Man munching in a direction. Frame 2 is the closed mouth and is shared by all directions.
    Pacman(Direction, u8),
    /// The oversized Pac-Man from the first intermission.
    BigPacman(u8),
    MsPacman(Direction, u8),
    /// The normal appearance of a ghost for a given type, direction, and animation frame.
    Ghost(Ghost, Direction, u8),
    /// The frightened appearance of a ghost, with a specific color and animation frame.
    Frightened(FrightenedColor, u8),
    /// The "eyes only" appearance of a ghost after being eaten.
    Eyes(Direction),
    Clapperboard(u8),
    Heart,
    Energizer,
    /// The bonus score shown after eating a ghost (0 = 200, 1 = 400, 2 = 800, 3 = 1600).
    Points(u8),
    /// An empty region; draws nothing. Used for the "off" half of blinking sprites.
    Blank,
}

impl GameSprite {
    /// Returns the sheet region for this sprite.
    ///
    /// Frame numbers beyond the sprite's last frame are clamped to it.
    pub fn to_region(self) -> SpriteRegion {
        match self {
            GameSprite::Pacman(_, frame) if frame >= 2 => SpriteRegion::cell(2, 0, CELL),
            GameSprite::Pacman(direction, frame) => SpriteRegion::cell(frame as u16, direction.as_usize() as u16, CELL),
            GameSprite::BigPacman(frame) => SpriteRegion::new(frame.min(2) as u16 * LARGE_CELL, 5 * LARGE_CELL, LARGE_CELL, LARGE_CELL),
            GameSprite::MsPacman(direction, frame) => {
                SpriteRegion::cell(frame.min(2) as u16, 14 + direction.as_usize() as u16, CELL)
            }
            GameSprite::Ghost(ghost, direction, frame) => SpriteRegion::cell(
                direction.as_usize() as u16 * 2 + frame.min(1) as u16,
                4 + ghost.as_usize() as u16,
                CELL,
            ),
            GameSprite::Frightened(color, frame) => {
                let base = match color {
                    FrightenedColor::Blue => 0,
                    FrightenedColor::White => 2,
                };
                SpriteRegion::cell(base + frame.min(1) as u16, 8, CELL)
            }
            GameSprite::Eyes(direction) => SpriteRegion::cell(4 + direction.as_usize() as u16, 8, CELL),
            GameSprite::Clapperboard(frame) => {
                SpriteRegion::new(3 * LARGE_CELL + frame.min(2) as u16 * LARGE_CELL, 5 * LARGE_CELL, LARGE_CELL, LARGE_CELL)
            }
            GameSprite::Heart => SpriteRegion::cell(0, 18, CELL),
            GameSprite::Energizer => SpriteRegion::cell(1, 18, CELL),
            GameSprite::Points(index) => SpriteRegion::cell(2 + index.min(3) as u16, 18, CELL),
            GameSprite::Blank => SpriteRegion::default(),
        }
    }
}

impl From<GameSprite> for SpriteRegion {
    fn from(sprite: GameSprite) -> Self {
        sprite.to_region()
    }
}

/// Collects the regions of a run of sprites, in order.
pub fn regions<I: IntoIterator<Item = GameSprite>>(sprites: I) -> Vec<SpriteRegion> {
    sprites.into_iter().map(GameSprite::to_region).collect()
}
