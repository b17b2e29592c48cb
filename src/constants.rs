//! This module contains all the constants used by the choreography engine.

use std::time::Duration;

use glam::{UVec2, Vec2};

/// The fixed simulation rate. Every tick literal in a script is tuned against this value.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 8;
/// The size of the arcade screen, in tiles.
pub const WORLD_TILE_SIZE: UVec2 = UVec2::new(28, 36);
/// The size of the arcade screen, in pixels.
pub const WORLD_PIXEL_SIZE: UVec2 = UVec2::new(WORLD_TILE_SIZE.x * TILE_SIZE, WORLD_TILE_SIZE.y * TILE_SIZE);

/// The x coordinate at which actors entering from the left are placed (just off-screen).
pub const LEFT_BORDER: f32 = -((2 * TILE_SIZE) as f32);
/// The x coordinate at which actors entering from the right are placed (just off-screen).
pub const RIGHT_BORDER: f32 = (WORLD_PIXEL_SIZE.x + TILE_SIZE) as f32;

/// Converts a tile coordinate with a pixel offset into a world position.
pub const fn tile_to_world(tile_x: i32, tile_y: i32, offset: Vec2) -> Vec2 {
    Vec2::new(
        (tile_x * TILE_SIZE as i32) as f32 + offset.x,
        (tile_y * TILE_SIZE as i32) as f32 + offset.y,
    )
}

/// Animation frame holds, in ticks.
pub mod animation {
    /// Pac-Man's munching cycle.
    pub const PACMAN_MUNCH_HOLD: u32 = 2;
    /// The oversized Pac-Man seen in the first intermission.
    pub const BIG_PACMAN_HOLD: u32 = 4;
    /// Ghost body flutter.
    pub const GHOST_FLUTTER_HOLD: u32 = 8;
    /// Frightened ghost flutter.
    pub const GHOST_FRIGHTENED_HOLD: u32 = 8;
    /// The blinking energizer on the intro screen.
    pub const ENERGIZER_BLINK_HOLD: u32 = 10;
    /// The clapperboard opening a Ms. Pac-Man act.
    pub const CLAPPERBOARD_HOLD: u32 = 12;
}

/// Movement speeds, in pixels per tick.
pub mod speed {
    pub const PACMAN: f32 = 1.25;
    pub const GHOST: f32 = 1.3;
    pub const GHOST_FRIGHTENED: f32 = 0.75;
    pub const BIG_PACMAN: f32 = 1.0;
    pub const COUPLE: f32 = 1.0;
    pub const CHASING_GHOST: f32 = 1.25;
    /// Downward acceleration applied to bouncing ghosts.
    pub const GRAVITY: f32 = 0.1;
    /// Initial upward velocity of a ghost bouncing off another.
    pub const BOUNCE: f32 = -1.25;
}
