use std::collections::HashMap;

use crate::animation::set::{ActorPose, AnimationId, FrameResolver};
use crate::direction::Direction;
use crate::sprites::SpriteRegion;

/// Frames for each of the four directions, indexed by [`Direction::as_usize`].
///
/// An empty list means "no override" for that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionalTiles([Vec<SpriteRegion>; 4]);

impl DirectionalTiles {
    pub fn new(up: Vec<SpriteRegion>, down: Vec<SpriteRegion>, left: Vec<SpriteRegion>, right: Vec<SpriteRegion>) -> Self {
        Self([up, down, left, right])
    }

    /// Builds the tiles by asking `f` for each direction.
    pub fn from_fn(mut f: impl FnMut(Direction) -> Vec<SpriteRegion>) -> Self {
        Self(Direction::DIRECTIONS.map(&mut f))
    }

    pub fn get(&self, direction: Direction) -> &[SpriteRegion] {
        &self.0[direction.as_usize()]
    }
}

#[derive(Debug, Clone, Default)]
struct Entry {
    moving: DirectionalTiles,
    stopped: Option<DirectionalTiles>,
}

/// The stock resolver: picks frames by the actor's facing, with a separate table while it stands still.
#[derive(Debug, Clone)]
pub struct DirectionalFrames<A: AnimationId> {
    entries: HashMap<A, Entry>,
}

impl<A: AnimationId> Default for DirectionalFrames<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AnimationId> DirectionalFrames<A> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Registers direction-dependent frames for `id`, used whether or not the actor moves.
    pub fn with(mut self, id: A, moving: DirectionalTiles) -> Self {
        self.entries.insert(id, Entry { moving, stopped: None });
        self
    }

    /// Registers separate frames for when the actor stands still.
    pub fn with_stopped(mut self, id: A, moving: DirectionalTiles, stopped: DirectionalTiles) -> Self {
        self.entries.insert(
            id,
            Entry {
                moving,
                stopped: Some(stopped),
            },
        );
        self
    }
}

impl<A: AnimationId> FrameResolver<A> for DirectionalFrames<A> {
    fn resolve(&self, id: A, pose: &ActorPose) -> Option<&[SpriteRegion]> {
        let entry = self.entries.get(&id)?;
        let tiles = match (&entry.stopped, pose.moving) {
            (Some(stopped), false) => stopped,
            _ => &entry.moving,
        };

        let frames = tiles.get(pose.facing);
        (!frames.is_empty()).then_some(frames)
    }
}
