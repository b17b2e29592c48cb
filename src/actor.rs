use glam::Vec2;
use tracing::trace;

use crate::animation::{ActorPose, AnimationId, AnimationSet};
use crate::constants::tile_to_world;
use crate::direction::Direction;
use crate::sprites::SpriteRegion;

/// What the renderer needs to paint one actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderQuery {
    pub frame: Option<SpriteRegion>,
    pub position: Vec2,
    pub visible: bool,
}

/// A single mutation a script can apply to an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<A> {
    /// Moves the actor to a world position.
    Place(Vec2),
    /// Moves the actor to a tile, plus a pixel offset.
    PlaceAtTile { x: i32, y: i32, offset: Vec2 },
    /// Sets the velocity and starts moving.
    Velocity(Vec2),
    /// Moves at `speed` pixels per tick in a direction, facing it.
    Head(Direction, f32),
    Acceleration(Vec2),
    Face(Direction),
    Show,
    Hide,
    /// Selects an animation from its first frame. Re-selecting the current one keeps its position.
    Select(A),
    SelectAt(A, usize),
    StartAnimation,
    StopAnimation,
    StartMoving,
    /// Stops moving and clears velocity and acceleration.
    Halt,
}

/// The minimal actor contract driven by scenes: kinematics, facing, visibility and animations.
///
/// Position only changes through [`Actor::integrate`], once per tick while moving.
#[derive(Debug, Clone)]
pub struct Actor<A: AnimationId> {
    pub name: &'static str,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub facing: Direction,
    pub visible: bool,
    pub moving: bool,
    pub animations: AnimationSet<A>,
}

impl<A: AnimationId> Actor<A> {
    /// Creates a hidden, motionless actor at the origin.
    pub fn new(name: &'static str, animations: AnimationSet<A>) -> Self {
        Self {
            name,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            facing: Direction::default(),
            visible: false,
            moving: false,
            animations,
        }
    }

    pub fn place_at_tile(&mut self, x: i32, y: i32, offset: Vec2) {
        self.position = tile_to_world(x, y, offset);
    }

    pub fn apply(&mut self, command: Command<A>) {
        trace!(actor = self.name, command = ?command, "Applying command");
        match command {
            Command::Place(position) => self.position = position,
            Command::PlaceAtTile { x, y, offset } => self.place_at_tile(x, y, offset),
            Command::Velocity(velocity) => {
                self.velocity = velocity;
                self.moving = true;
            }
            Command::Head(direction, speed) => {
                self.facing = direction;
                self.velocity = direction.as_vec2() * speed;
                self.moving = true;
            }
            Command::Acceleration(acceleration) => self.acceleration = acceleration,
            Command::Face(direction) => self.facing = direction,
            Command::Show => self.visible = true,
            Command::Hide => self.visible = false,
            Command::Select(id) => {
                self.animations.select(id);
            }
            Command::SelectAt(id, frame) => {
                self.animations.select_at(id, frame);
            }
            Command::StartAnimation => self.animations.start(),
            Command::StopAnimation => self.animations.stop(),
            Command::StartMoving => self.moving = true,
            Command::Halt => {
                self.moving = false;
                self.velocity = Vec2::ZERO;
                self.acceleration = Vec2::ZERO;
            }
        }
    }

    /// One tick of motion: `position += velocity`, then `velocity += acceleration`.
    pub fn integrate(&mut self) {
        if !self.moving {
            return;
        }
        self.position += self.velocity;
        self.velocity += self.acceleration;
    }

    pub fn pose(&self) -> ActorPose {
        ActorPose {
            facing: self.facing,
            moving: self.moving && self.velocity != Vec2::ZERO,
            velocity: self.velocity,
        }
    }

    /// Resolves the frames for the current pose and, if visible, advances the selected animation.
    pub fn update_animation(&mut self) {
        let pose = self.pose();
        self.animations.resolve_frames(&pose);
        if self.visible {
            self.animations.advance();
        }
    }

    pub fn render_query(&self) -> RenderQuery {
        RenderQuery {
            frame: self.animations.current_frame(),
            position: self.position,
            visible: self.visible,
        }
    }
}
