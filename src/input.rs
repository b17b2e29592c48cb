//! Discrete button input, delivered to scenes once per tick as a snapshot.
//!
//! Raw keyboard or controller decoding happens elsewhere; the engine only ever sees
//! which logical buttons are down.

use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use strum::IntoEnumIterator;

use crate::direction::Direction;

bitflags! {
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const START = 1 << 4;
        const SELECT = 1 << 5;
        const A = 1 << 6;
        const B = 1 << 7;
    }
}

impl From<Direction> for Buttons {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Buttons::UP,
            Direction::Down => Buttons::DOWN,
            Direction::Left => Buttons::LEFT,
            Direction::Right => Buttons::RIGHT,
        }
    }
}

/// The buttons held during one tick, plus the edges relative to the previous tick.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: Buttons,
    pub pressed: Buttons,
    pub released: Buttons,
}

impl InputSnapshot {
    /// Builds the snapshot for this tick from the buttons held now and during the previous tick.
    pub fn from_held(previous: Buttons, held: Buttons) -> Self {
        Self {
            held,
            pressed: held & !previous,
            released: previous & !held,
        }
    }

    /// Produces the next snapshot, treating `self.held` as the previous tick's state.
    pub fn next(&self, held: Buttons) -> Self {
        Self::from_held(self.held, held)
    }

    /// True only on the tick the button went down.
    pub fn just_pressed(&self, buttons: Buttons) -> bool {
        self.pressed.intersects(buttons)
    }

    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.held.contains(buttons)
    }

    /// The first direction button (in declaration order) that went down this tick.
    pub fn pressed_direction(&self) -> Option<Direction> {
        Direction::iter().find(|direction| self.pressed.contains(Buttons::from(*direction)))
    }
}
