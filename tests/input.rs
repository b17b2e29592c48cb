use choreo::direction::Direction;
use choreo::input::{Buttons, InputSnapshot};
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_snapshot_detects_press_and_release_edges() {
    let first = InputSnapshot::default().next(Buttons::START | Buttons::LEFT);
    assert_that(&first.just_pressed(Buttons::START)).is_true();
    assert_that(&first.is_held(Buttons::START | Buttons::LEFT)).is_true();

    let second = first.next(Buttons::LEFT);
    assert_that(&second.just_pressed(Buttons::START)).is_false();
    assert_that(&second.just_pressed(Buttons::LEFT)).is_false();
    assert_that(&second.released).is_equal_to(Buttons::START);

    let third = second.next(Buttons::LEFT | Buttons::START);
    assert_that(&third.just_pressed(Buttons::START)).is_true();
}

#[test]
fn test_pressed_direction_ignores_held_buttons() {
    let held = InputSnapshot::from_held(Buttons::UP, Buttons::UP | Buttons::RIGHT);
    assert_that(&held.pressed_direction()).is_equal_to(Some(Direction::Right));

    let none = InputSnapshot::from_held(Buttons::UP, Buttons::UP);
    assert_that(&none.pressed_direction()).is_none();
}

#[test]
fn test_each_direction_button_is_reported() {
    for direction in Direction::iter() {
        let snapshot = InputSnapshot::from_held(Buttons::empty(), Buttons::from(direction));
        assert_eq!(snapshot.pressed_direction(), Some(direction));
    }
}

#[test]
fn test_direction_opposite() {
    let test_cases = [
        (Direction::Up, Direction::Down),
        (Direction::Down, Direction::Up),
        (Direction::Left, Direction::Right),
        (Direction::Right, Direction::Left),
    ];

    for (dir, expected) in test_cases {
        assert_eq!(dir.opposite(), expected);
        assert_eq!(dir.opposite().opposite(), dir);
    }
}

#[test]
fn test_direction_as_vec2_points_down_screen() {
    let test_cases = [
        (Direction::Up, Vec2::NEG_Y),
        (Direction::Down, Vec2::Y),
        (Direction::Left, Vec2::NEG_X),
        (Direction::Right, Vec2::X),
    ];

    for (dir, expected) in test_cases {
        assert_eq!(dir.as_vec2(), expected);
        assert_eq!(Vec2::from(dir), expected);
    }
}

#[test]
fn test_direction_as_usize_indexes_directions() {
    for (index, direction) in Direction::DIRECTIONS.into_iter().enumerate() {
        assert_eq!(direction.as_usize(), index);
    }
}
