use choreo::actor::Command;
use choreo::config::SceneConfig;
use choreo::constants::LEFT_BORDER;
use choreo::input::InputSnapshot;
use choreo::scene::{Playable, SceneEvent, Stage};
use choreo::script::{Action, Script};
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::{actor, scripted_scene, TestAnim, TestKey};

fn show_then_terminate() -> Script<TestKey, TestAnim> {
    Script::builder()
        .at(10, [Action::actor(TestKey::Hero, Command::Show)])
        .at(20, [Action::Terminate])
        .build()
        .unwrap()
}

#[test]
fn test_show_then_terminate_over_twenty_five_ticks() {
    let mut scene = scripted_scene(show_then_terminate());
    scene.start();
    scene.drain_events();

    let mut terminations = Vec::new();
    for tick in 1..=25u64 {
        scene.update(InputSnapshot::default());
        let visible = scene.stage().actor(TestKey::Hero).unwrap().visible;
        assert_eq!(visible, tick >= 10, "tick {tick}");

        let ended = scene
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, SceneEvent::Terminated { .. }))
            .count();
        terminations.extend(std::iter::repeat(tick).take(ended));
    }

    assert_eq!(terminations, vec![20]);
    assert_that(&scene.is_terminated()).is_true();
    assert_that(&scene.stage().clock()).is_equal_to(20);
}

#[test]
fn test_actor_placed_at_left_border_moves_two_pixels_per_tick() {
    let script = Script::builder()
        .at(
            130,
            [
                Action::actor(TestKey::Hero, Command::Place(Vec2::new(LEFT_BORDER, 0.0))),
                Action::actor(TestKey::Hero, Command::Velocity(Vec2::new(2.0, 0.0))),
            ],
        )
        .build()
        .unwrap();
    let mut scene = scripted_scene(script);

    // The cue tick integrates too, so 100 ticks of motion end on tick 229.
    for _ in 0..229 {
        scene.update(InputSnapshot::default());
    }

    let hero = scene.stage().actor(TestKey::Hero).unwrap();
    assert_that(&hero.position.x).is_equal_to(LEFT_BORDER + 200.0);
    assert_that(&hero.position.y).is_equal_to(0.0);
}

#[test]
fn test_first_update_dispatches_tick_one() {
    let script = Script::builder().at(1, [Action::actor(TestKey::Hero, Command::Show)]).build().unwrap();
    let mut scene = scripted_scene(script);
    scene.start();

    assert_that(&scene.stage().actor(TestKey::Hero).unwrap().visible).is_false();
    scene.update(InputSnapshot::default());
    assert_that(&scene.stage().actor(TestKey::Hero).unwrap().visible).is_true();
}

#[test]
fn test_start_reports_initial_state() {
    let mut scene = scripted_scene(Script::empty());
    scene.start();

    assert_eq!(
        scene.drain_events(),
        vec![SceneEvent::StateChanged {
            scene: "test",
            state: "Running".to_string(),
        }]
    );
}

#[test]
fn test_update_starts_unstarted_scene() {
    let mut scene = scripted_scene(Script::empty());
    scene.update(InputSnapshot::default());

    assert_that(&scene.stage().clock()).is_equal_to(1);
    assert_that(&scene.drain_events()).has_length(1);
}

#[test]
fn test_terminated_scene_ignores_updates() {
    let script = Script::builder().at(2, [Action::Terminate]).build().unwrap();
    let mut scene = scripted_scene(script);
    for _ in 0..10 {
        scene.update(InputSnapshot::default());
    }

    assert_that(&scene.stage().clock()).is_equal_to(2);
    assert_that(&scene.machine().timer().elapsed_ticks()).is_equal_to(2);
}

#[test]
fn test_restart_replays_the_script() {
    let mut scene = scripted_scene(show_then_terminate());
    for _ in 0..20 {
        scene.update(InputSnapshot::default());
    }
    assert_that(&scene.is_terminated()).is_true();

    scene.start();
    scene.update(InputSnapshot::default());
    assert_that(&scene.stage().actor(TestKey::Hero).unwrap().visible).is_false();

    for _ in 1..10 {
        scene.update(InputSnapshot::default());
    }
    assert_that(&scene.is_terminated()).is_false();
    assert_that(&scene.stage().actor(TestKey::Hero).unwrap().visible).is_true();
}

#[test]
fn test_restart_restores_the_opening_cast() {
    let script = Script::builder()
        .at(
            3,
            [
                Action::actor(TestKey::Hero, Command::Velocity(Vec2::new(1.5, 0.0))),
                Action::actor(TestKey::Hero, Command::Select(TestAnim::Walk)),
                Action::actor(TestKey::Hero, Command::Show),
            ],
        )
        .build()
        .unwrap();
    let mut replayed = scripted_scene(script.clone());
    for _ in 0..40 {
        replayed.update(InputSnapshot::default());
    }
    replayed.start();

    let mut fresh = scripted_scene(script);
    fresh.start();
    for tick in 1..=10u64 {
        replayed.update(InputSnapshot::default());
        fresh.update(InputSnapshot::default());
        assert_eq!(replayed.stage().render(), fresh.stage().render(), "tick {tick}");
    }

    let hero = replayed.stage().actor(TestKey::Hero).unwrap();
    assert_that(&hero.position.x).is_equal_to(1.5 * 8.0);
    assert_that(&hero.animations.selected()).is_equal_to(Some(TestAnim::Walk));
}

#[test]
fn test_dispatch_runs_once_per_scene_tick() {
    let script: Script<TestKey, TestAnim> = Script::builder().at(1, [Action::Signal("ping")]).build().unwrap();
    let mut stage = Stage::new("stage", SceneConfig::default(), script, ());

    stage.dispatch(1);
    stage.dispatch(1);

    assert_that(&stage.drain_events()).has_length(1);
}

#[test]
fn test_terminate_is_reported_once() {
    let mut stage: Stage<TestKey, TestAnim> = Stage::new("stage", SceneConfig::default(), Script::empty(), ());
    stage.terminate();
    stage.terminate();

    assert_eq!(stage.drain_events(), vec![SceneEvent::Terminated { scene: "stage" }]);
}

#[test]
fn test_hidden_actors_render_only_with_debug_overlay() {
    let build = |debug_overlay| {
        let config = SceneConfig {
            debug_overlay,
            ..SceneConfig::default()
        };
        let mut stage = Stage::new("stage", config, Script::<TestKey, TestAnim>::empty(), ())
            .with_actor(TestKey::Hero, actor("hero"))
            .with_actor(TestKey::Sidekick, actor("sidekick"));
        stage.apply(TestKey::Sidekick, Command::Show);
        stage
    };

    assert_that(&build(false).render()).has_length(1);
    assert_that(&build(true).render()).has_length(2);
}

#[test]
fn test_visible_actor_animates_and_hidden_one_does_not() {
    let mut stage: Stage<TestKey, TestAnim> = Stage::new("stage", SceneConfig::default(), Script::empty(), ())
        .with_actor(TestKey::Hero, actor("hero"))
        .with_actor(TestKey::Sidekick, actor("sidekick"));
    stage.apply_all(TestKey::Hero, [Command::Select(TestAnim::Walk), Command::Show]);
    stage.apply(TestKey::Sidekick, Command::Select(TestAnim::Walk));

    stage.advance_animations();
    stage.advance_animations();

    let index = |key| stage.actor(key).unwrap().animations.current().unwrap().frame_index();
    assert_that(&index(TestKey::Hero)).is_equal_to(1);
    assert_that(&index(TestKey::Sidekick)).is_equal_to(0);
}

#[test]
fn test_playable_object_drives_scene() {
    let mut scene: Box<dyn Playable> = Box::new(scripted_scene(show_then_terminate()));
    scene.start();
    while !scene.is_terminated() {
        scene.update(InputSnapshot::default());
    }

    assert_that(&scene.name()).is_equal_to("test");
    assert_that(&scene.render()).has_length(1);
}
