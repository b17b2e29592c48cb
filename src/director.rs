//! The outer game controller: runs the active scene once per tick and hands off between scenes.
//!
//! Each tick runs one pass of a chained `bevy_ecs` schedule, so the phase order is fixed:
//! latch input, update the scene (timers, logic, animations), route its lifecycle events, and
//! finally publish the render queries.

use std::collections::VecDeque;

use bevy_ecs::{
    event::{EventReader, EventWriter, Events},
    resource::Resource,
    schedule::{IntoScheduleConfigs, Schedule},
    system::{Res, ResMut},
    world::World,
};
use circular_buffer::CircularBuffer;
use tracing::{debug, error, info};

use crate::actor::RenderQuery;
use crate::config::{SceneConfig, SceneKind};
use crate::error::GameResult;
use crate::formatter;
use crate::input::{Buttons, InputSnapshot};
use crate::scene::{Playable, SceneEvent};
use crate::scenes;

/// How many recent scene events are kept for diagnostics.
pub const HISTORY_LEN: usize = 64;

/// The scene currently owning the stage, if any is left to play.
#[derive(Resource, Default)]
pub struct ActiveScene(pub Option<Box<dyn Playable>>);

/// The buttons the platform layer reports as held for the coming tick.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct HeldButtons(pub Buttons);

/// The scenes still to play, in order.
#[derive(Resource, Debug)]
pub struct Playlist {
    queue: VecDeque<SceneKind>,
    config: SceneConfig,
}

impl Playlist {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            queue: config.scene_order.iter().copied().collect(),
            config,
        }
    }

    /// Builds and starts the next scene. Scenes that fail to build are logged and skipped.
    pub fn next_scene(&mut self) -> Option<Box<dyn Playable>> {
        while let Some(kind) = self.queue.pop_front() {
            match scenes::build(kind, &self.config) {
                Ok(mut scene) => {
                    scene.start();
                    return Some(scene);
                }
                Err(error) => error!(scene = kind.as_ref(), %error, "Failed to build scene, skipping"),
            }
        }
        None
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Resource)]
pub struct SceneHistory(pub CircularBuffer<HISTORY_LEN, SceneEvent>);

/// The render queries of the active scene after the last tick.
#[derive(Resource, Default, Debug)]
pub struct RenderFrame(pub Vec<RenderQuery>);

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct DirectorState {
    /// Set once the playlist is exhausted.
    pub finished: bool,
    pub ticks: u64,
}

pub fn input_system(held: Res<HeldButtons>, mut snapshot: ResMut<InputSnapshot>) {
    *snapshot = snapshot.next(held.0);
}

pub fn scene_update_system(
    mut active: ResMut<ActiveScene>,
    input: Res<InputSnapshot>,
    mut events: EventWriter<SceneEvent>,
) {
    let Some(scene) = active.0.as_mut() else {
        return;
    };
    scene.update(*input);
    for event in scene.drain_events() {
        events.write(event);
    }
}

/// Records scene events and switches to the next scene when the active one terminates.
pub fn scene_event_system(
    mut events: EventReader<SceneEvent>,
    mut history: ResMut<SceneHistory>,
    mut active: ResMut<ActiveScene>,
    mut playlist: ResMut<Playlist>,
    mut state: ResMut<DirectorState>,
) {
    for event in events.read() {
        history.0.push_back(event.clone());
        match event {
            SceneEvent::StateChanged { scene, state: entered } => debug!(scene = *scene, state = %entered, "Scene state changed"),
            SceneEvent::Signal { scene, name } => debug!(scene = *scene, signal = *name, "Scene signal"),
            SceneEvent::Terminated { scene } => {
                info!(scene = *scene, remaining = playlist.remaining(), "Scene finished, handing off");
                active.0 = playlist.next_scene();
                if active.0.is_none() {
                    info!("Playlist exhausted");
                    state.finished = true;
                }
            }
        }
    }
}

pub fn render_system(active: Res<ActiveScene>, mut frame: ResMut<RenderFrame>) {
    frame.0 = active.0.as_ref().map(|scene| scene.render()).unwrap_or_default();
}

pub struct Director {
    pub world: World,
    schedule: Schedule,
}

impl Director {
    /// Builds the world and schedule and starts the first scene of the playlist.
    pub fn new(config: SceneConfig) -> GameResult<Self> {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        world.init_resource::<Events<SceneEvent>>();
        world.insert_resource(HeldButtons::default());
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(SceneHistory(CircularBuffer::new()));
        world.insert_resource(RenderFrame::default());

        let mut playlist = Playlist::new(config);
        let first = playlist.next_scene();
        world.insert_resource(DirectorState {
            finished: first.is_none(),
            ticks: 0,
        });
        world.insert_resource(ActiveScene(first));
        world.insert_resource(playlist);

        schedule.add_systems((input_system, scene_update_system, scene_event_system, render_system).chain());

        Ok(Self { world, schedule })
    }

    /// Runs exactly one simulation step with the given buttons held.
    ///
    /// Returns `true` once there is nothing left to play.
    pub fn tick(&mut self, held: Buttons) -> bool {
        self.world.insert_resource(HeldButtons(held));
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Events<SceneEvent>>().update();
        formatter::increment_tick();

        let mut state = self.world.resource_mut::<DirectorState>();
        state.ticks += 1;
        state.finished
    }

    pub fn render(&self) -> &[RenderQuery] {
        &self.world.resource::<RenderFrame>().0
    }

    pub fn state(&self) -> DirectorState {
        *self.world.resource::<DirectorState>()
    }

    pub fn active_scene(&self) -> Option<&'static str> {
        self.world.resource::<ActiveScene>().0.as_ref().map(|scene| scene.name())
    }

    /// The most recent scene events, oldest first.
    pub fn history(&self) -> Vec<SceneEvent> {
        self.world.resource::<SceneHistory>().0.iter().cloned().collect()
    }
}
