//! The concrete choreographed scenes.

pub mod cast;
pub mod chase;
pub mod intro;
pub mod they_meet;

use tracing::debug;

use crate::config::{SceneConfig, SceneKind};
use crate::error::GameResult;
use crate::scene::Playable;

pub use cast::{Anim, Role};

/// Builds a fresh, unstarted instance of the given scene.
pub fn build(kind: SceneKind, config: &SceneConfig) -> GameResult<Box<dyn Playable>> {
    debug!(scene = kind.as_ref(), "Building scene");
    let config = config.clone();
    let scene: Box<dyn Playable> = match kind {
        SceneKind::Intro => Box::new(intro::build(config)?),
        SceneKind::Chase => Box::new(chase::build(config)?),
        SceneKind::TheyMeet => Box::new(they_meet::build(config)?),
    };
    Ok(scene)
}
