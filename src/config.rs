use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter};

use crate::error::GameResult;

/// The scripted scenes the director knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SceneKind {
    /// The attract-mode intro with the ghost gallery.
    Intro,
    /// Pac-Man intermission one: Blinky chases Pac-Man, then big Pac-Man chases back.
    Chase,
    /// Ms. Pac-Man act one.
    TheyMeet,
}

/// Settings handed to every scene when it is built.
///
/// Scenes read these fields directly each tick; nothing is observed or bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Report hidden actors to the renderer as well, for debugging choreography.
    pub debug_overlay: bool,
    /// Run as fast as possible instead of pacing ticks at the fixed loop time.
    pub headless: bool,
    /// Stop the runner after this many ticks.
    pub max_ticks: Option<u64>,
    /// The scenes to play, in order.
    pub scene_order: Vec<SceneKind>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            debug_overlay: false,
            headless: false,
            max_ticks: None,
            scene_order: vec![SceneKind::Intro, SceneKind::Chase, SceneKind::TheyMeet],
        }
    }
}

impl SceneConfig {
    /// Loads the configuration, letting `CHOREO_*` environment variables override the defaults.
    ///
    /// e.g. `CHOREO_HEADLESS=true CHOREO_SCENE_ORDER=[chase]`
    pub fn load() -> GameResult<Self> {
        Self::figment().extract().map_err(Into::into)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(SceneConfig::default()))
            .merge(Env::prefixed("CHOREO_"))
    }
}
