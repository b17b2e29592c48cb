use std::time::{Duration, Instant};

use tracing::{info, trace};

use crate::config::SceneConfig;
use crate::constants::LOOP_TIME;
use crate::director::Director;
use crate::error::GameResult;
use crate::input::Buttons;

/// Drives the director at the fixed tick rate until the playlist ends or the tick limit is hit.
pub struct App {
    pub director: Director,
    config: SceneConfig,
    last_tick: Instant,
}

impl App {
    pub fn new(config: SceneConfig) -> GameResult<Self> {
        info!(scenes = ?config.scene_order, headless = config.headless, "Initializing director");
        let director = Director::new(config.clone())?;
        Ok(Self {
            director,
            config,
            last_tick: Instant::now(),
        })
    }

    /// Executes a single tick, then sleeps off whatever is left of [`LOOP_TIME`] unless headless.
    ///
    /// # Returns
    ///
    /// `true` if the app should keep running.
    pub fn run(&mut self, held: Buttons) -> bool {
        let start = Instant::now();
        let dt = self.last_tick.elapsed();
        self.last_tick = start;
        trace!(dt = ?dt, "Tick");

        let finished = self.director.tick(held);
        let ticks = self.director.state().ticks;
        if finished {
            info!(ticks, "All scenes finished");
            return false;
        }
        if self.config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "Tick limit reached");
            return false;
        }

        if !self.config.headless {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        }

        true
    }
}
