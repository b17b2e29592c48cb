use choreo::{app::App, config::SceneConfig, constants::LOOP_TIME, input::Buttons, logging};
use tracing::info;

/// Plays the configured scenes headlessly, logging their lifecycle.
pub fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let config = SceneConfig::load()?;
    let mut app = App::new(config)?;

    info!(loop_time = ?LOOP_TIME, "Starting tick loop");
    while app.run(Buttons::empty()) {}

    let state = app.director.state();
    info!(ticks = state.ticks, finished = state.finished, "Shutting down");
    Ok(())
}
