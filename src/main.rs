use std::env;

use anyhow::Result;
use mazechase::{app::App, constants::LOOP_TIME, logging::setup_logging};
use tracing::info;

/// The main entry point of the application.
///
/// Sets up logging, opens the window, then runs frames until exit is requested.
/// Pass `--console` (or `-c`) for debug-level logging.
pub fn main() -> Result<()> {
    let verbose = env::args().any(|arg| arg == "--console" || arg == "-c");
    setup_logging(verbose)?;

    let mut app = App::new()?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    info!("Game loop finished");
    Ok(())
}
