pub mod capture;
pub mod cli;
pub mod error;
pub mod keystrokes;
pub mod settings;
pub mod storage;
pub mod utils;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use capture::CaptureController;
use cli::Cli;
use storage::DailyLogStore;

pub use error::CaptureError;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Configuration errors end the process before anything is captured.
    let config = cli.resolve()?;

    utils::logging::init(config.log_level);
    info!("Keystroke logger starting up...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build the capture runtime")?;

    runtime.block_on(async move {
        let mut controller = CaptureController::new();

        let shutdown = controller.cancel_token();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping capture");
                    shutdown.cancel();
                }
                // Capture keeps running; only a kill ends it now.
                Err(err) => warn!("Failed to listen for Ctrl-C: {err}"),
            }
        });

        controller.run(DailyLogStore::new(config.output_dir)).await
    })
}
