mod app;
mod config;
mod draw;
mod hud;

use anyhow::Result;

use gloaming_engine::device::GpuInit;
use gloaming_engine::logging::{init_logging, LoggingConfig};
use gloaming_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env()?;
    log::info!(
        "gloaming studio starting (content dir {}, seed {:?})",
        config.content_dir.display(),
        config.seed
    );

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), StudioApp::new(config))
}
