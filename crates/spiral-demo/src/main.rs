mod app;

use std::process::ExitCode;

use spiral_engine::device::GpuInit;
use spiral_engine::logging::{init_logging, LoggingConfig};
use spiral_engine::window::{close_on_escape, Runtime, RuntimeConfig};

use crate::app::SpiralApp;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("spiral demo failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = RuntimeConfig {
        title: "Ola Espiral!".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::new(config)
        .gpu(GpuInit::default())
        .on_key(close_on_escape)
        .run(SpiralApp::default())
}
