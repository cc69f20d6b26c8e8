use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use spacex_dash::app::SpacexDashApp;
use spacex_dash::cli::Args;
use spacex_dash::data::loader::load_file;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Load before opening the window: no partial startup.
    let dataset = match load_file(&args.data) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Failed to load {}: {e}", args.data.display());
            return Err(e).with_context(|| format!("loading {}", args.data.display()));
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SpacexDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {e}"))
}
