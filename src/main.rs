//! Used Vehicle Market Dashboard - desktop entry point.

use anyhow::anyhow;
use autoscope::config::{DashboardConfig, CONFIG_FILE};
use autoscope::gui::DashboardApp;
use eframe::egui;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Used Vehicle Market Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Used Vehicle Market Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
