mod app;
mod chart;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use anyhow::{Context, anyhow};
use app::LaunchDashApp;
use config::DashConfig;
use dashboard::DashContext;
use eframe::egui;
use data::filter::SiteSelection;
use state::{AppState, ControlEvent};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashConfig::load(std::env::args().skip(1));

    // A missing or malformed dataset ends the process before any window opens.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("cannot start dashboard without {}", config.data_path.display()))?;
    let mut state = AppState::new(DashContext::new(dataset));
    state.apply(ControlEvent::SiteSelected(SiteSelection::parse(&config.initial_site)));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let slider = config.slider.clone();
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(LaunchDashApp::new(cc, state, slider)))),
    )
    .map_err(|e| anyhow!("window runtime failed: {e}"))
}
