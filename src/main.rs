mod app;
mod color;
mod config;
mod data;
mod error;
mod export;
mod fit;
mod state;
mod ui;

use app::RustyApproxApp;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Approx – Polynomial Approximation",
        options,
        Box::new(|_cc| Ok(Box::new(RustyApproxApp::new(AppState::new(config))))),
    )
}
