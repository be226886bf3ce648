use eframe::egui;

mod api;
mod app;
mod config;
mod debounce;
mod error;
mod forms;
mod list;
mod logging;
mod models;
mod plan_builder;
mod submit;
mod upload;
mod views;

use app::AdminApp;
use config::Settings;

fn main() -> Result<(), eframe::Error> {
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let settings = Settings::load();
    logging::log_settings(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 960.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Fitness Admin",
        options,
        Box::new(|cc| Ok(Box::new(AdminApp::new(cc, settings)))),
    )
}
