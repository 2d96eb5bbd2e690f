mod app;
mod color;
mod config;
mod data;
mod error;
mod model;
mod state;
mod ui;

use app::{ModelSlot, StudentStatusApp};
use config::AppConfig;
use eframe::egui;
use model::predictor::Predictor;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();
    // Loaded once; a failure disables the form for the rest of the session.
    let model = ModelSlot::from(Predictor::load(&config.model_path));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Status Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(StudentStatusApp::new(model)))),
    )
}
