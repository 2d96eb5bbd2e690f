use eframe::egui;

use crate::error::ModelError;
use crate::model::predictor::Predictor;
use crate::state::AppState;
use crate::ui::{form, panels, plot, result};

// ---------------------------------------------------------------------------
// Model slot: filled once at startup
// ---------------------------------------------------------------------------

/// Outcome of the startup model load. There is no reload path.
pub enum ModelSlot {
    Ready(Predictor),
    Unavailable(String),
}

impl From<Result<Predictor, ModelError>> for ModelSlot {
    fn from(loaded: Result<Predictor, ModelError>) -> Self {
        match loaded {
            Ok(predictor) => ModelSlot::Ready(predictor),
            Err(e) => {
                log::error!("Model load failed ({}): {e}", e.kind());
                ModelSlot::Unavailable(e.to_string())
            }
        }
    }
}

impl ModelSlot {
    pub fn predictor(&self) -> Option<&Predictor> {
        match self {
            ModelSlot::Ready(p) => Some(p),
            ModelSlot::Unavailable(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudentStatusApp {
    pub model: ModelSlot,
    pub state: AppState,
}

impl StudentStatusApp {
    pub fn new(model: ModelSlot) -> Self {
        Self {
            model,
            state: AppState::default(),
        }
    }
}

impl eframe::App for StudentStatusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.model);
        });

        // ---- Right side panel: session history ----
        egui::SidePanel::right("history_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::history_panel(ui, &mut self.state);
            });

        // ---- Central panel: form and result ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Student Status Prediction (Dropout, Enrolled, Graduate)");
                ui.add_space(8.0);

                if let ModelSlot::Unavailable(reason) = &self.model {
                    result::load_failure(ui, reason);
                    ui.add_space(8.0);
                }

                let predictor = self.model.predictor();
                let clicked = form::input_form(ui, &mut self.state, predictor.is_some());
                if let (true, Some(predictor)) = (clicked, predictor) {
                    self.state.run_prediction(predictor);
                }

                if let Some(prediction) = &self.state.last_prediction {
                    ui.add_space(12.0);
                    result::result_banner(ui, prediction);
                    ui.add_space(8.0);
                    plot::probability_chart(ui, prediction);
                    ui.add_space(8.0);
                    result::model_input_table(ui, prediction);
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn failed_load_leaves_no_predictor() {
        let slot = ModelSlot::from(Predictor::load(&PathBuf::from(
            "does/not/exist/student_status_model.json",
        )));
        assert!(slot.predictor().is_none());
        match slot {
            ModelSlot::Unavailable(reason) => assert!(reason.contains("not found")),
            ModelSlot::Ready(_) => panic!("expected load failure"),
        }
    }
}
