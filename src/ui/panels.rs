use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::app::ModelSlot;
use crate::color::ResultStyle;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, model: &ModelSlot) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_export = !state.history.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export history…"))
                .clicked()
            {
                save_history_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        match model {
            ModelSlot::Ready(predictor) => {
                ui.label(format!(
                    "Model: {} ({} features) from {}",
                    predictor.estimator_name(),
                    predictor.schema().len(),
                    predictor.source().display()
                ));
            }
            ModelSlot::Unavailable(_) => {
                ui.label(RichText::new("No model loaded").color(Color32::RED));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let text = RichText::new(msg.text());
            if msg.is_error() {
                ui.label(text.color(Color32::RED));
            } else {
                ui.label(text);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Right side panel – session history
// ---------------------------------------------------------------------------

/// Render the list of predictions made in this session.
pub fn history_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("History");
    ui.separator();

    if state.history.is_empty() {
        ui.label("No predictions yet.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} predictions", state.history.len()));
        if ui.small_button("Clear").clicked() {
            state.clear_history();
        }
    });

    ui.push_id("history_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["#", "Grade 2", "Age", "Status"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                // Newest first.
                for (i, entry) in state.history.iter().enumerate().rev() {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{}", i + 1));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.1}", entry.record.sem2_grade));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(entry.record.age_at_enrollment.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            let color = ResultStyle::for_label(entry.label).text_color();
                            ui.label(RichText::new(entry.label.to_string()).color(color));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_history_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export prediction history")
        .add_filter("CSV", &["csv"])
        .set_file_name("student_status_predictions.csv")
        .save_file();

    if let Some(path) = file {
        state.export_history_to(&path);
    }
}
