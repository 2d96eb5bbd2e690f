use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ResultStyle;
use crate::model::predictor::Prediction;

// ---------------------------------------------------------------------------
// Result banner
// ---------------------------------------------------------------------------

/// Dropout gets a red heading; everything else a filled box.
pub fn result_banner(ui: &mut Ui, prediction: &Prediction) {
    let style = ResultStyle::for_label(prediction.label);
    let text = format!("Predicted student status: {}", prediction.label);

    match style {
        ResultStyle::Alert => {
            ui.label(RichText::new(text).heading().strong().color(style.text_color()));
        }
        ResultStyle::Success | ResultStyle::Warning => {
            egui::Frame::group(ui.style())
                .fill(style.fill())
                .inner_margin(10.0)
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(text).strong().color(style.text_color()));
                });
        }
    }
}

/// Shown in place of a result when the model could not be loaded.
pub fn load_failure(ui: &mut Ui, reason: &str) {
    ui.label(RichText::new("The prediction model could not be loaded.").strong().color(Color32::RED));
    ui.label(RichText::new(reason).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// Aligned model input
// ---------------------------------------------------------------------------

/// Collapsible table of the row the model actually received.
pub fn model_input_table(ui: &mut Ui, prediction: &Prediction) {
    egui::CollapsingHeader::new("Model input")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.push_id("model_input_table", |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::auto().at_least(260.0))
                    .column(Column::remainder())
                    .header(20.0, |mut header| {
                        header.col(|ui: &mut Ui| {
                            ui.strong("Column");
                        });
                        header.col(|ui: &mut Ui| {
                            ui.strong("Value");
                        });
                    })
                    .body(|mut body| {
                        for (name, value) in prediction.aligned.iter() {
                            body.row(18.0, |mut row| {
                                row.col(|ui: &mut Ui| {
                                    ui.monospace(name);
                                });
                                row.col(|ui: &mut Ui| {
                                    ui.label(format!("{value}"));
                                });
                            });
                        }
                    });
            });
        });
}
