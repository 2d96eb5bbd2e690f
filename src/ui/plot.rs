use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::class_colors;
use crate::model::label::StatusLabel;
use crate::model::predictor::Prediction;

// ---------------------------------------------------------------------------
// Class-probability chart
// ---------------------------------------------------------------------------

/// One bar per class, in the model's class order.
pub fn probability_chart(ui: &mut Ui, prediction: &Prediction) {
    let labels: Vec<StatusLabel> = prediction.probabilities.iter().map(|(l, _)| *l).collect();
    let colors = class_colors(&labels);
    let names: Vec<String> = labels.iter().map(|l| l.to_string()).collect();

    let axis_names = names.clone();
    Plot::new("probability_plot")
        .legend(Legend::default())
        .height(180.0)
        .y_axis_label("Probability")
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            axis_names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, ((_, p), color)) in prediction.probabilities.iter().zip(&colors).enumerate() {
                let bar = Bar::new(i as f64, *p).width(0.6).fill(*color);
                let chart = BarChart::new(vec![bar]).name(&names[i]).color(*color);
                plot_ui.bar_chart(chart);
            }
        });
}
