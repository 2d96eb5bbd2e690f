use eframe::egui::{self, DragValue, Ui};

use crate::data::record::{AGE_RANGE, APPROVED_RANGE, GRADE_RANGE, GRADE_STEP};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Input form
// ---------------------------------------------------------------------------

/// Render the six input widgets and the action buttons.
///
/// Returns `true` when "Predict" was clicked. The whole form is disabled
/// when `enabled` is false (no model loaded).
pub fn input_form(ui: &mut Ui, state: &mut AppState, enabled: bool) -> bool {
    let mut clicked = false;

    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        ui.strong("Enter student data");
        ui.separator();

        let input = &mut state.input;
        egui::Grid::new("student_form")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui: &mut Ui| {
                ui.label("Second semester grade");
                ui.add(
                    DragValue::new(&mut input.sem2_grade)
                        .range(GRADE_RANGE)
                        .speed(GRADE_STEP)
                        .fixed_decimals(1),
                );
                ui.end_row();

                ui.label("Courses approved in second semester");
                ui.add(DragValue::new(&mut input.sem2_approved).range(APPROVED_RANGE));
                ui.end_row();

                ui.label("First semester grade");
                ui.add(
                    DragValue::new(&mut input.sem1_grade)
                        .range(GRADE_RANGE)
                        .speed(GRADE_STEP)
                        .fixed_decimals(1),
                );
                ui.end_row();

                ui.label("Tuition fees paid on time (0 = No, 1 = Yes)");
                egui::ComboBox::from_id_salt("tuition_up_to_date")
                    .selected_text(input.tuition_code().to_string())
                    .show_ui(ui, |ui: &mut Ui| {
                        ui.selectable_value(&mut input.tuition_up_to_date, false, "0");
                        ui.selectable_value(&mut input.tuition_up_to_date, true, "1");
                    });
                ui.end_row();

                ui.label("Courses approved in first semester");
                ui.add(DragValue::new(&mut input.sem1_approved).range(APPROVED_RANGE));
                ui.end_row();

                ui.label("Age at enrollment");
                ui.add(DragValue::new(&mut input.age_at_enrollment).range(AGE_RANGE));
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Predict").clicked() {
                clicked = true;
            }
            if ui.small_button("Reset").clicked() {
                state.reset_input();
            }
        });
    });

    clicked
}
