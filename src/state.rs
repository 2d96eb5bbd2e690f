use std::path::Path;

use crate::data::history::{export_history, HistoryEntry};
use crate::data::record::StudentRecord;
use crate::error::PredictionError;
use crate::model::predictor::{Prediction, Predictor};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Current form values.
    pub input: StudentRecord,

    /// Result of the last successful prediction.
    pub last_prediction: Option<Prediction>,

    /// Predictions made in this session, oldest first.
    pub history: Vec<HistoryEntry>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

/// A one-line message for the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(s) | StatusMessage::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

impl AppState {
    /// Run one prediction for the current form values.
    pub fn run_prediction(&mut self, predictor: &Predictor) {
        let record = self.input.clamped();
        let outcome = predictor.predict(&record);
        self.apply_outcome(record, outcome);
    }

    /// Record the outcome of a prediction request.
    ///
    /// On failure the previous result stays on screen and the error is shown.
    pub fn apply_outcome(
        &mut self,
        record: StudentRecord,
        outcome: Result<Prediction, PredictionError>,
    ) {
        match outcome {
            Ok(prediction) => {
                log::info!(
                    "Predicted {} (class {}) for {:?}",
                    prediction.label,
                    prediction.class_index,
                    record
                );
                self.history.push(HistoryEntry {
                    record,
                    label: prediction.label,
                    class_index: prediction.class_index,
                });
                self.last_prediction = Some(prediction);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Prediction failed ({}): {e}", e.kind());
                self.status_message = Some(StatusMessage::Error(format!("Error: {e}")));
            }
        }
    }

    /// Write the session history to `path` as CSV.
    pub fn export_history_to(&mut self, path: &Path) {
        match export_history(path, &self.history) {
            Ok(()) => {
                log::info!("Exported {} predictions to {}", self.history.len(), path.display());
                self.status_message = Some(StatusMessage::Info(format!(
                    "Exported {} predictions to {}",
                    self.history.len(),
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Failed to export history: {e:#}");
                self.status_message = Some(StatusMessage::Error(format!("Error: {e:#}")));
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Reset the form to its defaults, keeping the shown result.
    pub fn reset_input(&mut self) {
        self.input = StudentRecord::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::ModelArtifact;
    use crate::model::label::StatusLabel;
    use std::path::PathBuf;

    fn predictor() -> Predictor {
        let artifact: ModelArtifact =
            serde_json::from_str(include_str!("../model/student_status_model.json")).unwrap();
        Predictor::from_artifact(artifact, PathBuf::from("bundled")).unwrap()
    }

    #[test]
    fn successful_prediction_updates_result_and_history() {
        let predictor = predictor();
        let mut state = AppState::default();
        state.status_message = Some(StatusMessage::Info("stale".into()));
        state.run_prediction(&predictor);

        assert_eq!(
            state.last_prediction.as_ref().map(|p| p.label),
            Some(StatusLabel::Dropout)
        );
        assert_eq!(state.history.len(), 1);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_prediction_keeps_previous_result() {
        let mut state = AppState::default();
        state.run_prediction(&predictor());
        let before = state.last_prediction.clone();

        state.apply_outcome(
            StudentRecord::default(),
            Err(PredictionError::Inference("model returned no usable probabilities".into())),
        );

        assert_eq!(state.last_prediction, before);
        assert_eq!(state.history.len(), 1);
        assert_eq!(
            state.status_message,
            Some(StatusMessage::Error(
                "Error: inference failed: model returned no usable probabilities".into()
            ))
        );
    }

    #[test]
    fn out_of_range_input_is_clamped_before_predicting() {
        let mut state = AppState::default();
        state.input.sem2_grade = f64::INFINITY;
        state.input.age_at_enrollment = 99;
        state.run_prediction(&predictor());

        let entry = &state.history[0];
        assert_eq!(entry.record.sem2_grade, 20.0);
        assert_eq!(entry.record.age_at_enrollment, 50);
    }

    #[test]
    fn export_reports_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.run_prediction(&predictor());

        let path = dir.path().join("out.csv");
        state.export_history_to(&path);
        assert!(path.exists());
        let msg = state.status_message.clone().unwrap();
        assert!(!msg.is_error());
        assert!(msg.text().starts_with("Exported 1"));

        state.export_history_to(&dir.path().join("missing/out.csv"));
        assert!(state.status_message.as_ref().unwrap().is_error());
    }

    #[test]
    fn reset_and_clear() {
        let mut state = AppState::default();
        state.input.age_at_enrollment = 30;
        state.run_prediction(&predictor());
        state.reset_input();
        state.clear_history();
        assert_eq!(state.input, StudentRecord::default());
        assert!(state.history.is_empty());
        assert!(state.last_prediction.is_some());
    }
}
