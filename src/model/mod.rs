/// Model layer: artifact parsing, estimators, and the predictor context.
///
/// ```text
///  student_status_model.json
///        │  read_artifact
///        ▼
///   ModelArtifact ──validate──▶ Predictor { schema, estimator, labels }
///                                   │ predict(record)
///                                   ▼
///                  Prediction { label, class_index, probabilities }
/// ```

pub mod artifact;
pub mod estimator;
pub mod label;
pub mod predictor;
