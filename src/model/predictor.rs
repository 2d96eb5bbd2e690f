use std::path::{Path, PathBuf};

use super::artifact::{read_artifact, ModelArtifact};
use super::estimator::{argmax, Estimator};
use super::label::{LabelMap, StatusLabel};
use crate::data::record::StudentRecord;
use crate::data::schema::{AlignedRow, FeatureSchema};
use crate::error::{ModelError, PredictionError};

// ---------------------------------------------------------------------------
// Prediction – the result of one request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: StatusLabel,
    /// Raw class code returned by the estimator.
    pub class_index: i64,
    /// `(label, probability)` for every class, in artifact order.
    pub probabilities: Vec<(StatusLabel, f64)>,
    /// The row the estimator actually saw.
    pub aligned: AlignedRow,
}

// ---------------------------------------------------------------------------
// Predictor – loaded model context
// ---------------------------------------------------------------------------

/// Read-only model context, built once at startup and passed to every request.
#[derive(Debug)]
pub struct Predictor {
    source: PathBuf,
    schema: FeatureSchema,
    classes: Vec<i64>,
    labels: LabelMap,
    estimator: Estimator,
}

impl Predictor {
    /// Load and validate the artifact at `path`. No retries.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        log::info!("Loading model artifact from {}", path.display());
        let artifact = read_artifact(path)?;
        let predictor = Self::from_artifact(artifact, path.to_path_buf())?;
        log::info!(
            "Loaded {} with {} features and classes {:?}",
            predictor.estimator.name(),
            predictor.schema.len(),
            predictor.classes
        );
        Ok(predictor)
    }

    /// Validate an in-memory artifact.
    pub fn from_artifact(artifact: ModelArtifact, source: PathBuf) -> Result<Self, ModelError> {
        artifact.validate_classes()?;
        let schema = FeatureSchema::new(&artifact.feature_names_in, &artifact.feature_defaults)?;
        artifact
            .estimator
            .validate(schema.len(), artifact.classes.len())?;
        let labels = LabelMap::new(&artifact.classes, artifact.class_labels.as_deref());

        Ok(Self {
            source,
            schema,
            classes: artifact.classes,
            labels,
            estimator: artifact.estimator,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn estimator_name(&self) -> &'static str {
        self.estimator.name()
    }

    /// Align, infer, and label one record.
    pub fn predict(&self, record: &StudentRecord) -> Result<Prediction, PredictionError> {
        let aligned = self.schema.align(&record.columns())?;
        let proba = self.estimator.predict_proba(&aligned.values)?;

        if proba.len() != self.classes.len() {
            return Err(PredictionError::Inference(format!(
                "model returned {} probabilities for {} classes",
                proba.len(),
                self.classes.len()
            )));
        }
        let best = argmax(&proba).ok_or_else(|| {
            PredictionError::Inference("model returned no usable probabilities".into())
        })?;

        let class_index = self.classes[best];
        let label = self.labels.label_for(class_index);
        let probabilities = self
            .classes
            .iter()
            .zip(&proba)
            .map(|(&code, &p)| (self.labels.label_for(code), p))
            .collect();

        Ok(Prediction {
            label,
            class_index,
            probabilities,
            aligned,
        })
    }
}

impl Drop for Predictor {
    fn drop(&mut self) {
        log::debug!("Releasing model loaded from {}", self.source.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::RECORD_COLUMNS;
    use crate::model::estimator::Tree;

    const BUNDLED: &str = include_str!("../../model/student_status_model.json");

    fn bundled() -> Predictor {
        let artifact: ModelArtifact = serde_json::from_str(BUNDLED).unwrap();
        Predictor::from_artifact(artifact, PathBuf::from("bundled")).unwrap()
    }

    fn example_record() -> StudentRecord {
        StudentRecord {
            sem2_grade: 15.0,
            sem2_approved: 6,
            sem1_grade: 14.0,
            tuition_up_to_date: true,
            sem1_approved: 5,
            age_at_enrollment: 19,
        }
    }

    /// Single leaf that always answers `code` among `classes`.
    fn constant_model(classes: Vec<i64>, code: i64) -> Predictor {
        let value = classes
            .iter()
            .map(|&c| if c == code { 1.0 } else { 0.0 })
            .collect();
        let artifact = ModelArtifact {
            feature_names_in: RECORD_COLUMNS.iter().map(|s| s.to_string()).collect(),
            feature_defaults: Default::default(),
            classes,
            class_labels: None,
            estimator: Estimator::DecisionTree {
                tree: Tree {
                    children_left: vec![-1],
                    children_right: vec![-1],
                    feature: vec![-2],
                    threshold: vec![-2.0],
                    value: vec![value],
                },
            },
        };
        Predictor::from_artifact(artifact, PathBuf::from("constant")).unwrap()
    }

    #[test]
    fn bundled_model_predicts_graduate_for_example() {
        let predictor = bundled();
        let prediction = predictor.predict(&example_record()).unwrap();
        assert_eq!(prediction.label, StatusLabel::Graduate);
        assert_eq!(prediction.class_index, 2);
        assert_eq!(prediction.aligned.names, RECORD_COLUMNS.to_vec());
        assert_eq!(prediction.aligned.values, vec![15.0, 6.0, 14.0, 1.0, 5.0, 19.0]);
    }

    #[test]
    fn bundled_model_predicts_dropout_for_empty_form() {
        let prediction = bundled().predict(&StudentRecord::default()).unwrap();
        assert_eq!(prediction.label, StatusLabel::Dropout);
        let total: f64 = prediction.probabilities.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prediction_is_deterministic() {
        let predictor = bundled();
        let first = predictor.predict(&example_record()).unwrap();
        let second = predictor.predict(&example_record()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn class_two_renders_graduate() {
        let prediction = constant_model(vec![0, 1, 2], 2)
            .predict(&example_record())
            .unwrap();
        assert_eq!(prediction.label.to_string(), "Graduate");
    }

    #[test]
    fn unrecognized_class_is_unknown() {
        let prediction = constant_model(vec![0, 1, 7], 7)
            .predict(&StudentRecord::default())
            .unwrap();
        assert_eq!(prediction.label, StatusLabel::Unknown(7));
        assert_eq!(prediction.class_index, 7);
    }

    #[test]
    fn non_finite_input_surfaces_alignment_error() {
        let mut record = example_record();
        record.sem1_grade = f64::INFINITY;
        let err = bundled().predict(&record).unwrap_err();
        assert!(matches!(err, PredictionError::Alignment(_)));
    }

    #[test]
    fn missing_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = Predictor::load(&dir.path().join("student_status_model.json")).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn load_from_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, BUNDLED).unwrap();
        let predictor = Predictor::load(&path).unwrap();
        assert_eq!(predictor.source(), path.as_path());
        assert_eq!(predictor.estimator_name(), "random forest");
    }

    #[test]
    fn structurally_invalid_artifact_is_rejected() {
        let mut artifact: ModelArtifact = serde_json::from_str(BUNDLED).unwrap();
        artifact.feature_names_in.pop();
        let err = Predictor::from_artifact(artifact, PathBuf::from("bad")).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }
}
