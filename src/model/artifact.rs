use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::estimator::Estimator;
use crate::error::ModelError;

// ---------------------------------------------------------------------------
// On-disk artifact
// ---------------------------------------------------------------------------

/// Serialized classifier, as written by the training pipeline.
///
/// ```json
/// {
///   "feature_names_in": ["Curricular_units_2nd_sem_grade", ...],
///   "feature_defaults": { "Scholarship_holder": 0.0 },
///   "classes": [0, 1, 2],
///   "class_labels": ["Dropout", "Enrolled", "Graduate"],
///   "estimator": { "kind": "random_forest", "trees": [ ... ] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names_in: Vec<String>,
    #[serde(default)]
    pub feature_defaults: BTreeMap<String, f64>,
    pub classes: Vec<i64>,
    #[serde(default)]
    pub class_labels: Option<Vec<String>>,
    pub estimator: Estimator,
}

impl ModelArtifact {
    /// Checks that do not depend on the feature schema.
    pub fn validate_classes(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("class list is empty".into()));
        }
        let unique: BTreeSet<i64> = self.classes.iter().copied().collect();
        if unique.len() != self.classes.len() {
            return Err(ModelError::Invalid("class list has duplicates".into()));
        }
        if let Some(labels) = &self.class_labels {
            if labels.len() != self.classes.len() {
                return Err(ModelError::Invalid(format!(
                    "{} class labels for {} classes",
                    labels.len(),
                    self.classes.len()
                )));
            }
        }
        Ok(())
    }
}

/// Read and parse an artifact file. Structure is validated by the predictor.
pub fn read_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ModelError::NotFound(path.to_path_buf()),
        _ => ModelError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    // Bytes, not text: a binary file is a corrupt artifact, not an I/O failure.
    serde_json::from_slice(&bytes).map_err(|source| ModelError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
