use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ModelError, PredictionError};

// ---------------------------------------------------------------------------
// FeatureSchema – the classifier's expected input columns
// ---------------------------------------------------------------------------

/// One expected input column and the value used when the record lacks it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub default: f64,
}

/// Ordered `(name, default)` list, validated once when the model is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    /// Build the schema from the artifact's declared feature names.
    ///
    /// Columns without an entry in `defaults` are filled with `0.0`.
    pub fn new(names: &[String], defaults: &BTreeMap<String, f64>) -> Result<Self, ModelError> {
        if names.is_empty() {
            return Err(ModelError::Invalid("feature list is empty".into()));
        }

        let mut seen = BTreeSet::new();
        for name in names {
            if name.trim().is_empty() {
                return Err(ModelError::Invalid("feature name is empty".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ModelError::Invalid(format!("duplicate feature '{name}'")));
            }
        }

        for (name, value) in defaults {
            if !seen.contains(name.as_str()) {
                return Err(ModelError::Invalid(format!(
                    "default given for unknown feature '{name}'"
                )));
            }
            if !value.is_finite() {
                return Err(ModelError::Invalid(format!(
                    "default for feature '{name}' is not finite"
                )));
            }
        }

        let columns = names
            .iter()
            .map(|name| FeatureColumn {
                name: name.clone(),
                default: defaults.get(name).copied().unwrap_or(0.0),
            })
            .collect();

        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Reindex a row into schema order.
    ///
    /// Missing columns take their default; extra columns are dropped.
    pub fn align(&self, row: &[(&str, f64)]) -> Result<AlignedRow, PredictionError> {
        for (name, value) in row {
            if !value.is_finite() {
                return Err(PredictionError::Alignment(format!(
                    "column '{name}' has non-finite value {value}"
                )));
            }
        }

        let dropped: Vec<&str> = row
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| !self.columns.iter().any(|c| c.name == *name))
            .collect();
        if !dropped.is_empty() {
            log::debug!("Columns not used by the model: {dropped:?}");
        }

        let values = self
            .columns
            .iter()
            .map(|col| {
                // Last occurrence wins, like assigning a DataFrame column twice.
                row.iter()
                    .rev()
                    .find(|(name, _)| *name == col.name)
                    .map(|(_, v)| *v)
                    .unwrap_or(col.default)
            })
            .collect();

        Ok(AlignedRow {
            names: self.columns.iter().map(|c| c.name.clone()).collect(),
            values,
        })
    }
}

// ---------------------------------------------------------------------------
// AlignedRow – model-ready input
// ---------------------------------------------------------------------------

/// A single row whose columns exactly match a [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl AlignedRow {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}
