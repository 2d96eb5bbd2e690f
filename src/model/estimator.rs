use serde::{Deserialize, Serialize};

use crate::error::{ModelError, PredictionError};

/// Marker used in `children_left` / `children_right` for leaf nodes.
pub const TREE_LEAF: i64 = -1;

// ---------------------------------------------------------------------------
// Decision tree in flat array form
// ---------------------------------------------------------------------------

/// A fitted decision tree stored as parallel per-node arrays.
///
/// ```text
/// node i:  x[feature[i]] <= threshold[i]  →  children_left[i]
///          otherwise                      →  children_right[i]
/// leaf:    children_left[i] == -1, value[i] = per-class weights
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl Tree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    /// Structural checks so that [`Tree::leaf_proba`] always terminates.
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!("tree arrays disagree on node count {n}"));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                let weights = &self.value[node];
                if weights.len() != n_classes {
                    return Err(format!(
                        "leaf {node} has {} class weights, expected {n_classes}",
                        weights.len()
                    ));
                }
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!("leaf {node} has a negative or non-finite weight"));
                }
                if weights.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {node} has zero total weight"));
                }
                continue;
            }

            // Children must point forward, which rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} has out-of-order child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!(
                    "node {node} splits on feature {feature}, model has {n_features}"
                ));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has NaN threshold"));
            }
        }
        Ok(())
    }

    /// Normalized class weights of the leaf reached by `x`.
    fn leaf_proba(&self, x: &[f64]) -> Result<Vec<f64>, PredictionError> {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            let value = x.get(feature).copied().ok_or_else(|| {
                PredictionError::Inference(format!("row has no feature at index {feature}"))
            })?;
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let weights = &self.value[node];
        let total: f64 = weights.iter().sum();
        Ok(weights.iter().map(|w| w / total).collect())
    }
}

// ---------------------------------------------------------------------------
// Estimator – the fitted model inside the artifact
// ---------------------------------------------------------------------------

/// Supported fitted models, tagged by `kind` in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    DecisionTree {
        tree: Tree,
    },
    RandomForest {
        trees: Vec<Tree>,
    },
    LogisticRegression {
        /// One row per class (or a single row for a binary model).
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
}

impl Estimator {
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::DecisionTree { .. } => "decision tree",
            Estimator::RandomForest { .. } => "random forest",
            Estimator::LogisticRegression { .. } => "logistic regression",
        }
    }

    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        match self {
            Estimator::DecisionTree { tree } => tree
                .validate(n_features, n_classes)
                .map_err(ModelError::Invalid),
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ModelError::Invalid("random forest has no trees".into()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(n_features, n_classes)
                        .map_err(|e| ModelError::Invalid(format!("tree {i}: {e}")))?;
                }
                Ok(())
            }
            Estimator::LogisticRegression { coef, intercept } => {
                let binary = n_classes == 2 && coef.len() == 1;
                if !binary && coef.len() != n_classes {
                    return Err(ModelError::Invalid(format!(
                        "logistic regression has {} coefficient rows for {n_classes} classes",
                        coef.len()
                    )));
                }
                if intercept.len() != coef.len() {
                    return Err(ModelError::Invalid(format!(
                        "logistic regression has {} intercepts for {} coefficient rows",
                        intercept.len(),
                        coef.len()
                    )));
                }
                for (i, row) in coef.iter().enumerate() {
                    if row.len() != n_features {
                        return Err(ModelError::Invalid(format!(
                            "coefficient row {i} has {} entries, model has {n_features} features",
                            row.len()
                        )));
                    }
                }
                if coef.iter().flatten().chain(intercept).any(|v| !v.is_finite()) {
                    return Err(ModelError::Invalid(
                        "logistic regression has non-finite parameters".into(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Class probabilities for one aligned row, in artifact class order.
    ///
    /// Only valid after [`Estimator::validate`] has accepted the model.
    pub(crate) fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, PredictionError> {
        match self {
            Estimator::DecisionTree { tree } => tree.leaf_proba(x),
            Estimator::RandomForest { trees } => {
                let mut sum: Vec<f64> = Vec::new();
                for tree in trees {
                    let proba = tree.leaf_proba(x)?;
                    if sum.is_empty() {
                        sum = proba;
                    } else {
                        sum.iter_mut().zip(proba).for_each(|(s, p)| *s += p);
                    }
                }
                let n = trees.len() as f64;
                Ok(sum.into_iter().map(|s| s / n).collect())
            }
            Estimator::LogisticRegression { coef, intercept } => {
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept)
                    .map(|(row, b)| {
                        if row.len() != x.len() {
                            return Err(PredictionError::Inference(format!(
                                "row has {} features, coefficients expect {}",
                                x.len(),
                                row.len()
                            )));
                        }
                        Ok(row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
                    })
                    .collect::<Result<_, _>>()?;

                if scores.len() == 1 {
                    let p = 1.0 / (1.0 + (-scores[0]).exp());
                    Ok(vec![1.0 - p, p])
                } else {
                    Ok(softmax(&scores))
                }
            }
        }
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the largest probability; the first maximum wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Split on feature 0 at 10.0: low → class 0, high → class 1.
    fn stump() -> Tree {
        Tree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![10.0, -2.0, -2.0],
            value: vec![vec![5.0, 5.0], vec![4.0, 1.0], vec![0.0, 3.0]],
        }
    }

    #[test]
    fn tree_goes_left_on_equal_threshold() {
        let est = Estimator::DecisionTree { tree: stump() };
        est.validate(1, 2).unwrap();
        assert_eq!(est.predict_proba(&[10.0]).unwrap(), vec![0.8, 0.2]);
        assert_eq!(est.predict_proba(&[10.5]).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn forest_averages_tree_probabilities() {
        let mut other = stump();
        other.threshold[0] = 20.0;
        let est = Estimator::RandomForest {
            trees: vec![stump(), other],
        };
        est.validate(1, 2).unwrap();
        let proba = est.predict_proba(&[15.0]).unwrap();
        assert!((proba[0] - 0.4).abs() < 1e-12);
        assert!((proba[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn validation_rejects_backward_child() {
        let mut tree = stump();
        tree.children_right[0] = 0;
        let err = Estimator::DecisionTree { tree }.validate(1, 2).unwrap_err();
        assert!(err.to_string().contains("out-of-order child"));
    }

    #[test]
    fn validation_rejects_self_loop() {
        let mut tree = stump();
        tree.children_left[0] = 0;
        tree.children_right[0] = 0;
        let err = Estimator::RandomForest { trees: vec![stump(), tree] }
            .validate(1, 2)
            .unwrap_err();
        assert!(err.to_string().contains("tree 1"));
    }

    #[test]
    fn validation_rejects_unknown_feature_and_bad_leaf() {
        let mut tree = stump();
        tree.feature[0] = 3;
        assert!(Estimator::DecisionTree { tree }.validate(1, 2).is_err());

        let mut tree = stump();
        tree.value[1] = vec![0.0, 0.0];
        assert!(Estimator::DecisionTree { tree }.validate(1, 2).is_err());

        assert!(Estimator::RandomForest { trees: vec![] }.validate(1, 2).is_err());
    }

    #[test]
    fn multinomial_logistic_is_softmax() {
        let est = Estimator::LogisticRegression {
            coef: vec![vec![0.0], vec![0.0], vec![1.0]],
            intercept: vec![0.0, 0.0, 0.0],
        };
        est.validate(1, 3).unwrap();
        let proba = est.predict_proba(&[0.0]).unwrap();
        for p in &proba {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
        let proba = est.predict_proba(&[5.0]).unwrap();
        assert_eq!(argmax(&proba), Some(2));
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn binary_logistic_uses_sigmoid() {
        let est = Estimator::LogisticRegression {
            coef: vec![vec![2.0]],
            intercept: vec![-4.0],
        };
        est.validate(1, 2).unwrap();
        assert_eq!(est.predict_proba(&[2.0]).unwrap(), vec![0.5, 0.5]);
        assert!(est.validate(1, 3).is_err());
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), Some(0));
        assert_eq!(argmax(&[0.1, f64::NAN, 0.3]), Some(2));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn estimator_kind_tag_round_trips_through_json() {
        let json = r#"{"kind":"logistic_regression","coef":[[1.0]],"intercept":[0.0]}"#;
        let est: Estimator = serde_json::from_str(json).unwrap();
        assert_eq!(est.name(), "logistic regression");
    }
}
