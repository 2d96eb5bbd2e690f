use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

const FEATURES: [&str; 6] = [
    "Curricular_units_2nd_sem_grade",
    "Curricular_units_2nd_sem_approved",
    "Curricular_units_1st_sem_grade",
    "Tuition_fees_up_to_date",
    "Curricular_units_1st_sem_approved",
    "Age_at_enrollment",
];

/// Feature indices into [`FEATURES`].
const SEM2_GRADE: i64 = 0;
const SEM2_APPROVED: i64 = 1;
const SEM1_GRADE: i64 = 2;
const TUITION: i64 = 3;
const SEM1_APPROVED: i64 = 4;
const AGE: i64 = 5;

/// Class-weight rows, ordered Dropout, Enrolled, Graduate.
type Weights = [f64; 3];

/// Depth-2 tree: root split, then one split on each side, four leaves.
fn balanced_tree(
    root: (i64, f64),
    left: (i64, f64),
    right: (i64, f64),
    leaves: [Weights; 4],
    inner: [Weights; 3],
) -> Value {
    json!({
        "children_left": [1, 3, 5, -1, -1, -1, -1],
        "children_right": [2, 4, 6, -1, -1, -1, -1],
        "feature": [root.0, left.0, right.0, -2, -2, -2, -2],
        "threshold": [root.1, left.1, right.1, -2.0, -2.0, -2.0, -2.0],
        "value": [inner[0], inner[1], inner[2], leaves[0], leaves[1], leaves[2], leaves[3]],
    })
}

fn build_artifact() -> Value {
    let first = balanced_tree(
        (SEM2_APPROVED, 2.5),
        (TUITION, 0.5),
        (SEM2_GRADE, 11.5),
        [
            [0.9, 0.07, 0.03],
            [0.6, 0.25, 0.15],
            [0.2, 0.55, 0.25],
            [0.05, 0.15, 0.8],
        ],
        [[0.32, 0.18, 0.5], [0.78, 0.14, 0.08], [0.1, 0.2, 0.7]],
    );

    let second = balanced_tree(
        (SEM1_APPROVED, 3.5),
        (AGE, 24.5),
        (SEM1_GRADE, 12.0),
        [
            [0.55, 0.3, 0.15],
            [0.8, 0.12, 0.08],
            [0.15, 0.5, 0.35],
            [0.04, 0.2, 0.76],
        ],
        [[0.32, 0.18, 0.5], [0.66, 0.22, 0.12], [0.08, 0.3, 0.62]],
    );

    // Unpaid tuition is a leaf on its own.
    let third = json!({
        "children_left": [1, -1, 3, -1, -1],
        "children_right": [2, -1, 4, -1, -1],
        "feature": [TUITION, -2, SEM2_APPROVED, -2, -2],
        "threshold": [0.5, -2.0, 4.5, -2.0, -2.0],
        "value": [
            [0.32, 0.18, 0.5],
            [0.85, 0.1, 0.05],
            [0.2, 0.27, 0.53],
            [0.35, 0.4, 0.25],
            [0.06, 0.14, 0.8],
        ],
    });

    json!({
        "feature_names_in": FEATURES,
        "classes": [0, 1, 2],
        "class_labels": ["Dropout", "Enrolled", "Graduate"],
        "estimator": {
            "kind": "random_forest",
            "trees": [first, second, third],
        },
    })
}

fn main() -> Result<()> {
    let output_path = Path::new("model/student_status_model.json");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let artifact = build_artifact();
    let text = serde_json::to_string_pretty(&artifact).context("serializing artifact")?;
    std::fs::write(output_path, text)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!("Wrote random forest with 3 trees to {}", output_path.display());
    Ok(())
}
