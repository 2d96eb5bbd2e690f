/// Data layer: the form's record, the model's column schema, and history.
///
/// Architecture:
/// ```text
///   form widgets
///        │
///        ▼
///   ┌───────────────┐
///   │ StudentRecord │  six bounded fields → (column, value) row
///   └───────────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ FeatureSchema │  reorder, fill missing with default → AlignedRow
///   └───────────────┘
///        │
///        ▼
///     estimator
/// ```

pub mod history;
pub mod record;
pub mod schema;
