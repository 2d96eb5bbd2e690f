use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// StatusLabel – what the user sees
// ---------------------------------------------------------------------------

/// Predicted academic outcome. `Unknown` carries the unmapped class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusLabel {
    Dropout,
    Enrolled,
    Graduate,
    Unknown(i64),
}

impl StatusLabel {
    /// Positional encoding of the training target: 0, 1, 2.
    pub fn from_class_index(code: i64) -> Self {
        match code {
            0 => StatusLabel::Dropout,
            1 => StatusLabel::Enrolled,
            2 => StatusLabel::Graduate,
            other => StatusLabel::Unknown(other),
        }
    }

    /// Parse a label name from artifact metadata (case-insensitive).
    pub fn from_name(name: &str, code: i64) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dropout" => StatusLabel::Dropout,
            "enrolled" => StatusLabel::Enrolled,
            "graduate" => StatusLabel::Graduate,
            _ => StatusLabel::Unknown(code),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StatusLabel::Unknown(_))
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::Dropout => write!(f, "Dropout"),
            StatusLabel::Enrolled => write!(f, "Enrolled"),
            StatusLabel::Graduate => write!(f, "Graduate"),
            StatusLabel::Unknown(code) => write!(f, "Unknown (class {code})"),
        }
    }
}

// ---------------------------------------------------------------------------
// LabelMap – class code → label, fixed at load time
// ---------------------------------------------------------------------------

/// Maps the estimator's class codes to labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    by_code: BTreeMap<i64, StatusLabel>,
}

impl LabelMap {
    /// Build the map for `classes`.
    ///
    /// When the artifact names its classes, the names decide the label and any
    /// disagreement with the positional encoding is logged. Otherwise the
    /// positional encoding applies.
    pub fn new(classes: &[i64], names: Option<&[String]>) -> Self {
        let by_code = match names {
            Some(names) => classes
                .iter()
                .zip(names)
                .map(|(&code, name)| {
                    let named = StatusLabel::from_name(name, code);
                    let positional = StatusLabel::from_class_index(code);
                    if named != positional {
                        log::warn!(
                            "Artifact labels class {code} as '{name}', positional encoding says '{positional}'"
                        );
                    }
                    (code, named)
                })
                .collect(),
            None => classes
                .iter()
                .map(|&code| (code, StatusLabel::from_class_index(code)))
                .collect(),
        };
        Self { by_code }
    }

    /// Label for a class code; codes the model never declared stay `Unknown`.
    pub fn label_for(&self, code: i64) -> StatusLabel {
        self.by_code
            .get(&code)
            .copied()
            .unwrap_or(StatusLabel::Unknown(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_mapping() {
        assert_eq!(StatusLabel::from_class_index(0), StatusLabel::Dropout);
        assert_eq!(StatusLabel::from_class_index(1), StatusLabel::Enrolled);
        assert_eq!(StatusLabel::from_class_index(2), StatusLabel::Graduate);
        assert_eq!(StatusLabel::from_class_index(7), StatusLabel::Unknown(7));
        assert_eq!(StatusLabel::Graduate.to_string(), "Graduate");
    }

    #[test]
    fn unknown_code_is_sentinel() {
        let map = LabelMap::new(&[0, 1, 2], None);
        assert_eq!(map.label_for(2), StatusLabel::Graduate);
        assert_eq!(map.label_for(7), StatusLabel::Unknown(7));
        assert!(map.label_for(-1).is_unknown());
    }

    #[test]
    fn artifact_names_take_precedence() {
        let names: Vec<String> = ["Graduate", "Dropout", "Enrolled"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = LabelMap::new(&[0, 1, 2], Some(&names));
        assert_eq!(map.label_for(0), StatusLabel::Graduate);
        assert_eq!(map.label_for(1), StatusLabel::Dropout);

        let odd = vec!["Transferred".to_string()];
        let map = LabelMap::new(&[3], Some(&odd));
        assert_eq!(map.label_for(3), StatusLabel::Unknown(3));
    }
}
