use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds surfaced to the UI
// ---------------------------------------------------------------------------

/// Coarse classification of a failure, used by the UI to pick a message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ModelUnavailable,
    CorruptModel,
    Alignment,
    Inference,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::ModelUnavailable => "model unavailable",
            ErrorKind::CorruptModel => "corrupt model",
            ErrorKind::Alignment => "feature alignment",
            ErrorKind::Inference => "inference",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// Failure to acquire the classifier artifact at startup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::NotFound(_) | ModelError::Io { .. } => ErrorKind::ModelUnavailable,
            ModelError::Corrupt { .. } | ModelError::Invalid(_) => ErrorKind::CorruptModel,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-request errors
// ---------------------------------------------------------------------------

/// Failure of a single prediction request. Never fatal to the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("feature alignment failed: {0}")]
    Alignment(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictionError::Alignment(_) => ErrorKind::Alignment,
            PredictionError::Inference(_) => ErrorKind::Inference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(
            ModelError::NotFound(PathBuf::from("m.json")).kind(),
            ErrorKind::ModelUnavailable
        );
        assert_eq!(
            ModelError::Invalid("empty".into()).kind(),
            ErrorKind::CorruptModel
        );
        assert_eq!(
            PredictionError::Inference("boom".into()).kind(),
            ErrorKind::Inference
        );
    }

    #[test]
    fn not_found_message_names_path() {
        let err = ModelError::NotFound(PathBuf::from("model/x.json"));
        assert!(err.to_string().contains("model/x.json"));
    }
}
