use std::path::PathBuf;

/// Relative location of the bundled classifier artifact.
pub const DEFAULT_MODEL_PATH: &str = "model/student_status_model.json";

/// Environment variable that overrides [`DEFAULT_MODEL_PATH`].
pub const MODEL_PATH_ENV: &str = "STUDENT_STATUS_MODEL";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(MODEL_PATH_ENV).ok())
    }

    fn resolve(override_path: Option<String>) -> Self {
        let model_path = override_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
        Self { model_path }
    }
}
