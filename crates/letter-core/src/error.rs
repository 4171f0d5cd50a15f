use thiserror::Error;

#[derive(Error, Debug)]
pub enum LetterError {
    #[error("Failed to load {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    Manifest(String),
}

impl LetterError {
    /// Shorthand for a fetch failure on `path`
    pub fn fetch(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
