//! Filesystem bundle source

use async_trait::async_trait;
use letter_core::{BundleSource, LetterError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads translation files relative to `root`
#[derive(Debug, Clone)]
pub struct FsBundleSource {
    root: PathBuf,
}

impl FsBundleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve against the current directory
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait(?Send)]
impl BundleSource for FsBundleSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, LetterError> {
        let full = self.root.join(path);
        let contents = tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| LetterError::fetch(full.display().to_string(), e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}
