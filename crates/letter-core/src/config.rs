//! Localization configuration
//!
//! Every field has a default so a partial (or empty) config file is valid.

use crate::locale::DEFAULT_LOCALE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Directory or URL prefix holding the manifest and documents
    pub base_path: String,
    /// Manifest file name under `base_path`
    pub manifest_file: String,
    /// Language code registered for the fallback document
    pub fallback_code: String,
    /// Document tried when no manifest language loads
    pub fallback_file: String,
    /// Date locale used when a document declares none or an invalid one
    pub default_locale: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            base_path: "translations".to_string(),
            manifest_file: "languages.json".to_string(),
            fallback_code: "en".to_string(),
            fallback_file: "en.json".to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl LocalizationConfig {
    /// Location of a file under `base_path`
    pub fn path_for(&self, file: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        if base.is_empty() {
            file.to_string()
        } else {
            format!("{base}/{file}")
        }
    }

    pub fn manifest_path(&self) -> String {
        self.path_for(&self.manifest_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LocalizationConfig::default();
        assert_eq!(config.manifest_path(), "translations/languages.json");
        assert_eq!(config.path_for("nb.json"), "translations/nb.json");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: LocalizationConfig =
            serde_json::from_str(r#"{ "base_path": "/i18n/" }"#).unwrap();
        assert_eq!(config.path_for("en.json"), "/i18n/en.json");
        assert_eq!(config.fallback_code, "en");
        assert_eq!(config.default_locale, "en-GB");
    }

    #[test]
    fn test_empty_base_path() {
        let config = LocalizationConfig {
            base_path: String::new(),
            ..Default::default()
        };
        assert_eq!(config.manifest_path(), "languages.json");
    }
}
