//! Localization bundle loading
//!
//! The manifest lists `{code, file}` pairs. Every document is fetched
//! concurrently and awaited as a group; a failing document is logged and
//! skipped without affecting its siblings. When nothing loads, a single
//! fallback document is tried.

use crate::config::LocalizationConfig;
use crate::document::TranslationDocument;
use crate::error::LetterError;
use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Where translation files come from (HTTP in the browser, disk in the CLI)
#[async_trait(?Send)]
pub trait BundleSource {
    /// Fetch and parse the JSON document at `path`
    async fn fetch_json(&self, path: &str) -> Result<Value, LetterError>;
}

/// One language listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub code: String,
    pub file: String,
}

impl ManifestEntry {
    pub fn new(code: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            file: file.into(),
        }
    }
}

/// Ordered language list. Order drives the selector and default choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub languages: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read the `languages` array. A missing or malformed array is an empty
    /// manifest; entries without a non-empty string `code` and `file` are skipped.
    pub fn from_value(value: &Value) -> Self {
        let languages = value
            .get("languages")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Self::entry).collect())
            .unwrap_or_default();
        Self { languages }
    }

    /// Like [`Manifest::from_value`], but a missing `languages` array is an error
    pub fn parse(value: &Value) -> Result<Self, LetterError> {
        if !value.get("languages").is_some_and(Value::is_array) {
            return Err(LetterError::Manifest(
                "expected a \"languages\" array".to_string(),
            ));
        }
        Ok(Self::from_value(value))
    }

    fn entry(value: &Value) -> Option<ManifestEntry> {
        let code = value.get("code").and_then(Value::as_str)?;
        let file = value.get("file").and_then(Value::as_str)?;
        if code.is_empty() || file.is_empty() {
            return None;
        }
        Some(ManifestEntry::new(code, file))
    }
}

/// A document that could not be loaded
#[derive(Debug)]
pub struct LoadFailure {
    /// Language code, or `None` for the manifest itself
    pub code: Option<String>,
    pub error: LetterError,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "Failed to load translation for {}: {}", code, self.error),
            None => write!(f, "Failed to load language manifest: {}", self.error),
        }
    }
}

/// Language shown in the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

/// Result of a bundle load: the documents that loaded plus what failed
#[derive(Debug, Default)]
pub struct LoadedBundles {
    entries: Vec<ManifestEntry>,
    documents: BTreeMap<String, Arc<TranslationDocument>>,
    failures: Vec<LoadFailure>,
}

impl LoadedBundles {
    /// Build directly from parsed documents, in manifest order
    pub fn from_documents(
        documents: impl IntoIterator<Item = (ManifestEntry, TranslationDocument)>,
    ) -> Self {
        let mut bundles = Self::default();
        for (entry, document) in documents {
            bundles
                .documents
                .insert(entry.code.clone(), Arc::new(document));
            bundles.entries.push(entry);
        }
        bundles
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.documents.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&Arc<TranslationDocument>> {
        self.documents.get(code)
    }

    /// Codes of every loaded document
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// First manifest entry whose document loaded, else any loaded document
    pub fn default_code(&self) -> Option<&str> {
        self.entries
            .iter()
            .map(|entry| entry.code.as_str())
            .find(|code| self.contains(code))
            .or_else(|| self.codes().next())
    }

    /// Selector options in manifest order, loaded languages only
    pub fn language_options(&self) -> Vec<LanguageOption> {
        let ordered: Vec<&str> = if self.entries.is_empty() {
            self.codes().collect()
        } else {
            self.entries.iter().map(|entry| entry.code.as_str()).collect()
        };

        let mut seen = Vec::new();
        ordered
            .into_iter()
            .filter_map(|code| {
                if seen.contains(&code) {
                    return None;
                }
                seen.push(code);
                let document = self.get(code)?;
                let label = document
                    .language_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(code);
                Some(LanguageOption {
                    code: code.to_string(),
                    label: label.to_string(),
                })
            })
            .collect()
    }
}

/// Loads the manifest and every listed document through a [`BundleSource`]
pub struct BundleLoader<'a, S: BundleSource + ?Sized> {
    source: &'a S,
    config: &'a LocalizationConfig,
}

impl<'a, S: BundleSource + ?Sized> BundleLoader<'a, S> {
    pub fn new(source: &'a S, config: &'a LocalizationConfig) -> Self {
        Self { source, config }
    }

    /// Load every language. Never fails: problems are recorded as
    /// [`LoadFailure`]s and the result may be empty.
    pub async fn load(&self) -> LoadedBundles {
        let mut bundles = LoadedBundles::default();

        let manifest = match self
            .source
            .fetch_json(&self.config.manifest_path())
            .await
            .and_then(|value| Manifest::parse(&value))
        {
            Ok(manifest) => manifest,
            Err(e) => {
                error!("Failed to load language manifest: {}", e);
                bundles.failures.push(LoadFailure {
                    code: None,
                    error: e,
                });
                Manifest::default()
            }
        };

        let fetches = manifest
            .languages
            .iter()
            .map(|entry| self.fetch_document(entry));
        let results = join_all(fetches).await;

        for (entry, result) in manifest.languages.iter().zip(results) {
            match result {
                Ok(document) => {
                    bundles
                        .documents
                        .insert(entry.code.clone(), Arc::new(document));
                }
                Err(e) => {
                    error!("Failed to load translation for {}: {}", entry.code, e);
                    bundles.failures.push(LoadFailure {
                        code: Some(entry.code.clone()),
                        error: e,
                    });
                }
            }
        }
        bundles.entries = manifest.languages;

        if bundles.is_empty() {
            self.load_fallback(&mut bundles).await;
        }

        debug!(
            "Loaded {} translation(s), {} failure(s)",
            bundles.documents.len(),
            bundles.failures.len()
        );
        bundles
    }

    async fn fetch_document(&self, entry: &ManifestEntry) -> Result<TranslationDocument, LetterError> {
        let value = self.source.fetch_json(&self.config.path_for(&entry.file)).await?;
        Ok(TranslationDocument::new(value))
    }

    async fn load_fallback(&self, bundles: &mut LoadedBundles) {
        let entry = ManifestEntry::new(&self.config.fallback_code, &self.config.fallback_file);
        match self.fetch_document(&entry).await {
            Ok(document) => {
                bundles
                    .documents
                    .insert(entry.code.clone(), Arc::new(document));
                bundles.entries = vec![entry];
            }
            Err(e) => {
                error!("Unable to load fallback translation: {}", e);
                bundles.failures.push(LoadFailure {
                    code: Some(entry.code),
                    error: e,
                });
            }
        }
    }
}

/// In-memory source keyed by path, for tests and embedded bundles
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

#[async_trait(?Send)]
impl BundleSource for MemorySource {
    async fn fetch_json(&self, path: &str) -> Result<Value, LetterError> {
        let contents = self
            .files
            .get(path)
            .ok_or_else(|| LetterError::fetch(path, "404 Not Found"))?;
        Ok(serde_json::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::block_on;

    const MANIFEST: &str = r#"{ "languages": [
        { "code": "nb", "file": "nb.json" },
        { "code": "en", "file": "en.json" }
    ] }"#;

    fn load(source: &MemorySource) -> LoadedBundles {
        let config = LocalizationConfig::default();
        block_on(BundleLoader::new(source, &config).load())
    }

    #[test]
    fn test_manifest_skips_incomplete_entries() {
        let manifest = Manifest::from_value(&json!({
            "languages": [
                { "code": "nb", "file": "nb.json" },
                { "code": "", "file": "x.json" },
                { "code": "de" },
                "sv",
                null
            ]
        }));
        assert_eq!(manifest.languages, vec![ManifestEntry::new("nb", "nb.json")]);
    }

    #[test]
    fn test_malformed_manifest_is_empty() {
        assert!(Manifest::from_value(&json!({ "languages": "nb" })).languages.is_empty());
        assert!(Manifest::from_value(&json!([])).languages.is_empty());
        assert!(matches!(
            Manifest::parse(&json!({ "languages": "nb" })),
            Err(LetterError::Manifest(_))
        ));
        assert_eq!(Manifest::parse(&json!({ "languages": [] })).unwrap(), Manifest::default());
    }

    #[test]
    fn test_manifest_without_languages_is_recorded() {
        let source = MemorySource::new()
            .with_file("translations/languages.json", r#"{ "langs": [] }"#)
            .with_file("translations/en.json", r#"{ "languageName": "English" }"#);

        let bundles = load(&source);
        assert_eq!(bundles.default_code(), Some("en"));
        assert!(matches!(bundles.failures()[0].error, LetterError::Manifest(_)));
    }

    #[test]
    fn test_loads_all_languages_in_manifest_order() {
        let source = MemorySource::new()
            .with_file("translations/languages.json", MANIFEST)
            .with_file("translations/nb.json", r#"{ "languageName": "Norsk" }"#)
            .with_file("translations/en.json", r#"{ "languageName": "English" }"#);

        let bundles = load(&source);
        assert_eq!(bundles.default_code(), Some("nb"));
        assert!(bundles.failures().is_empty());
        let labels: Vec<_> = bundles
            .language_options()
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(labels, vec!["Norsk", "English"]);
    }

    #[test]
    fn test_one_broken_document_does_not_block_others() {
        let source = MemorySource::new()
            .with_file("translations/languages.json", MANIFEST)
            .with_file("translations/nb.json", "{ not json")
            .with_file("translations/en.json", r#"{ "languageName": "English" }"#);

        let bundles = load(&source);
        assert!(!bundles.contains("nb"));
        assert!(bundles.contains("en"));
        assert_eq!(bundles.default_code(), Some("en"));
        assert_eq!(bundles.failures().len(), 1);
        assert_eq!(bundles.failures()[0].code.as_deref(), Some("nb"));
        assert_eq!(bundles.language_options().len(), 1);
    }

    #[test]
    fn test_falls_back_when_nothing_loads() {
        let source = MemorySource::new()
            .with_file(
                "translations/languages.json",
                r#"{ "languages": [{ "code": "nb", "file": "missing.json" }] }"#,
            )
            .with_file("translations/en.json", r#"{ "languageName": "English" }"#);

        let bundles = load(&source);
        assert_eq!(bundles.default_code(), Some("en"));
        assert_eq!(bundles.entries(), &[ManifestEntry::new("en", "en.json")]);
    }

    #[test]
    fn test_missing_manifest_still_tries_fallback() {
        let source = MemorySource::new()
            .with_file("translations/en.json", r#"{ "languageName": "English" }"#);

        let bundles = load(&source);
        assert_eq!(bundles.default_code(), Some("en"));
        assert!(bundles.failures()[0].code.is_none());
    }

    #[test]
    fn test_total_failure_is_empty() {
        let bundles = load(&MemorySource::new());
        assert!(bundles.is_empty());
        assert_eq!(bundles.default_code(), None);
        assert!(bundles.language_options().is_empty());
        assert_eq!(bundles.failures().len(), 2);
    }

    #[test]
    fn test_label_falls_back_to_code() {
        let bundles = LoadedBundles::from_documents([(
            ManifestEntry::new("de", "de.json"),
            TranslationDocument::new(json!({})),
        )]);
        assert_eq!(
            bundles.language_options(),
            vec![LanguageOption {
                code: "de".to_string(),
                label: "de".to_string()
            }]
        );
    }
}
