//! Config file loading

use anyhow::{Context, Result};
use letter_core::LocalizationConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read `path` as TOML when given, else the defaults. `translations`
/// overrides `base_path`.
pub fn load_config(path: Option<&Path>, translations: Option<PathBuf>) -> Result<LocalizationConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => LocalizationConfig::default(),
    };

    if let Some(dir) = translations {
        config.base_path = dir.to_string_lossy().into_owned();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, LocalizationConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_locale = \"nb-NO\"\nfallback_file = \"nb.json\"").unwrap();

        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.default_locale, "nb-NO");
        assert_eq!(config.fallback_file, "nb.json");
        assert_eq!(config.base_path, "translations");
    }

    #[test]
    fn test_translations_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_path = \"from-file\"").unwrap();

        let config = load_config(Some(file.path()), Some(PathBuf::from("from-flag"))).unwrap();
        assert_eq!(config.base_path, "from-flag");
    }

    #[test]
    fn test_unreadable_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml")), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_path = [").unwrap();
        assert!(load_config(Some(file.path()), None).is_err());
    }
}
