//! Loading translation fixtures from disk

use letter_core::{BundleLoader, LoadedBundles, LocalizationConfig};
use letters_cli::{language_lines, render_letter, FsBundleSource, LetterKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;

const MANIFEST: &str = include_str!("../../../translations/languages.json");
const EN: &str = include_str!("../../../translations/en.json");
const NB: &str = include_str!("../../../translations/nb.json");

fn write_translations(root: &Path, files: &[(&str, &str)]) {
    let dir = root.join("translations");
    fs::create_dir_all(&dir).unwrap();
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
}

async fn load(root: &Path) -> LoadedBundles {
    let source = FsBundleSource::new(root);
    let config = LocalizationConfig::default();
    BundleLoader::new(&source, &config).load().await
}

#[tokio::test]
async fn test_lists_shipped_languages() {
    let dir = tempfile::tempdir().unwrap();
    write_translations(
        dir.path(),
        &[("languages.json", MANIFEST), ("en.json", EN), ("nb.json", NB)],
    );

    let bundles = load(dir.path()).await;
    assert_eq!(
        language_lines(&bundles),
        vec!["nb\tNorsk bokmål", "en\tEnglish"]
    );
}

#[tokio::test]
async fn test_broken_document_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_translations(
        dir.path(),
        &[("languages.json", MANIFEST), ("en.json", EN), ("nb.json", "{")],
    );

    let bundles = load(dir.path()).await;
    assert_eq!(language_lines(&bundles), vec!["en\tEnglish"]);
    assert_eq!(bundles.failures().len(), 1);
}

#[tokio::test]
async fn test_fallback_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_translations(dir.path(), &[("en.json", EN)]);

    let bundles = load(dir.path()).await;
    assert_eq!(language_lines(&bundles), vec!["en\tEnglish"]);
}

#[tokio::test]
async fn test_renders_withdrawal_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_translations(
        dir.path(),
        &[("languages.json", MANIFEST), ("en.json", EN), ("nb.json", NB)],
    );
    let form = json!({
        "agreementType": "purchase",
        "companyName": "Acme Ltd",
        "agreementDate": "2024-01-15",
        "deliveryDate": "2024-01-20",
        "customerName": "Jane Doe",
        "todayDate": "2024-02-01"
    });

    let text = render_letter(
        load(dir.path()).await,
        LetterKind::Withdrawal,
        Some("en"),
        Some(&form),
        "en-GB",
    );
    let expected = "\
To Acme Ltd

Notice of withdrawal

I hereby give notice that I withdraw from my contract for the purchase of the goods ordered on 15/01/2024 and received on 20/01/2024.

01/02/2024
Jane Doe";
    assert_eq!(text, expected);
}

#[tokio::test]
async fn test_nothing_on_disk_renders_empty() {
    let dir = tempfile::tempdir().unwrap();
    let bundles = load(dir.path()).await;
    assert!(bundles.is_empty());
    assert_eq!(
        render_letter(bundles, LetterKind::Gdpr, None, None, "en-GB"),
        ""
    );
}
