//! Letter templating core
//!
//! Renders GDPR data-subject requests and right-of-withdrawal notices from
//! form fields and a per-language translation document.
//!
//! ## Pipeline
//!
//! - [`bundle`] loads the language manifest and every translation document
//! - [`controller::LetterController`] owns the active language and both forms
//! - [`render`] turns `(form, language)` into plain text
//! - [`binder`] describes how the active document maps onto tagged UI elements
//!
//! Nothing here touches the DOM or the filesystem; front ends supply a
//! [`bundle::BundleSource`] and write the returned text wherever it belongs.

pub mod binder;
pub mod bundle;
pub mod config;
pub mod context;
pub mod controller;
pub mod document;
pub mod error;
pub mod locale;
pub mod render;
pub mod state;
pub mod template;

pub use bundle::{BundleLoader, BundleSource, LanguageOption, LoadedBundles, MemorySource};
pub use config::LocalizationConfig;
pub use context::LanguageContext;
pub use controller::{LetterController, Refresh};
pub use document::TranslationDocument;
pub use error::LetterError;
pub use state::{AgreementForm, GdprForm};
