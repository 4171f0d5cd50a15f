//! Command-line letter renderer
//!
//! Loads the same translation files the browser front end uses, from disk,
//! and prints either letter for a form given as JSON.

pub mod commands;
pub mod config;
pub mod fs_source;

pub use commands::{language_lines, render_letter, LetterKind};
pub use config::load_config;
pub use fs_source::FsBundleSource;
