//! Copy-button feedback
//!
//! Decides what a copy button shows after a copy attempt and for how long.
//! Kept free of DOM types so it runs on the host.

use letter_core::context::UiMessages;

pub const SUCCESS_RESET_MS: i32 = 2500;
pub const ERROR_RESET_MS: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Temporary button state after a copy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    pub label: String,
    pub disable: bool,
    pub reset_after_ms: i32,
}

impl CopyFeedback {
    pub fn for_outcome(outcome: CopyOutcome, messages: &UiMessages) -> Self {
        match outcome {
            CopyOutcome::Copied => Self {
                label: messages.copy_success.clone(),
                disable: true,
                reset_after_ms: SUCCESS_RESET_MS,
            },
            CopyOutcome::Failed => Self {
                label: messages.copy_error.clone(),
                disable: false,
                reset_after_ms: ERROR_RESET_MS,
            },
        }
    }
}

/// Label restored once feedback expires: the label cached by the last
/// binding pass, else the button's current text.
pub fn restore_label(cached: Option<String>, current: Option<String>) -> String {
    cached
        .filter(|label| !label.is_empty())
        .or(current)
        .unwrap_or_default()
}
