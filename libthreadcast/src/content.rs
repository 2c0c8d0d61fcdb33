//! The unit of post text shared by single and thread modes.

use serde::{Deserialize, Serialize};

/// Hard per-post character limit enforced before publishing.
pub const MAX_POST_CHARS: usize = 280;

/// Soft threshold above which the count is surfaced as a warning.
pub const WARN_THRESHOLD: usize = 270;

/// Length classification against the publishing thresholds.
///
/// `Ok` and `Warn` are presentation hints; `Invalid` blocks publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthClass {
    /// At or under the comfortable limit (<= 270 characters).
    Ok,
    /// Approaching the hard limit (271-280 characters).
    Warn,
    /// Over the hard limit (> 280 characters).
    Invalid,
}

/// A single piece of post text.
///
/// The character count is always derived from the text, never stored, so it
/// cannot drift from the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    text: String,
}

impl ContentItem {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item from existing text (e.g. a generation response).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Always succeeds.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Character count (Unicode scalar values, not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// True when the item exceeds the hard per-post limit.
    pub fn exceeds_limit(&self) -> bool {
        self.char_count() > MAX_POST_CHARS
    }

    /// Classify the current length. Pure function of the character count.
    pub fn classify(&self) -> LengthClass {
        let count = self.char_count();
        if count > MAX_POST_CHARS {
            LengthClass::Invalid
        } else if count > WARN_THRESHOLD {
            LengthClass::Warn
        } else {
            LengthClass::Ok
        }
    }
}
