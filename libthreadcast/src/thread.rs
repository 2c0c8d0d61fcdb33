//! Ordered thread draft with a bounded, resizable part count.

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::error::{Result, ThreadcastError};

/// Minimum number of parts in an interactively sized thread.
pub const MIN_THREAD_PARTS: usize = 2;

/// Maximum number of parts in an interactively sized thread.
pub const MAX_THREAD_PARTS: usize = 5;

/// Default part count for a fresh thread draft.
pub const DEFAULT_THREAD_PARTS: usize = 3;

/// An ordered, resizable collection of [`ContentItem`]s forming a thread
/// draft. Item order is the reply-chain order and is never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadBuffer {
    items: Vec<ContentItem>,
}

impl Default for ThreadBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_THREAD_PARTS)
    }
}

impl ThreadBuffer {
    /// Create a buffer of empty items, with `size` clamped to the bounds.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_THREAD_PARTS, MAX_THREAD_PARTS);
        Self {
            items: vec![ContentItem::new(); size],
        }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Resize to `new_size`, clamped to the bounds.
    ///
    /// Growing appends empty items; shrinking truncates from the tail.
    /// Slots below the new size are never touched. Out-of-range requests
    /// are clamped rather than rejected.
    pub fn resize(&mut self, new_size: usize) {
        let new_size = new_size.clamp(MIN_THREAD_PARTS, MAX_THREAD_PARTS);
        self.items.resize_with(new_size, ContentItem::new);
    }

    /// Replace the text of the item at `index`.
    ///
    /// Fails loudly on an out-of-range index; callers derive their bounds
    /// from [`size`](Self::size) and should never issue one.
    pub fn set_item(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let size = self.items.len();
        match self.items.get_mut(index) {
            Some(item) => {
                item.set_text(text);
                Ok(())
            }
            None => Err(ThreadcastError::InvalidInput(format!(
                "thread index {} out of range (size {})",
                index, size
            ))),
        }
    }

    /// Adopt a generated set of parts wholesale, taking the incoming length
    /// as-is even when it falls outside the interactive bounds. Whether an
    /// out-of-policy count is a contract violation is the generation
    /// controller's call, not this buffer's.
    pub fn replace_all(&mut self, texts: Vec<String>) {
        self.items = texts.into_iter().map(ContentItem::from_text).collect();
    }

    /// Texts of non-blank items in composed order. This is exactly the
    /// payload sent when the thread is published; blank items are silently
    /// dropped here, not validated individually.
    pub fn postable_items(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !item.is_blank())
            .map(|item| item.text().to_string())
            .collect()
    }

    /// A thread can be published when at least one item is non-blank and no
    /// item, blank or not, exceeds the per-post limit.
    pub fn is_postable(&self) -> bool {
        self.items.iter().any(|item| !item.is_blank())
            && self.items.iter().all(|item| !item.exceeds_limit())
    }
}
