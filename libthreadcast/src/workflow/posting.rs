//! Validates the active draft and publishes it.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{PostReceipt, PostingApi};
use crate::content::MAX_POST_CHARS;
use crate::error::{ApiError, WorkflowError};
use crate::rate_limit::RateLimitTracker;
use crate::workflow::state::{Draft, Phase, WorkflowState};

enum Payload {
    Single(String),
    Thread(Vec<String>),
}

/// Runs post requests for the active draft.
///
/// Validation happens before any request leaves the process; a rejected
/// draft never consumes quota. Failures keep the draft so the user can edit
/// and retry.
pub struct PostingController {
    api: Arc<dyn PostingApi>,
}

impl PostingController {
    pub fn new(api: Arc<dyn PostingApi>) -> Self {
        Self { api }
    }

    /// Publish the active draft.
    ///
    /// On success the composition state is cleared for the next post and the
    /// tracker is updated from the receipt (or decremented when the receipt
    /// carries no rate-limit metadata). On failure the draft survives and
    /// the phase returns to `Ready`.
    pub async fn post(
        &self,
        state: &mut WorkflowState,
        tracker: &mut RateLimitTracker,
    ) -> Result<PostReceipt, WorkflowError> {
        if state.phase().is_in_flight() {
            return Err(WorkflowError::AlreadyInProgress);
        }

        let payload = build_payload(state)?;
        state.set_phase(Phase::Posting);

        let result = match &payload {
            Payload::Single(text) => self.api.post_single(text).await,
            Payload::Thread(texts) => self.api.post_thread(texts).await,
        };

        match result {
            Ok(receipt) => {
                match &receipt.rate_limit {
                    Some(info) => tracker.refresh(info.remaining),
                    None => tracker.record_post(),
                }
                info!(remaining = tracker.remaining(), "post published");
                state.clear_after_publish();
                state.set_phase(Phase::Idle);
                Ok(receipt)
            }
            Err(ApiError::RateLimited) => {
                warn!("post rejected by rate limit");
                state.set_phase(Phase::Ready);
                Err(WorkflowError::RateLimitExceeded)
            }
            Err(err) => {
                warn!(error = %err, "post failed");
                state.set_phase(Phase::Ready);
                Err(WorkflowError::PostFailed(err.to_string()))
            }
        }
    }
}

/// Validate the draft and assemble exactly what will go on the wire.
fn build_payload(state: &WorkflowState) -> Result<Payload, WorkflowError> {
    match state.draft() {
        Draft::Single(item) => {
            if item.is_blank() {
                return Err(WorkflowError::ValidationFailed(
                    "post text is empty".to_string(),
                ));
            }
            if item.exceeds_limit() {
                return Err(WorkflowError::ValidationFailed(format!(
                    "post is {} characters, limit is {}",
                    item.char_count(),
                    MAX_POST_CHARS
                )));
            }
            Ok(Payload::Single(item.text().to_string()))
        }
        Draft::Thread(buffer) => {
            if buffer.items().iter().any(|item| item.exceeds_limit()) {
                return Err(WorkflowError::ValidationFailed(format!(
                    "a thread part exceeds the {} character limit",
                    MAX_POST_CHARS
                )));
            }
            let texts = buffer.postable_items();
            if texts.is_empty() {
                return Err(WorkflowError::ValidationFailed(
                    "thread has no non-empty parts".to_string(),
                ));
            }
            Ok(Payload::Thread(texts))
        }
    }
}
