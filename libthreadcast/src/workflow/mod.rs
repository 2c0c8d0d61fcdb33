//! The composition workflow: state, generation, and posting glued together.
//!
//! [`Workflow`] is the one entry point a frontend needs. It owns the
//! composition state and the advisory rate-limit tracker, and delegates
//! network work to the two controllers. One operation may be in flight at a
//! time; concurrent commands are rejected with
//! [`WorkflowError::AlreadyInProgress`].

pub mod generation;
pub mod posting;
mod state;

use std::sync::Arc;

use tracing::warn;

use crate::api::{GenerationApi, Language, PostReceipt, PostingApi};
use crate::config::Config;
use crate::error::{Result, WorkflowError};
use crate::rate_limit::RateLimitTracker;

pub use generation::GenerationController;
pub use posting::PostingController;
pub use state::{Draft, Mode, Phase, WorkflowState};

/// Facade over the full compose-generate-review-post cycle.
pub struct Workflow {
    state: WorkflowState,
    rate_limit: RateLimitTracker,
    generation: GenerationController,
    posting: PostingController,
    posting_api: Arc<dyn PostingApi>,
}

impl Workflow {
    /// Build a workflow over the given transports, seeded from config.
    pub fn new(
        generation_api: Arc<dyn GenerationApi>,
        posting_api: Arc<dyn PostingApi>,
        config: &Config,
    ) -> Self {
        let mut state = WorkflowState::new();
        state.set_language(config.defaults.language);
        state.set_thread_part_count(config.defaults.thread_parts);

        Self {
            state,
            rate_limit: RateLimitTracker::new(config.limits.daily_quota),
            generation: GenerationController::new(generation_api),
            posting: PostingController::new(Arc::clone(&posting_api)),
            posting_api,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Advisory number of posts left today.
    pub fn remaining_quota(&self) -> u32 {
        self.rate_limit.remaining()
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.state.set_topic(topic);
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.set_language(language);
    }

    pub fn set_thread_part_count(&mut self, count: usize) {
        self.state.set_thread_part_count(count);
    }

    pub fn set_mode(&mut self, mode: Mode) -> std::result::Result<(), WorkflowError> {
        self.state.set_mode(mode)
    }

    pub fn edit_single(&mut self, text: impl Into<String>) -> Result<()> {
        self.state.edit_single(text)
    }

    pub fn edit_thread_item(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.state.edit_thread_item(index, text)
    }

    pub fn discard_draft(&mut self) -> std::result::Result<(), WorkflowError> {
        self.state.discard_draft()
    }

    /// Generate a draft for the current topic and mode.
    pub async fn generate(&mut self) -> std::result::Result<(), WorkflowError> {
        self.generation.generate(&mut self.state).await
    }

    /// Publish the active draft.
    pub async fn post(&mut self) -> std::result::Result<PostReceipt, WorkflowError> {
        self.posting.post(&mut self.state, &mut self.rate_limit).await
    }

    /// Refresh the rate-limit tracker from the server.
    ///
    /// Fetch failures are non-fatal; the tracker keeps its previous value
    /// and the workflow stays usable.
    pub async fn refresh_rate_limit(&mut self) {
        match self.posting_api.fetch_rate_limit().await {
            Ok(remaining) => self.rate_limit.refresh(remaining),
            Err(err) => {
                warn!(error = %err, "rate limit fetch failed; keeping previous value");
            }
        }
    }
}
