//! Drives content generation and installs the result as the active draft.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::GenerationApi;
use crate::content::ContentItem;
use crate::error::WorkflowError;
use crate::thread::{ThreadBuffer, MAX_THREAD_PARTS, MIN_THREAD_PARTS};
use crate::workflow::state::{Draft, Mode, Phase, WorkflowState};

/// Runs generation requests for the active mode.
///
/// Holds the transport only; all state lives in [`WorkflowState`], which the
/// controller moves through `Generating` and back to a resting phase.
pub struct GenerationController {
    api: Arc<dyn GenerationApi>,
}

impl GenerationController {
    pub fn new(api: Arc<dyn GenerationApi>) -> Self {
        Self { api }
    }

    /// Generate a draft for the current topic, mode, and language.
    ///
    /// On success the draft is replaced and the phase becomes `Ready`. On
    /// failure the previous draft is left untouched and the phase returns to
    /// `Idle`. Rejected before any request when the trimmed topic is empty
    /// or another operation is in flight.
    pub async fn generate(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        if state.phase().is_in_flight() {
            return Err(WorkflowError::AlreadyInProgress);
        }
        if state.topic().trim().is_empty() {
            return Err(WorkflowError::EmptyTopic);
        }

        let topic = state.topic().to_string();
        let language = state.language();
        state.set_phase(Phase::Generating);

        match state.mode() {
            Mode::Single => match self.api.generate_single(&topic, language).await {
                Ok(text) => {
                    info!(chars = text.chars().count(), "generated single post");
                    *state.draft_mut() = Draft::Single(ContentItem::from_text(text));
                    state.set_phase(Phase::Ready);
                    Ok(())
                }
                Err(err) => {
                    warn!(error = %err, "single generation failed");
                    state.set_phase(Phase::Idle);
                    Err(WorkflowError::GenerationFailed(err.to_string()))
                }
            },
            Mode::Thread => {
                let part_count = state.thread_part_count();
                match self.api.generate_thread(&topic, part_count, language).await {
                    Ok(texts) => {
                        if texts.len() < MIN_THREAD_PARTS || texts.len() > MAX_THREAD_PARTS {
                            warn!(
                                parts = texts.len(),
                                requested = part_count,
                                "generator returned out-of-policy part count"
                            );
                            state.set_phase(Phase::Idle);
                            return Err(WorkflowError::GenerationFailed(format!(
                                "generator returned {} parts, expected between {} and {}",
                                texts.len(),
                                MIN_THREAD_PARTS,
                                MAX_THREAD_PARTS
                            )));
                        }

                        info!(parts = texts.len(), "generated thread");
                        let mut buffer = ThreadBuffer::default();
                        buffer.replace_all(texts);
                        *state.draft_mut() = Draft::Thread(buffer);
                        state.set_phase(Phase::Ready);
                        Ok(())
                    }
                    Err(err) => {
                        warn!(error = %err, "thread generation failed");
                        state.set_phase(Phase::Idle);
                        Err(WorkflowError::GenerationFailed(err.to_string()))
                    }
                }
            }
        }
    }
}
