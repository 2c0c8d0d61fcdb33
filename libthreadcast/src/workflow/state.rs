//! Aggregate workflow state: mode, topic, draft, and in-flight phase.

use crate::api::Language;
use crate::content::ContentItem;
use crate::error::{Result, ThreadcastError, WorkflowError};
use crate::thread::{ThreadBuffer, DEFAULT_THREAD_PARTS, MAX_THREAD_PARTS, MIN_THREAD_PARTS};

/// Which kind of draft is being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    Thread,
}

/// Where the workflow currently is in its cycle.
///
/// `Idle` and `Ready` are resting phases that accept new commands;
/// `Generating` and `Posting` mark the one network operation allowed in
/// flight at a time. The workflow is reusable: every cycle ends back in a
/// resting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Ready,
    Posting,
}

impl Phase {
    /// True while a network operation is in flight.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::Generating | Phase::Posting)
    }
}

/// The draft owned by the active mode.
///
/// Exactly one draft exists at a time. Switching modes replaces it
/// wholesale; the inactive mode's content is deliberately not preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Single(ContentItem),
    Thread(ThreadBuffer),
}

impl Draft {
    fn empty_for(mode: Mode, thread_parts: usize) -> Self {
        match mode {
            Mode::Single => Draft::Single(ContentItem::new()),
            Mode::Thread => Draft::Thread(ThreadBuffer::new(thread_parts)),
        }
    }
}

/// Mutable composition state owned by exactly one [`Workflow`] instance.
///
/// Presentation layers read it through accessors and mutate it only through
/// these operations; the two controllers flip the phase around their network
/// calls.
///
/// [`Workflow`]: super::Workflow
#[derive(Debug, Clone)]
pub struct WorkflowState {
    mode: Mode,
    topic: String,
    language: Language,
    thread_part_count: usize,
    phase: Phase,
    draft: Draft,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            topic: String::new(),
            language: Language::default(),
            thread_part_count: DEFAULT_THREAD_PARTS,
            phase: Phase::Idle,
            draft: Draft::Single(ContentItem::new()),
        }
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn thread_part_count(&self) -> usize {
        self.thread_part_count
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The single-mode draft, when in single mode.
    pub fn single_draft(&self) -> Option<&ContentItem> {
        match &self.draft {
            Draft::Single(item) => Some(item),
            Draft::Thread(_) => None,
        }
    }

    /// The thread draft, when in thread mode.
    pub fn thread_draft(&self) -> Option<&ThreadBuffer> {
        match &self.draft {
            Draft::Thread(buffer) => Some(buffer),
            Draft::Single(_) => None,
        }
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Set the requested thread part count, clamped to the policy bounds.
    /// The active thread draft is resized to match unless an operation is
    /// in flight (the draft is about to be replaced anyway).
    pub fn set_thread_part_count(&mut self, count: usize) {
        self.thread_part_count = count.clamp(MIN_THREAD_PARTS, MAX_THREAD_PARTS);
        if !self.phase.is_in_flight() {
            if let Draft::Thread(buffer) = &mut self.draft {
                buffer.resize(self.thread_part_count);
            }
        }
    }

    /// Mode switches are only allowed while nothing is in flight.
    pub fn can_switch_mode(&self) -> bool {
        !self.phase.is_in_flight()
    }

    /// Switch modes, discarding the previous mode's unpublished draft.
    ///
    /// The topic is kept; carrying draft content across modes is
    /// deliberately unsupported.
    pub fn set_mode(&mut self, mode: Mode) -> std::result::Result<(), WorkflowError> {
        if !self.can_switch_mode() {
            return Err(WorkflowError::AlreadyInProgress);
        }
        if mode != self.mode {
            self.mode = mode;
            self.draft = Draft::empty_for(mode, self.thread_part_count);
            self.phase = Phase::Idle;
        }
        Ok(())
    }

    /// Edit the single-mode draft directly.
    pub fn edit_single(&mut self, text: impl Into<String>) -> Result<()> {
        if self.phase.is_in_flight() {
            return Err(WorkflowError::AlreadyInProgress.into());
        }
        match &mut self.draft {
            Draft::Single(item) => {
                item.set_text(text);
                Ok(())
            }
            Draft::Thread(_) => Err(ThreadcastError::InvalidInput(
                "no single draft while in thread mode".to_string(),
            )),
        }
    }

    /// Edit one slot of the thread draft.
    pub fn edit_thread_item(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        if self.phase.is_in_flight() {
            return Err(WorkflowError::AlreadyInProgress.into());
        }
        match &mut self.draft {
            Draft::Thread(buffer) => buffer.set_item(index, text),
            Draft::Single(_) => Err(ThreadcastError::InvalidInput(
                "no thread draft while in single mode".to_string(),
            )),
        }
    }

    /// Discard the active draft and return to `Idle`.
    pub fn discard_draft(&mut self) -> std::result::Result<(), WorkflowError> {
        if self.phase.is_in_flight() {
            return Err(WorkflowError::AlreadyInProgress);
        }
        self.draft = Draft::empty_for(self.mode, self.thread_part_count);
        self.phase = Phase::Idle;
        Ok(())
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Reset after a successful publish: topic cleared, active draft
    /// replaced with an empty one (threads go back to the default size).
    pub(crate) fn clear_after_publish(&mut self) {
        self.topic.clear();
        self.thread_part_count = DEFAULT_THREAD_PARTS;
        self.draft = Draft::empty_for(self.mode, DEFAULT_THREAD_PARTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = WorkflowState::new();
        assert_eq!(state.mode(), Mode::Single);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.language(), Language::English);
        assert_eq!(state.thread_part_count(), DEFAULT_THREAD_PARTS);
        assert!(state.topic().is_empty());
        assert!(state.single_draft().unwrap().is_blank());
    }

    #[test]
    fn test_mode_switch_discards_draft_keeps_topic() {
        let mut state = WorkflowState::new();
        state.set_topic("rust memory safety");
        state.edit_single("a half-written post").unwrap();

        state.set_mode(Mode::Thread).unwrap();

        assert_eq!(state.topic(), "rust memory safety");
        let buffer = state.thread_draft().unwrap();
        assert_eq!(buffer.size(), DEFAULT_THREAD_PARTS);
        assert!(buffer.items().iter().all(|item| item.is_blank()));

        // Switching back does not bring the single draft back either.
        state.set_mode(Mode::Single).unwrap();
        assert!(state.single_draft().unwrap().is_blank());
    }

    #[test]
    fn test_mode_switch_rejected_in_flight() {
        let mut state = WorkflowState::new();
        state.set_phase(Phase::Generating);

        assert!(!state.can_switch_mode());
        assert_eq!(
            state.set_mode(Mode::Thread),
            Err(WorkflowError::AlreadyInProgress)
        );

        state.set_phase(Phase::Posting);
        assert_eq!(
            state.set_mode(Mode::Thread),
            Err(WorkflowError::AlreadyInProgress)
        );
    }

    #[test]
    fn test_mode_switch_allowed_while_ready() {
        let mut state = WorkflowState::new();
        state.set_phase(Phase::Ready);

        assert!(state.can_switch_mode());
        state.set_mode(Mode::Thread).unwrap();
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_set_same_mode_keeps_draft() {
        let mut state = WorkflowState::new();
        state.edit_single("keep me").unwrap();

        state.set_mode(Mode::Single).unwrap();
        assert_eq!(state.single_draft().unwrap().text(), "keep me");
    }

    #[test]
    fn test_thread_part_count_clamped_and_resizes_draft() {
        let mut state = WorkflowState::new();
        state.set_mode(Mode::Thread).unwrap();

        state.set_thread_part_count(5);
        assert_eq!(state.thread_part_count(), 5);
        assert_eq!(state.thread_draft().unwrap().size(), 5);

        state.set_thread_part_count(99);
        assert_eq!(state.thread_part_count(), MAX_THREAD_PARTS);

        state.set_thread_part_count(0);
        assert_eq!(state.thread_part_count(), MIN_THREAD_PARTS);
        assert_eq!(state.thread_draft().unwrap().size(), MIN_THREAD_PARTS);
    }

    #[test]
    fn test_edit_rejected_in_flight() {
        let mut state = WorkflowState::new();
        state.set_phase(Phase::Posting);

        assert!(state.edit_single("too late").is_err());
    }

    #[test]
    fn test_edit_wrong_mode_fails_loudly() {
        let mut state = WorkflowState::new();
        assert!(state.edit_thread_item(0, "no thread yet").is_err());

        state.set_mode(Mode::Thread).unwrap();
        assert!(state.edit_single("no single draft").is_err());
    }

    #[test]
    fn test_discard_draft_returns_to_idle() {
        let mut state = WorkflowState::new();
        state.edit_single("draft text").unwrap();
        state.set_phase(Phase::Ready);

        state.discard_draft().unwrap();

        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.single_draft().unwrap().is_blank());
    }

    #[test]
    fn test_clear_after_publish() {
        let mut state = WorkflowState::new();
        state.set_mode(Mode::Thread).unwrap();
        state.set_thread_part_count(5);
        state.set_topic("launch week");
        state.edit_thread_item(0, "day one").unwrap();

        state.clear_after_publish();

        assert!(state.topic().is_empty());
        assert_eq!(state.thread_part_count(), DEFAULT_THREAD_PARTS);
        let buffer = state.thread_draft().unwrap();
        assert_eq!(buffer.size(), DEFAULT_THREAD_PARTS);
        assert!(buffer.items().iter().all(|item| item.is_blank()));
    }

    #[test]
    fn test_phase_in_flight() {
        assert!(!Phase::Idle.is_in_flight());
        assert!(!Phase::Ready.is_in_flight());
        assert!(Phase::Generating.is_in_flight());
        assert!(Phase::Posting.is_in_flight());
    }
}
