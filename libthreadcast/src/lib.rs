//! Threadcast - a workflow engine for AI-assisted short-form posting
//!
//! This library drives the full cycle of composing a post or a short
//! thread: generate a draft from a topic, review and edit it locally,
//! validate it against platform limits, and publish it while keeping an
//! advisory view of the daily posting quota.

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod rate_limit;
pub mod thread;
pub mod workflow;

// Re-export commonly used types
pub use api::{GenerationApi, Language, PostReceipt, PostingApi};
pub use config::Config;
pub use content::{ContentItem, LengthClass, MAX_POST_CHARS, WARN_THRESHOLD};
pub use error::{ApiError, Result, ThreadcastError, WorkflowError};
pub use rate_limit::RateLimitTracker;
pub use thread::{ThreadBuffer, MAX_THREAD_PARTS, MIN_THREAD_PARTS};
pub use workflow::{Draft, Mode, Phase, Workflow, WorkflowState};
