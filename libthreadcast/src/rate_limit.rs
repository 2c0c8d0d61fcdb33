//! Advisory tracking of the posting service's daily quota.

/// Daily quota assumed before the first authoritative fetch.
pub const DEFAULT_DAILY_QUOTA: u32 = 17;

/// Tracks how many posting operations the current period still allows.
///
/// The value is advisory: it is displayed to the user but never enforced as
/// a client-side gate before posting. A locally tracked counter can desync
/// from the server's true window, so the server's 429 response is the only
/// authoritative gate. The tracker is overwritten by every authoritative
/// value the server sends and only decremented locally as a placeholder in
/// between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitTracker {
    remaining: u32,
}

impl Default for RateLimitTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_QUOTA)
    }
}

impl RateLimitTracker {
    pub fn new(quota: u32) -> Self {
        Self { remaining: quota }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unconditionally overwrite with the server-authoritative value.
    /// Called at startup and whenever a post response carries rate-limit
    /// metadata.
    pub fn refresh(&mut self, remote: u32) {
        self.remaining = remote;
    }

    /// Optimistic decrement after a successful post whose response carried
    /// no rate-limit metadata. Only a display placeholder until the next
    /// authoritative refresh.
    pub fn record_post(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
