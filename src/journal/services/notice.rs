//! Transient, auto-expiring notices raised when an operation fails.

use chrono::{DateTime, TimeDelta, Utc};

/// A user-facing failure message with a fixed lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    raised_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Notice {
    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notice was raised.
    #[must_use]
    pub const fn raised_at(&self) -> DateTime<Utc> {
        self.raised_at
    }

    /// Returns when the notice stops being shown.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns whether the notice is still visible at `now`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Holds notices until they expire.
#[derive(Debug, Clone)]
pub(crate) struct NoticeBoard {
    ttl: TimeDelta,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub(crate) const fn new(ttl: TimeDelta) -> Self {
        Self {
            ttl,
            notices: Vec::new(),
        }
    }

    pub(crate) fn raise(&mut self, message: String, now: DateTime<Utc>) {
        self.prune(now);
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(now);
        self.notices.push(Notice {
            message,
            raised_at: now,
            expires_at,
        });
    }

    pub(crate) fn active(&self, now: DateTime<Utc>) -> Vec<Notice> {
        self.notices
            .iter()
            .filter(|notice| notice.is_active(now))
            .cloned()
            .collect()
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|notice| notice.is_active(now));
    }
}
