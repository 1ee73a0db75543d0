//! Inline user-facing notices.
//!
//! Screens surface outcomes as a single replaceable notice rather than a
//! queue. Most notices stick until the next action overwrites them; a few
//! (the logout toast) carry an expiry and disappear on their own.

use chrono::{DateTime, Duration, Utc};

/// How a notice should be styled by whoever renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A single inline message with an optional expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    text: String,
    kind: NoticeKind,
    expires_at: Option<DateTime<Utc>>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Error)
    }

    fn new(text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: None,
        }
    }

    /// Makes the notice expire `duration` from now.
    pub fn expiring_after(mut self, duration: Duration) -> Self {
        self.expires_at = Some(Utc::now() + duration);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Expiry is checked at read time; nothing schedules a wakeup.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// The toast shown on the login screen right after signing out.
pub fn logout_notice() -> Notice {
    Notice::success("Logged out successfully.").expiring_after(Duration::seconds(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_notice_never_expires() {
        let notice = Notice::error("Error fetching groups.");
        let far_future = Utc::now() + Duration::days(365);
        assert!(!notice.is_expired_at(far_future));
    }

    #[test]
    fn each_kind_has_its_constructor() {
        assert_eq!(Notice::info("Loading Groups...").kind(), NoticeKind::Info);
        assert_eq!(Notice::success("sent").kind(), NoticeKind::Success);
        assert_eq!(Notice::error("rejected").kind(), NoticeKind::Error);
    }

    #[test]
    fn expiring_notice_lapses_after_its_window() {
        let notice = Notice::success("Logged out successfully.").expiring_after(Duration::seconds(3));
        assert!(!notice.is_expired());
        assert!(notice.is_expired_at(Utc::now() + Duration::seconds(4)));
    }

    #[test]
    fn logout_toast_is_a_short_lived_success() {
        let toast = logout_notice();
        assert_eq!(toast.kind(), NoticeKind::Success);
        assert_eq!(toast.text(), "Logged out successfully.");
        assert!(!toast.is_expired());
    }
}
