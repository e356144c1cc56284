//! Self-expiring validation notice shown under the add form.

use std::time::{Duration, Instant};

/// How long a validation notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// A message raised at a known instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    raised_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, raised_at: Instant) -> Self {
        Notice {
            message: message.into(),
            raised_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTICE_TTL
    }
}

/// Holds at most one notice and drops it once it has expired.
#[derive(Debug, Clone, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn raise(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice::new(message, now));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The live notice at `now`, clearing it if its time is up.
    pub fn active(&mut self, now: Instant) -> Option<&Notice> {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_ttl() {
        let start = Instant::now();
        let mut slot = NoticeSlot::default();
        slot.raise("Task cannot be empty.", start);

        assert_eq!(
            slot.active(start + Duration::from_millis(1999)).map(|n| n.message.as_str()),
            Some("Task cannot be empty.")
        );
        assert!(slot.active(start + NOTICE_TTL).is_none());
        // Stays gone.
        assert!(slot.active(start).is_none());
    }

    #[test]
    fn raising_again_restarts_the_clock() {
        let start = Instant::now();
        let mut slot = NoticeSlot::default();
        slot.raise("first", start);
        slot.raise("second", start + Duration::from_millis(1500));
        let notice = slot.active(start + Duration::from_millis(3000)).unwrap();
        assert_eq!(notice.message, "second");
    }

    #[test]
    fn clear_removes_notice() {
        let start = Instant::now();
        let mut slot = NoticeSlot::default();
        slot.raise("oops", start);
        slot.clear();
        assert!(slot.active(start).is_none());
    }
}
