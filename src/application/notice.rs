// src/application/notice.rs
use std::time::{Duration, Instant};

use crate::constants::NOTICE_DISMISS_AFTER_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Danger,
}

/// Transient user-facing message about the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub raised_at: Instant,
}

/// Holds the most recent notice until it is dismissed by age.
///
/// A new notice replaces the current one and restarts the clock.
#[derive(Debug, Clone)]
pub struct Notices {
    dismiss_after: Duration,
    current: Option<Notice>,
}

impl Notices {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            current: None,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.raise(message.into(), NoticeLevel::Success);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.raise(message.into(), NoticeLevel::Danger);
    }

    fn raise(&mut self, message: String, level: NoticeLevel) {
        self.current = Some(Notice {
            message,
            level,
            raised_at: Instant::now(),
        });
    }

    /// The visible notice, if it has not aged out yet.
    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.raised_at) < self.dismiss_after)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(Duration::from_millis(NOTICE_DISMISS_AFTER_MS))
    }
}
