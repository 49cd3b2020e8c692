//! Transient notifications.
//!
//! Each toast carries its own dismissal deadline; there is no shared
//! timer, so overlapping toasts expire independently. The host drives
//! time explicitly by passing `Instant`s, which keeps expiry
//! deterministic under test.

use std::time::{Duration, Instant};

/// How long a toast stays visible by default.
pub const DISPLAY_TIME: Duration = Duration::from_millis(3000);

/// A queued notification with its own dismissal deadline.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    deadline: Instant,
}

/// Auto-dismissing notification queue.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast visible for [`DISPLAY_TIME`] from `now`.
    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        self.push_with_timeout(message, now, DISPLAY_TIME);
    }

    pub fn push_with_timeout(
        &mut self,
        message: impl Into<String>,
        now: Instant,
        timeout: Duration,
    ) {
        self.toasts.push(Toast {
            message: message.into(),
            deadline: now + timeout,
        });
    }

    /// Drop every toast whose display time has elapsed, returning the
    /// dismissed messages in queue order.
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        let mut dismissed = Vec::new();
        self.toasts.retain(|toast| {
            if toast.deadline <= now {
                dismissed.push(toast.message.clone());
                false
            } else {
                true
            }
        });
        dismissed
    }

    /// Messages currently on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|toast| toast.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
