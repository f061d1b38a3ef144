//! Transient toast notifications.
//!
//! Toasts auto-dismiss after three seconds. Expiry is driven by the caller's
//! clock (`active`/`prune` take a now instant) rather than a background
//! timer, so the behavior is deterministic under test.

use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of live toasts for one component.
#[derive(Debug, Default)]
pub struct Toasts {
    queue: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Toasts::default()
    }

    /// Push a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    /// Push an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.queue.push(Toast {
            kind,
            message,
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.queue.iter().filter(move |t| t.expires_at > now)
    }

    /// Drop toasts that have expired by `now`.
    pub fn prune(&mut self, now: Instant) {
        self.queue.retain(|t| t.expires_at > now);
    }

    /// The most recently pushed toast, expired or not.
    pub fn latest(&self) -> Option<&Toast> {
        self.queue.last()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
