//! Transient, self-dismissing status messages.

use std::time::{Duration, Instant};

/// Delay before a new toast counts as shown.
pub const ENTER_DELAY: Duration = Duration::from_millis(100);
/// Time from creation until dismissal begins.
pub const DISMISS_AFTER: Duration = Duration::from_secs(5);
/// Time from dismissal until removal.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Where a toast is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
}

impl Toast {
    pub fn phase(&self, now: Instant) -> ToastPhase {
        let age = now.saturating_duration_since(self.created_at);
        if age < ENTER_DELAY {
            ToastPhase::Entering
        } else if age < DISMISS_AFTER {
            ToastPhase::Shown
        } else {
            ToastPhase::Leaving
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= DISMISS_AFTER + EXIT_DURATION
    }
}

/// Toasts in insertion order. No dedup, no priorities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        match kind {
            ToastKind::Success => tracing::info!("toast: {}", message),
            ToastKind::Error => tracing::warn!("toast: {}", message),
        }
        self.toasts.push(Toast {
            id,
            message,
            kind,
            created_at: now,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Success, Instant::now())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Error, Instant::now())
    }

    /// Drop toasts whose exit has finished.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}
