//! Transient success/error notifications.

use std::time::{Duration, Instant};

pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "\u{2713}",
            ToastKind::Error => "\u{2717}",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

/// Holds at most one toast. Showing a new one replaces the current one and
/// restarts its timer.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Toast {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Error, message, Instant::now());
    }

    /// Drop the toast once it has been visible for [`TOAST_TTL`].
    pub fn expire(&mut self, now: Instant) {
        if let Some(toast) = &self.current
            && now.duration_since(toast.shown_at) >= TOAST_TTL
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
