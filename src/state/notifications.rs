//! Transient toast notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default lifetime of a toast
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// Upper bound on toasts kept on screen at once
const MAX_VISIBLE: usize = 4;

/// Lifetime used when a requested duration overflows the clock
const FALLBACK_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A fire-and-forget notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    /// Overrides the default lifetime when set
    pub duration: Option<Duration>,
}

impl Toast {
    pub fn new(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            description: None,
            duration: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Severity::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Severity::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Severity::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Debug, Clone)]
struct ActiveToast {
    toast: Toast,
    expires_at: Instant,
}

/// Toast sink with expiry
#[derive(Debug, Clone)]
pub struct Notifications {
    active: VecDeque<ActiveToast>,
    default_duration: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifications {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            active: VecDeque::new(),
            default_duration,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.push_at(toast, Instant::now());
    }

    fn push_at(&mut self, toast: Toast, now: Instant) {
        tracing::debug!(title = %toast.title, severity = ?toast.severity, "toast");
        let lifetime = toast.duration.unwrap_or(self.default_duration);
        let expires_at = now
            .checked_add(lifetime)
            .unwrap_or_else(|| now + FALLBACK_LIFETIME);
        self.active.push_back(ActiveToast { toast, expires_at });
        while self.active.len() > MAX_VISIBLE {
            self.active.pop_front();
        }
    }

    /// Drop toasts whose lifetime has elapsed
    pub fn prune(&mut self) {
        self.prune_at(Instant::now());
    }

    fn prune_at(&mut self, now: Instant) {
        self.active.retain(|t| t.expires_at > now);
    }

    /// Visible toasts, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|t| &t.toast)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
