//! Transient user feedback: node highlights and toasts that expire.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub node: String,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at_ms: u64,
}

pub trait Expiring {
    fn expires_at_ms(&self) -> u64;

    fn is_live(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms()
    }
}

impl Expiring for Highlight {
    fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms
    }
}

impl Expiring for Toast {
    fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms
    }
}

/// The single highlight and single toast slot of a canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notices {
    highlight: Option<Highlight>,
    toast: Option<Toast>,
}

impl Notices {
    /// Highlight `node` for `duration_ms`. Highlighting the same node again
    /// restarts the timer.
    pub fn highlight(&mut self, node: &str, now_ms: u64, duration_ms: u64) {
        self.highlight = Some(Highlight {
            node: node.to_string(),
            expires_at_ms: now_ms.saturating_add(duration_ms),
        });
    }

    pub fn toast(&mut self, message: String, level: ToastLevel, now_ms: u64, duration_ms: u64) {
        self.toast = Some(Toast {
            message,
            level,
            expires_at_ms: now_ms.saturating_add(duration_ms),
        });
    }

    pub fn live_highlight(&self, now_ms: u64) -> Option<&Highlight> {
        self.highlight.as_ref().filter(|h| h.is_live(now_ms))
    }

    pub fn live_toast(&self, now_ms: u64) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_live(now_ms))
    }

    pub fn clear_highlight_of(&mut self, node: &str) {
        if self.highlight.as_ref().is_some_and(|h| h.node == node) {
            self.highlight = None;
        }
    }

    /// Drop everything that has expired by `now_ms`.
    pub fn expire(&mut self, now_ms: u64) {
        if self.highlight.as_ref().is_some_and(|h| !h.is_live(now_ms)) {
            self.highlight = None;
        }
        if self.toast.as_ref().is_some_and(|t| !t.is_live(now_ms)) {
            self.toast = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.highlight.is_none() && self.toast.is_none()
    }
}
