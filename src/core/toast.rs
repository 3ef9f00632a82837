//! Transient notifications.
//!
//! Every simulated action confirms itself with a toast. Toasts expire after
//! a fixed lifetime; the queue is pruned on each loop iteration.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);
/// Oldest toasts are dropped beyond this many.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub created_at: Instant,
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.push_at(kind, text, Instant::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) {
        let text = text.into();
        log::info!("Toast ({:?}): {}", kind, text);
        self.toasts.push_back(Toast {
            kind,
            text,
            created_at: now,
        });
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Success, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Error, text);
    }

    /// Drop toasts older than the lifetime. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created_at) < lifetime);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_lifetime() {
        let mut queue = ToastQueue::new(Duration::from_secs(3));
        let t0 = Instant::now();
        queue.push_at(ToastKind::Info, "hello", t0);
        assert!(!queue.expire(t0 + Duration::from_secs(2)));
        assert_eq!(queue.len(), 1);
        assert!(queue.expire(t0 + Duration::from_secs(3)));
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_is_bounded() {
        let mut queue = ToastQueue::default();
        for i in 0..10 {
            queue.info(format!("toast {i}"));
        }
        assert_eq!(queue.len(), MAX_VISIBLE);
        assert_eq!(queue.latest().unwrap().text, "toast 9");
        assert_eq!(queue.iter().next().unwrap().text, "toast 6");
    }

    #[test]
    fn kinds_are_recorded() {
        let mut queue = ToastQueue::default();
        queue.success("ok");
        queue.error("bad");
        let kinds: Vec<ToastKind> = queue.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
    }
}
