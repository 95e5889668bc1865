use crate::constants::TOAST_CAPACITY;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

/// Shared toast queue that can be used across the application
#[derive(Clone)]
pub struct Toasts {
    entries: Arc<Mutex<VecDeque<Toast>>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn push(&self, level: ToastLevel, message: impl Into<String>) {
        let toast = Toast {
            level,
            message: message.into(),
            at: Local::now(),
        };

        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(toast);
            while entries.len() > TOAST_CAPACITY {
                entries.pop_front();
            }
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Most recent toast
    pub fn latest(&self) -> Option<Toast> {
        self.entries.lock().ok().and_then(|entries| entries.back().cloned())
    }

    /// All toasts, newest first
    pub fn all(&self) -> Vec<Toast> {
        if let Ok(entries) = self.entries.lock() {
            entries.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}
