//! Ambient user notifications (toast-style messages).
//!
//! The screen never reaches for a global toast system; it is handed a
//! `Notifier` and reports through it.

use std::fmt;

/// Visual class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationStatus::Success => "success",
            NotificationStatus::Info => "info",
            NotificationStatus::Warning => "warning",
            NotificationStatus::Error => "error",
        })
    }
}

/// A transient message shown outside the normal document flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub status: NotificationStatus,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn new(status: NotificationStatus, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Sink for ambient notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn success(&mut self, title: &str) {
        self.notify(Notification::new(NotificationStatus::Success, title));
    }

    fn info(&mut self, title: &str) {
        self.notify(Notification::new(NotificationStatus::Info, title));
    }

    fn warn(&mut self, title: &str) {
        self.notify(Notification::new(NotificationStatus::Warning, title));
    }

    fn error(&mut self, title: &str) {
        self.notify(Notification::new(NotificationStatus::Error, title));
    }
}

/// In-memory log, handy for hosts that render notifications later.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}
