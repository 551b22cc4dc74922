//! Terminal implementations of the screen's notification and dialog
//! capabilities.

use std::io::Write;

use catalog_core::{Confirmation, ConfirmationPrompt, Notification, NotificationStatus, Notifier};

/// Prints toasts as single lines on the wrapped writer.
#[derive(Debug)]
pub struct ConsoleNotifier<W> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, notification: Notification) {
        match notification.status {
            NotificationStatus::Error => tracing::warn!(title = %notification.title, "notification"),
            _ => tracing::info!(title = %notification.title, "notification"),
        }
        let line = match &notification.description {
            Some(description) => format!(
                "[{}] {}: {description}",
                notification.status, notification.title
            ),
            None => format!("[{}] {}", notification.status, notification.title),
        };
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::error!(error = %err, "failed to print notification");
        }
    }
}

/// Prints the confirmation dialog; the answer comes back as a `yes`/`no`
/// command.
#[derive(Debug)]
pub struct ConsolePrompt<W> {
    out: W,
}

impl<W: Write> ConsolePrompt<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ConfirmationPrompt for ConsolePrompt<W> {
    fn ask(&mut self, confirmation: &Confirmation) {
        let result = writeln!(
            self.out,
            "! {}\n  {}\n  type `yes` ({}) or `no` ({})",
            confirmation.title,
            confirmation.text,
            confirmation.confirm_label,
            confirmation.cancel_label
        );
        if let Err(err) = result {
            tracing::error!(error = %err, "failed to print confirmation");
        }
    }
}
