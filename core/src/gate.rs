//! Confirmation Gate in front of destructive deletes.
//!
//! Asking is fire-and-forget from the screen's point of view: the prompt is
//! presented through a `ConfirmationPrompt` and the answer arrives later as
//! a separate event.

use crate::types::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptIcon {
    Warning,
}

/// Content of a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub text: &'static str,
    pub icon: PromptIcon,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

/// Dialog shown before a product is deleted.
pub static DELETE_CONFIRMATION: Confirmation = Confirmation {
    title: "Are you sure delete?",
    text: "If your delete don't back data",
    icon: PromptIcon::Warning,
    confirm_label: "Yes, delete it!",
    cancel_label: "Cancel",
};

/// Presents a confirmation dialog to the user.
pub trait ConfirmationPrompt {
    fn ask(&mut self, confirmation: &Confirmation);
}

impl<P: ConfirmationPrompt + ?Sized> ConfirmationPrompt for &mut P {
    fn ask(&mut self, confirmation: &Confirmation) {
        (**self).ask(confirmation);
    }
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    awaiting: Option<ProductId>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The product whose deletion is waiting for an answer.
    pub fn awaiting(&self) -> Option<&ProductId> {
        self.awaiting.as_ref()
    }

    /// Start asking about `id`, replacing any unanswered request.
    pub fn request(&mut self, id: ProductId) -> &'static Confirmation {
        if let Some(previous) = self.awaiting.replace(id) {
            tracing::debug!(%previous, "unanswered delete confirmation replaced");
        }
        &DELETE_CONFIRMATION
    }

    /// Close the dialog. Returns the product to delete if the user affirmed.
    pub fn resolve(&mut self, confirmed: bool) -> Option<ProductId> {
        let id = self.awaiting.take()?;
        confirmed.then_some(id)
    }
}
