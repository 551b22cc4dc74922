//! The product administration screen as an event-driven state machine.
//!
//! # Design
//! `AdminScreen` owns one of each hook (query, three mutations, form, gate)
//! and wires them together. User actions and network completions are
//! separate events: an action queues requests and returns immediately, and
//! the host later reports each completion through [`AdminScreen::complete`].
//! Acknowledgments ("Product added", "Deleted!") and the draft reset are
//! emitted when the corresponding write actually succeeds.

use std::collections::BTreeMap;

use crate::client::ProductClient;
use crate::dispatch::{Completion, Dispatch, Outbox, RequestId};
use crate::error::ApiError;
use crate::form::{Field, FormController, ReadOnlyField, SubmitError, Submission};
use crate::gate::{ConfirmationGate, ConfirmationPrompt, DELETE_CONFIRMATION};
use crate::mutation::{Mutation, MutationKind};
use crate::notify::{Notification, NotificationStatus, Notifier};
use crate::query::{ProductQuery, ReadOutcome};
use crate::types::{Product, ProductId};
use crate::view::{ColorMode, ScreenView};

pub const READ_FAILED: &str = "An error occurred";
pub const PRODUCT_ADDED: &str = "Product added";
pub const PRODUCT_EDITED: &str = "Product Edit";
pub const SAVE_FAILED: &str = "Product could not be saved";
pub const PRODUCT_DELETED: &str = "Deleted!";
pub const PRODUCT_DELETED_DETAIL: &str = "Your file has been deleted.";
pub const DELETE_FAILED: &str = "Product could not be deleted";

#[derive(Debug, Clone)]
enum Pending {
    Read,
    Create,
    Edit(ProductId),
    Delete(ProductId),
}

#[derive(Debug)]
pub struct AdminScreen<N, P> {
    client: ProductClient,
    query: ProductQuery,
    create: Mutation,
    edit: Mutation,
    delete: Mutation,
    form: FormController,
    gate: ConfirmationGate,
    color_mode: ColorMode,
    outbox: Outbox,
    pending: BTreeMap<RequestId, Pending>,
    notifier: N,
    prompt: P,
}

impl<N: Notifier, P: ConfirmationPrompt> AdminScreen<N, P> {
    pub fn new(client: ProductClient, notifier: N, prompt: P) -> Self {
        Self {
            client,
            query: ProductQuery::new(),
            create: Mutation::new(MutationKind::Create),
            edit: Mutation::new(MutationKind::Edit),
            delete: Mutation::new(MutationKind::Delete),
            form: FormController::new(),
            gate: ConfirmationGate::new(),
            color_mode: ColorMode::default(),
            outbox: Outbox::default(),
            pending: BTreeMap::new(),
            notifier,
            prompt,
        }
    }

    /// First render: load the product list.
    pub fn mount(&mut self) -> RequestId {
        self.refetch()
    }

    /// Read the product list again, regardless of reads already in flight.
    pub fn refetch(&mut self) -> RequestId {
        let id = self.outbox.push(self.client.build_list_products());
        self.query.begin(id);
        self.pending.insert(id, Pending::Read);
        id
    }

    /// Overwrite one editable field of the draft. The id is read-only.
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), ReadOnlyField> {
        self.form.set_field(field, value)
    }

    /// Empty the form without submitting.
    pub fn clear_form(&mut self) {
        self.form.reset();
    }

    /// Copy a list row into the form.
    pub fn edit(&mut self, product: &Product) {
        tracing::debug!(id = %product.id, "entering edit mode");
        self.form.enter_edit_mode(product);
    }

    /// Copy the row with `id` from the List Snapshot into the form.
    ///
    /// Returns `false` when the snapshot has no such row.
    pub fn edit_by_id(&mut self, id: &ProductId) -> bool {
        match self.query.find(id) {
            Some(product) => {
                let product = product.clone();
                self.edit(&product);
                true
            }
            None => false,
        }
    }

    /// Validate the draft and dispatch the matching create or edit.
    pub fn submit(&mut self) -> Result<RequestId, SubmitError> {
        let submission = self.form.submit()?;
        let built = match &submission {
            Submission::Create(input) => self
                .client
                .build_create_product(input)
                .map(|request| (request, Pending::Create)),
            Submission::Edit(id, input) => self
                .client
                .build_update_product(id, input)
                .map(|request| (request, Pending::Edit(id.clone()))),
        };
        let (request, pending) = match built {
            Ok(built) => built,
            Err(err) => {
                self.form.finish(false);
                self.notify_failure(SAVE_FAILED, &err);
                return Err(err.into());
            }
        };

        let id = self.outbox.push(request);
        match pending {
            Pending::Edit(_) => self.edit.begin(id),
            _ => self.create.begin(id),
        }
        self.pending.insert(id, pending);
        Ok(id)
    }

    /// Ask the user to confirm deleting `id`.
    pub fn request_delete(&mut self, id: ProductId) {
        let confirmation = self.gate.request(id);
        self.prompt.ask(confirmation);
    }

    /// Deliver the user's answer to the pending confirmation.
    ///
    /// Dispatches the delete only when `confirmed` is true.
    pub fn answer_confirmation(&mut self, confirmed: bool) -> Option<RequestId> {
        let product = self.gate.resolve(confirmed)?;
        let id = self.outbox.push(self.client.build_delete_product(&product));
        self.delete.begin(id);
        self.pending.insert(id, Pending::Delete(product));
        Some(id)
    }

    pub fn toggle_color_mode(&mut self) -> ColorMode {
        self.color_mode = self.color_mode.toggled();
        self.color_mode
    }

    /// Drain requests queued since the last call, oldest first.
    pub fn take_dispatches(&mut self) -> Vec<Dispatch> {
        self.outbox.drain()
    }

    /// Report the outcome of a dispatched request.
    pub fn complete(&mut self, id: RequestId, completion: Completion) {
        let Some(pending) = self.pending.remove(&id) else {
            tracing::warn!(%id, "completion for unknown request ignored");
            return;
        };

        match pending {
            Pending::Read => {
                let result = completion.and_then(|r| self.client.parse_list_products(r));
                match self.query.settle(id, result) {
                    ReadOutcome::Applied => tracing::debug!(%id, "product list refreshed"),
                    ReadOutcome::Stale => tracing::debug!(%id, "stale product list dropped"),
                    ReadOutcome::Failed(err) => {
                        tracing::warn!(%id, error = %err, "product list read failed");
                        self.notifier.error(READ_FAILED);
                    }
                }
            }
            Pending::Create => {
                let result = completion
                    .and_then(|r| self.client.parse_create_product(r))
                    .map(|product| tracing::info!(id = %product.id, "product created"));
                self.settle_save(id, MutationKind::Create, result);
            }
            Pending::Edit(product) => {
                let result = completion
                    .and_then(|r| self.client.parse_update_product(r))
                    .map(|_| tracing::info!(id = %product, "product edited"));
                self.settle_save(id, MutationKind::Edit, result);
            }
            Pending::Delete(product) => {
                let result = completion.and_then(|r| self.client.parse_delete_product(r));
                self.delete.settle(id, result.is_ok());
                match result {
                    Ok(()) => {
                        tracing::info!(id = %product, "product deleted");
                        self.notifier.notify(
                            Notification::new(NotificationStatus::Success, PRODUCT_DELETED)
                                .with_description(PRODUCT_DELETED_DETAIL),
                        );
                        self.invalidate(self.delete.invalidates());
                    }
                    Err(err) => self.notify_failure(DELETE_FAILED, &err),
                }
            }
        }
    }

    fn settle_save(&mut self, id: RequestId, kind: MutationKind, result: Result<(), ApiError>) {
        let mutation = match kind {
            MutationKind::Edit => &mut self.edit,
            _ => &mut self.create,
        };
        mutation.settle(id, result.is_ok());
        let invalidates = mutation.invalidates();
        self.form.finish(result.is_ok());

        match result {
            Ok(()) => {
                match kind {
                    MutationKind::Edit => self.notifier.warn(PRODUCT_EDITED),
                    _ => self.notifier.success(PRODUCT_ADDED),
                }
                self.invalidate(invalidates);
            }
            Err(err) => self.notify_failure(SAVE_FAILED, &err),
        }
    }

    fn invalidate(&mut self, key: &str) {
        if key == self.query.key() {
            self.refetch();
        }
    }

    fn notify_failure(&mut self, title: &str, err: &ApiError) {
        tracing::warn!(error = %err, "{title}");
        self.notifier.notify(
            Notification::new(NotificationStatus::Error, title).with_description(err.to_string()),
        );
    }
}

impl<N, P> AdminScreen<N, P> {
    pub fn query(&self) -> &ProductQuery {
        &self.query
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    pub fn mutation(&self, kind: MutationKind) -> &Mutation {
        match kind {
            MutationKind::Create => &self.create,
            MutationKind::Edit => &self.edit,
            MutationKind::Delete => &self.delete,
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Number of dispatched requests still waiting for a completion.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn view(&self) -> ScreenView<'_> {
        ScreenView {
            color_mode: self.color_mode,
            products: self.query.data(),
            products_loading: self.query.is_loading(),
            draft: self.form.draft(),
            errors: self.form.errors(),
            submitting: self.create.is_loading() || self.edit.is_loading(),
            confirmation: self
                .gate
                .awaiting()
                .map(|id| (id, &DELETE_CONFIRMATION)),
        }
    }
}
