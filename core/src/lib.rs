//! Client core for the product catalog administration screen.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the request
//! builder sit the screen's hooks: a cached product-list query, create /
//! edit / delete mutations, the form controller, and the delete
//! confirmation gate, all driven by [`AdminScreen`].
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `AdminScreen` queues requests in an outbox and is told about their
//!   completions later, in whatever order the network delivers them.
//! - Notifications and confirmation dialogs are injected capabilities
//!   (`Notifier`, `ConfirmationPrompt`) rather than globals.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod gate;
pub mod http;
pub mod mutation;
pub mod notify;
pub mod query;
pub mod screen;
pub mod types;
pub mod view;

pub use client::ProductClient;
pub use dispatch::{Completion, Dispatch, RequestId};
pub use error::ApiError;
pub use form::{
    Draft, Field, FieldErrors, FormController, FormState, ReadOnlyField, SubmitError, Submission,
};
pub use gate::{Confirmation, ConfirmationGate, ConfirmationPrompt, DELETE_CONFIRMATION};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mutation::{Mutation, MutationKind, MutationStatus};
pub use notify::{Notification, NotificationStatus, Notifier};
pub use query::{ProductQuery, PRODUCTS_QUERY_KEY};
pub use screen::AdminScreen;
pub use types::{Product, ProductId, ProductInput};
pub use view::{ColorMode, ScreenView};
