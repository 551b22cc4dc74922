//! Form Controller for the single editable product record.
//!
//! # Design
//! The draft holds every field as raw text while editing; `price` is coerced
//! to an integer only when a submission is built. Whether the draft creates
//! or edits a product is decided solely by its `id` field being empty.
//!
//! Validation runs on submit only. Editing a field never clears an error
//! attached to it; the next submit recomputes the whole error set.
//!
//! The `id` field is read-only to callers: only [`FormController::enter_edit_mode`]
//! fills it. A successful save resets the draft only if it still holds what
//! was submitted, so anything typed while the write was in flight survives.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::error::ApiError;
use crate::types::{Product, ProductId, ProductInput};

/// One of the five editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Name,
    Price,
    Description,
    Image,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Name,
        Field::Price,
        Field::Description,
        Field::Image,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Price => "price",
            Field::Description => "description",
            Field::Image => "image",
        }
    }

    /// Whether callers may type into this field.
    pub fn is_editable(self) -> bool {
        self != Field::Id
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "Product Id",
            Field::Name => "Product Name",
            Field::Price => "Price",
            Field::Description => "Description",
            Field::Image => "Image",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("field `{0}` is read-only")]
pub struct ReadOnlyField(pub Field);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| UnknownField(key.to_string()))
    }
}

/// The in-progress, not-yet-submitted representation of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct Draft {
    id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    name: String,
    #[validate(custom(function = "validate_price"))]
    price: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    description: String,
    #[validate(length(min = 1, message = "image must not be empty"))]
    image: String,
}

impl Draft {
    /// A draft holding `product` verbatim, price rendered as text.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            image: product.image.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Description => &self.description,
            Field::Image => &self.image,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Price => &mut self.price,
            Field::Description => &mut self.description,
            Field::Image => &mut self.image,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.get(field).is_empty())
    }

    /// `Some` when the draft edits a persisted product.
    pub fn product_id(&self) -> Option<ProductId> {
        (!self.id.is_empty()).then(|| ProductId::new(self.id.clone()))
    }

    /// Validate every field and coerce the draft into a request payload.
    pub fn to_input(&self) -> Result<ProductInput, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;
        let price = parse_price(&self.price).map_err(|err| {
            FieldErrors::from_iter([(Field::Price, err.message().to_string())])
        })?;
        Ok(ProductInput {
            name: self.name.clone(),
            price,
            description: self.description.clone(),
            image: self.image.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceError {
    Empty,
    NotANumber,
    Negative,
    TooLarge,
}

impl PriceError {
    fn code(self) -> &'static str {
        match self {
            PriceError::Empty => "required",
            PriceError::NotANumber => "number",
            PriceError::Negative | PriceError::TooLarge => "range",
        }
    }

    fn message(self) -> &'static str {
        match self {
            PriceError::Empty => "price must not be empty",
            PriceError::NotANumber => "price must be a number",
            PriceError::Negative => "price must not be negative",
            PriceError::TooLarge => "price is too large",
        }
    }
}

/// Parse price text as a number and truncate it toward zero.
fn parse_price(text: &str) -> Result<u64, PriceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PriceError::Empty);
    }
    let value: f64 = text.parse().map_err(|_| PriceError::NotANumber)?;
    if !value.is_finite() {
        return Err(PriceError::NotANumber);
    }
    if value < 0.0 {
        return Err(PriceError::Negative);
    }
    // 2^64 is the first value the cast would saturate.
    if value >= u64::MAX as f64 {
        return Err(PriceError::TooLarge);
    }
    Ok(value.trunc() as u64)
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    parse_price(price).map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new(err.code());
        error.message = Some(err.message().into());
        error
    })
}

/// Per-field validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        errors
            .field_errors()
            .into_iter()
            .filter_map(|(key, errors)| {
                let field = key.parse::<Field>().ok()?;
                let message = errors
                    .iter()
                    .find_map(|error| error.message.as_ref())
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                Some((field, message))
            })
            .collect()
    }
}

/// A validated draft ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(ProductInput),
    Edit(ProductId, ProductInput),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    #[error("a submission is already in flight")]
    Busy,

    #[error(transparent)]
    Request(#[from] ApiError),
}

/// Coarse form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Empty,
    Editing,
    Submitting,
}

#[derive(Debug, Default)]
pub struct FormController {
    draft: Draft,
    errors: FieldErrors,
    submitted: Option<Draft>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> FormState {
        if self.submitted.is_some() {
            FormState::Submitting
        } else if self.draft.is_empty() {
            FormState::Empty
        } else {
            FormState::Editing
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitted.is_some()
    }

    /// Overwrite exactly one editable field.
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), ReadOnlyField> {
        if !field.is_editable() {
            return Err(ReadOnlyField(field));
        }
        self.draft.set(field, value.into());
        Ok(())
    }

    /// Replace the whole draft with a list row, entering edit mode.
    pub fn enter_edit_mode(&mut self, product: &Product) {
        self.draft = Draft::from_product(product);
        self.errors = FieldErrors::default();
    }

    /// Validate the draft and decide between create and edit.
    ///
    /// On success the controller is marked as submitting until
    /// [`FormController::finish`] is called.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if self.submitted.is_some() {
            return Err(SubmitError::Busy);
        }
        let input = match self.draft.to_input() {
            Ok(input) => input,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors = FieldErrors::default();
        self.submitted = Some(self.draft.clone());
        Ok(match self.draft.product_id() {
            Some(id) => Submission::Edit(id, input),
            None => Submission::Create(input),
        })
    }

    /// Settle the in-flight submission.
    ///
    /// A success clears the draft unless it was changed after submitting.
    pub fn finish(&mut self, succeeded: bool) {
        let Some(submitted) = self.submitted.take() else {
            return;
        };
        if !succeeded {
            return;
        }
        if self.draft == submitted {
            self.reset();
        } else {
            tracing::debug!("draft changed while saving, keeping it");
        }
    }

    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.errors = FieldErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormController {
        let mut form = FormController::new();
        form.set_field(Field::Name, "Pen").unwrap();
        form.set_field(Field::Price, "1500").unwrap();
        form.set_field(Field::Description, "Blue ink").unwrap();
        form.set_field(Field::Image, "pen.png").unwrap();
        form
    }

    fn product() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Pen".to_string(),
            price: 1500,
            description: "Blue ink".to_string(),
            image: "pen.png".to_string(),
        }
    }

    #[test]
    fn field_keys_parse_back() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>(), Ok(field));
        }
        assert_eq!(
            "colour".parse::<Field>(),
            Err(UnknownField("colour".to_string()))
        );
    }

    #[test]
    fn empty_id_submits_as_create() {
        let mut form = filled();
        let submission = form.submit().unwrap();
        assert_eq!(
            submission,
            Submission::Create(ProductInput {
                name: "Pen".to_string(),
                price: 1500,
                description: "Blue ink".to_string(),
                image: "pen.png".to_string(),
            })
        );
        assert_eq!(form.state(), FormState::Submitting);
    }

    #[test]
    fn present_id_submits_as_edit() {
        let mut form = FormController::new();
        form.enter_edit_mode(&product());
        match form.submit().unwrap() {
            Submission::Edit(id, input) => {
                assert_eq!(id, ProductId::new("1"));
                assert_eq!(input.name, "Pen");
            }
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let mut form = FormController::new();
        let Err(SubmitError::Invalid(errors)) = form.submit() else {
            panic!("empty form must not submit");
        };
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Name, Field::Price, Field::Description, Field::Image]
        );
        assert_eq!(errors.get(Field::Name), Some("name must not be empty"));
        assert_eq!(errors.get(Field::Price), Some("price must not be empty"));
        assert!(!form.is_submitting());
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn missing_field_error_is_attached_to_that_field_only() {
        let mut form = filled();
        form.set_field(Field::Image, "").unwrap();
        let Err(SubmitError::Invalid(errors)) = form.submit() else {
            panic!("missing image must not submit");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Image), Some("image must not be empty"));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut form = FormController::new();
        form.set_field(Field::Name, "Pen").unwrap();
        form.set_field(Field::Price, "abc").unwrap();
        form.set_field(Field::Description, "x").unwrap();
        form.set_field(Field::Image, "y").unwrap();

        let Err(SubmitError::Invalid(errors)) = form.submit() else {
            panic!("non-numeric price must not submit");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Price), Some("price must be a number"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut form = filled();
        form.set_field(Field::Price, "-3").unwrap();
        let Err(SubmitError::Invalid(errors)) = form.submit() else {
            panic!("negative price must not submit");
        };
        assert_eq!(errors.get(Field::Price), Some("price must not be negative"));
    }

    #[test]
    fn price_beyond_u64_is_rejected() {
        for text in ["1e30", "18446744073709551616"] {
            let mut form = filled();
            form.set_field(Field::Price, text).unwrap();
            let Err(SubmitError::Invalid(errors)) = form.submit() else {
                panic!("{text} must not submit");
            };
            assert_eq!(errors.get(Field::Price), Some("price is too large"));
        }
    }

    #[test]
    fn exponent_price_is_expanded() {
        let mut form = filled();
        form.set_field(Field::Price, "1e3").unwrap();
        let Ok(Submission::Create(input)) = form.submit() else {
            panic!("expected create");
        };
        assert_eq!(input.price, 1000);
    }

    #[test]
    fn id_field_is_read_only() {
        let mut form = filled();
        assert_eq!(
            form.set_field(Field::Id, "4"),
            Err(ReadOnlyField(Field::Id))
        );
        assert_eq!(form.draft().get(Field::Id), "");
        assert!(matches!(form.submit(), Ok(Submission::Create(_))));
    }

    #[test]
    fn draft_changed_during_save_survives_success() {
        let mut form = filled();
        form.submit().unwrap();
        form.set_field(Field::Name, "Pencil").unwrap();
        form.finish(true);
        assert!(!form.is_submitting());
        assert_eq!(form.draft().get(Field::Name), "Pencil");
        assert_eq!(form.draft().get(Field::Price), "1500");
    }

    #[test]
    fn fractional_price_is_truncated() {
        let mut form = filled();
        form.set_field(Field::Price, " 12.9 ").unwrap();
        let Ok(Submission::Create(input)) = form.submit() else {
            panic!("expected create");
        };
        assert_eq!(input.price, 12);
    }

    #[test]
    fn field_edit_keeps_error_until_next_submit() {
        let mut form = filled();
        form.set_field(Field::Name, "").unwrap();
        assert!(form.submit().is_err());

        form.set_field(Field::Name, "Pencil").unwrap();
        assert!(form.errors().contains(Field::Name));

        assert!(form.submit().is_ok());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn second_submit_while_in_flight_is_busy() {
        let mut form = filled();
        assert!(form.submit().is_ok());
        assert_eq!(form.submit(), Err(SubmitError::Busy));
    }

    #[test]
    fn success_resets_and_failure_keeps_draft() {
        let mut form = filled();
        form.submit().unwrap();
        form.finish(false);
        assert_eq!(form.draft().get(Field::Name), "Pen");
        assert_eq!(form.state(), FormState::Editing);

        form.submit().unwrap();
        form.finish(true);
        assert_eq!(form.draft(), &Draft::default());
        assert_eq!(form.state(), FormState::Empty);
    }

    #[test]
    fn set_field_touches_only_that_field() {
        let mut form = filled();
        form.set_field(Field::Description, "Red ink").unwrap();
        assert_eq!(form.draft().get(Field::Name), "Pen");
        assert_eq!(form.draft().get(Field::Price), "1500");
        assert_eq!(form.draft().get(Field::Description), "Red ink");
    }

    #[test]
    fn enter_edit_mode_overwrites_everything() {
        let mut form = FormController::new();
        form.set_field(Field::Name, "leftover").unwrap();
        form.set_field(Field::Image, "old.png").unwrap();

        form.enter_edit_mode(&product());
        assert_eq!(form.draft(), &Draft::from_product(&product()));
        assert_eq!(form.draft().get(Field::Id), "1");
        assert_eq!(form.draft().get(Field::Price), "1500");
        assert_eq!(form.draft().get(Field::Image), "pen.png");
    }

    #[test]
    fn enter_edit_mode_is_idempotent_and_round_trips() {
        let mut form = FormController::new();
        form.enter_edit_mode(&product());
        let once = form.draft().clone();
        form.enter_edit_mode(&product());
        assert_eq!(form.draft(), &once);

        let Ok(Submission::Edit(id, input)) = form.submit() else {
            panic!("expected edit");
        };
        assert_eq!(id, product().id);
        assert_eq!(input, ProductInput::from(product()));
    }
}
