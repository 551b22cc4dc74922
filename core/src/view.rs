//! Text rendering of the admin screen.
//!
//! Rendering is a pure function of borrowed screen state; nothing here
//! mutates or dispatches anything.

use std::fmt;

use rusty_money::{Formatter, Money, Params, Position, iso};
use tabled::{builder::Builder, settings::Style};

use crate::form::{Draft, Field, FieldErrors};
use crate::gate::Confirmation;
use crate::types::{Product, ProductId};

pub const HEADING: &str = "Product Catalog";
pub const SPINNER: &str = "Loading...";
pub const SUBMIT_LABEL: &str = "Submit Product";

/// Light or dark presentation. Persisting the choice is left to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    /// Label of the toggle button, naming the mode it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ColorMode::Light => "Theme Dark",
            ColorMode::Dark => "Theme Light",
        }
    }
}

/// Rupiah in the id-ID layout: `Rp 1.500,00`.
const RUPIAH: Params<'static> = Params {
    digit_separator: '.',
    exponent_separator: ',',
    separator_pattern: &[3, 3, 3, 3, 3, 3],
    positions: &[
        Position::Sign,
        Position::Symbol,
        Position::Space,
        Position::Amount,
    ],
    rounding: Some(2),
    symbol: Some("Rp"),
    code: Some("IDR"),
};

/// Format a stored integer price as Indonesian Rupiah.
pub fn format_price(price: u64) -> String {
    i64::try_from(price).map_or_else(
        |_| price.to_string(),
        |amount| Formatter::money(&Money::from_major(amount, iso::IDR), RUPIAH),
    )
}

/// Render the List Snapshot as a table with per-row actions.
pub fn product_table(products: &[Product]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Id",
        "Action",
        "Action",
        "Name",
        "Price",
        "Description",
        "Image",
    ]);
    for product in products {
        builder.push_record([
            product.id.to_string(),
            format!("Edit {}", product.id),
            format!("Delete {}", product.id),
            product.name.clone(),
            format_price(product.price),
            product.description.clone(),
            product.image.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Everything the screen shows, borrowed from the screen's state.
#[derive(Debug, Clone, Copy)]
pub struct ScreenView<'a> {
    pub color_mode: ColorMode,
    pub products: Option<&'a [Product]>,
    pub products_loading: bool,
    pub draft: &'a Draft,
    pub errors: &'a FieldErrors,
    pub submitting: bool,
    pub confirmation: Option<(&'a ProductId, &'static Confirmation)>,
}

impl fmt::Display for ScreenView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ {} ]", self.color_mode.toggle_label())?;
        writeln!(f)?;
        writeln!(f, "{HEADING}")?;
        writeln!(f, "{}", product_table(self.products.unwrap_or_default()))?;
        if self.products_loading {
            writeln!(f, "{SPINNER}")?;
        }
        writeln!(f)?;

        for field in Field::ALL {
            let value = self.draft.get(field);
            if field == Field::Id {
                writeln!(f, "{}: {value} (read-only)", field.label())?;
            } else {
                writeln!(f, "{}: {value}", field.label())?;
            }
            if let Some(error) = self.errors.get(field) {
                writeln!(f, "  ! {error}")?;
            }
        }

        if self.submitting {
            writeln!(f, "{SPINNER}")?;
        } else {
            writeln!(f, "[ {SUBMIT_LABEL} ]")?;
        }

        if let Some((id, confirmation)) = self.confirmation {
            writeln!(f)?;
            writeln!(
                f,
                "! {} (product {id}) {}  [ {} ] [ {} ]",
                confirmation.title,
                confirmation.text,
                confirmation.confirm_label,
                confirmation.cancel_label
            )?;
        }
        Ok(())
    }
}
