//! Domain DTOs for the product API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Identifiers are
//! assigned by the backing store and treated as opaque text, whether the wire
//! carries them as JSON numbers or strings.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Opaque product identifier assigned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "WireId")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

impl From<WireId> for ProductId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => Self(n.to_string()),
            WireId::Text(s) => Self(s),
        }
    }
}

/// A persisted catalog item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub description: String,
    pub image: String,
}

/// Request payload for creating or editing a product.
///
/// Edits send the full field set; the identifier travels in the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: u64,
    pub description: String,
    pub image: String,
}

impl From<Product> for ProductInput {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image,
        }
    }
}

/// Body of `GET /products`: either `{ "data": [...] }` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductListBody {
    Envelope { data: Vec<Product> },
    Bare(Vec<Product>),
}

impl ProductListBody {
    pub(crate) fn into_products(self) -> Vec<Product> {
        match self {
            ProductListBody::Envelope { data } | ProductListBody::Bare(data) => data,
        }
    }
}
