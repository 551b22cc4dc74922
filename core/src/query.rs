//! Cached read of the product collection.
//!
//! # Design
//! The query owns the List Snapshot. It is keyed by resource name, refreshed
//! only when someone asks (mount, manual refetch, or a mutation invalidating
//! the key) and replaced wholesale on every successful read. A read that
//! resolves after a newer one has already been applied is discarded.

use std::collections::BTreeSet;

use crate::dispatch::RequestId;
use crate::error::ApiError;
use crate::types::{Product, ProductId};

/// Cache key of the product list.
pub const PRODUCTS_QUERY_KEY: &str = "products";

/// How a settled read affected the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Applied,
    Stale,
    Failed(ApiError),
}

#[derive(Debug)]
pub struct ProductQuery {
    snapshot: Option<Vec<Product>>,
    in_flight: BTreeSet<RequestId>,
    applied: Option<RequestId>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            in_flight: BTreeSet::new(),
            applied: None,
        }
    }

    pub fn key(&self) -> &'static str {
        PRODUCTS_QUERY_KEY
    }

    /// The List Snapshot; `None` until the first successful read.
    pub fn data(&self) -> Option<&[Product]> {
        self.snapshot.as_deref()
    }

    /// True while the first read is outstanding and nothing has been fetched.
    pub fn is_loading(&self) -> bool {
        self.snapshot.is_none() && !self.in_flight.is_empty()
    }

    pub fn is_fetching(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.snapshot.as_ref()?.iter().find(|p| &p.id == id)
    }

    pub(crate) fn begin(&mut self, id: RequestId) {
        self.in_flight.insert(id);
    }

    pub(crate) fn settle(
        &mut self,
        id: RequestId,
        result: Result<Vec<Product>, ApiError>,
    ) -> ReadOutcome {
        self.in_flight.remove(&id);
        match result {
            Err(err) => ReadOutcome::Failed(err),
            Ok(_) if self.applied.is_some_and(|applied| applied > id) => ReadOutcome::Stale,
            Ok(products) => {
                self.snapshot = Some(products);
                self.applied = Some(id);
                ReadOutcome::Applied
            }
        }
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}
