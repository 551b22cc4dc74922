//! Write operations against the product collection.
//!
//! A `Mutation` tracks the dispatches of one kind. It does not guard against
//! concurrent dispatches; that is the form's job.

use std::collections::BTreeSet;
use std::fmt;

use crate::dispatch::RequestId;
use crate::query::PRODUCTS_QUERY_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Edit,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MutationKind::Create => "create",
            MutationKind::Edit => "edit",
            MutationKind::Delete => "delete",
        })
    }
}

/// Status of the most recently settled (or still running) dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub struct Mutation {
    kind: MutationKind,
    invalidates: &'static str,
    in_flight: BTreeSet<RequestId>,
    status: MutationStatus,
}

impl Mutation {
    pub fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            invalidates: PRODUCTS_QUERY_KEY,
            in_flight: BTreeSet::new(),
            status: MutationStatus::Idle,
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Query key to refetch once a dispatch of this kind succeeds.
    pub fn invalidates(&self) -> &'static str {
        self.invalidates
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn status(&self) -> MutationStatus {
        self.status
    }

    pub(crate) fn begin(&mut self, id: RequestId) {
        self.in_flight.insert(id);
        self.status = MutationStatus::Pending;
    }

    pub(crate) fn settle(&mut self, id: RequestId, succeeded: bool) {
        self.in_flight.remove(&id);
        self.status = if !self.in_flight.is_empty() {
            MutationStatus::Pending
        } else if succeeded {
            MutationStatus::Succeeded
        } else {
            MutationStatus::Failed
        };
    }
}
