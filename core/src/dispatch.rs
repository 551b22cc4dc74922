//! Outgoing request queue shared by the query and mutation hooks.
//!
//! Every request the screen wants executed is queued as a `Dispatch` tagged
//! with a fresh `RequestId`. The host drains the queue, runs the requests in
//! whatever order it likes, and reports each completion under the same id.

use std::collections::VecDeque;
use std::fmt;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Identifier of one dispatched request. Ids grow monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the host reports back for a dispatched request.
pub type Completion = Result<HttpResponse, ApiError>;

/// A request waiting to be executed by the host.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub id: RequestId,
    pub request: HttpRequest,
}

#[derive(Debug, Default)]
pub(crate) struct Outbox {
    next: u64,
    queue: VecDeque<Dispatch>,
}

impl Outbox {
    pub(crate) fn push(&mut self, request: HttpRequest) -> RequestId {
        self.next += 1;
        let id = RequestId(self.next);
        tracing::debug!(%id, method = %request.method, path = %request.path, "queued request");
        self.queue.push_back(Dispatch { id, request });
        id
    }

    pub(crate) fn drain(&mut self) -> Vec<Dispatch> {
        self.queue.drain(..).collect()
    }
}
