use std::fmt;

use crate::paging::has_more;
use crate::{Effect, Repo};

/// Generation number of a remote request; later requests get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parameters of one remote search: 1-based page, page size and language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub page: u32,
    pub page_size: u32,
    /// Empty means no language restriction.
    pub language: String,
}

/// A server-paginated result snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemotePage {
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<Repo>,
    pub total_count: u64,
    pub has_more: bool,
}

impl RemotePage {
    pub fn new(page: u32, page_size: u32, items: Vec<Repo>, total_count: u64) -> Self {
        Self {
            page,
            page_size,
            items,
            total_count,
            has_more: has_more(page, page_size, total_count),
        }
    }

    fn empty(query: &RemoteQuery) -> Self {
        Self::new(query.page, query.page_size, Vec::new(), 0)
    }
}

/// Observable state of the remote source plus its request bookkeeping.
///
/// Only the request recorded in `in_flight` may write results; any other
/// completion is stale and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteState {
    current: RemotePage,
    loading: bool,
    error: Option<String>,
    in_flight: Option<RequestId>,
    last_query: Option<RemoteQuery>,
    next_request: u64,
}

impl RemoteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &RemotePage {
        &self.current
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Reconciles with the wanted parameters.
    ///
    /// Inactive: cancels any outstanding request and clears `loading`,
    /// leaving the last result and error as they are. Active: when the
    /// parameters differ from the last issued ones, cancels the outstanding
    /// request and starts a new generation.
    pub fn sync(&mut self, query: &RemoteQuery, active: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !active {
            if let Some(request) = self.in_flight.take() {
                effects.push(Effect::CancelFetch { request });
            }
            self.loading = false;
            self.last_query = None;
            return effects;
        }

        if self.last_query.as_ref() == Some(query) {
            return effects;
        }

        if let Some(request) = self.in_flight.take() {
            effects.push(Effect::CancelFetch { request });
        }
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.in_flight = Some(request);
        self.last_query = Some(query.clone());
        self.loading = true;
        effects.push(Effect::FetchRemote {
            request,
            query: query.clone(),
        });
        effects
    }

    /// Applies a completion. Returns `false` when the request is no longer live.
    pub fn complete(&mut self, request: RequestId, result: Result<RemotePage, String>) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        match result {
            Ok(page) => {
                self.current = page;
                self.error = None;
            }
            Err(message) => {
                let query = self.last_query.as_ref().map(RemotePage::empty);
                self.current = query.unwrap_or_default();
                self.error = Some(message);
            }
        }
        true
    }
}
