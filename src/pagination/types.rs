//! Pagination types and traits

use crate::error::Result;
use crate::json::{self, Step};
use crate::query::QueryParams;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parameter key of the first-call sentinel
pub(crate) const CONTINUE_KEY: &str = "continue";

/// Continuation parameters returned by the server
///
/// Opaque to the client: every scalar member of the response's `continue`
/// object is echoed back verbatim on the next call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Continuation {
    params: BTreeMap<String, String>,
}

impl Continuation {
    /// Create an empty continuation
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the continuation from a response body
    ///
    /// Absent or non-object `continue` yields an empty continuation.
    pub fn from_response(body: &Value) -> Self {
        let params = json::lookup_object(body, &[Step::Key(CONTINUE_KEY)])
            .map(|members| {
                members
                    .iter()
                    .filter_map(|(key, value)| {
                        json::scalar_to_string(value).map(|v| (key.clone(), v))
                    })
                    .collect::<BTreeMap<_, _>>()
            })
            .unwrap_or_default();
        Self { params }
    }

    /// Check if there are no further pages
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get a continuation parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Continuation as request parameters
    ///
    /// An empty continuation becomes the `continue=` sentinel so the server
    /// starts a fresh continuation sequence.
    pub fn to_params(&self) -> QueryParams {
        if self.params.is_empty() {
            return QueryParams::new().with(CONTINUE_KEY, "");
        }
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Continuation {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with this continuation
    Continue(Continuation),
    /// No more pages
    Done,
}

impl NextPage {
    /// Classify a freshly extracted continuation
    pub fn from_continuation(continuation: Continuation) -> Self {
        if continuation.is_empty() {
            Self::Done
        } else {
            Self::Continue(continuation)
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Lifecycle of one paginated request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No call made yet
    #[default]
    Start,
    /// At least one page fetched, more expected
    Fetching,
    /// Finished without error
    Done,
    /// Finished with a terminal error
    Failed,
}

impl Phase {
    /// Check if no further calls will be made
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Current phase
    pub phase: Phase,
    /// Continuation for the next call
    pub continuation: Continuation,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Items emitted so far
    pub items_emitted: u64,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for the next call: `base` plus the current continuation
    pub fn params(&self, base: &QueryParams) -> QueryParams {
        base.merged(&self.continuation.to_params())
    }

    /// Record a fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
        self.phase = Phase::Fetching;
    }

    /// Record an emitted item
    pub fn add_item(&mut self) {
        self.items_emitted += 1;
    }

    /// Apply the continuation of the page just processed
    pub fn advance(&mut self, next: NextPage) {
        match next {
            NextPage::Continue(continuation) => self.continuation = continuation,
            NextPage::Done => self.mark_done(),
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.phase = Phase::Done;
    }

    /// Mark pagination as failed
    pub fn mark_failed(&mut self) {
        self.phase = Phase::Failed;
    }
}

/// Per-operation extraction of items from one response batch
pub trait ItemExtractor: Send + Sync + 'static {
    /// Parsed item type
    type Item: Send + 'static;

    /// Short name used in logs and errors (e.g. "images")
    fn name(&self) -> &'static str;

    /// Raw item nodes of one batch, in server order
    fn entries<'a>(&self, body: &'a Value) -> Vec<&'a Value>;

    /// Parse one raw item node
    fn parse(&self, entry: &Value) -> Result<Self::Item>;

    /// Continuation for the next call
    fn next_page(&self, body: &Value) -> NextPage {
        NextPage::from_continuation(Continuation::from_response(body))
    }
}
