//! Redirect resolution
//!
//! Single-entity queries ask the server to follow redirects and report them
//! in `query.redirects`. When a redirect is reported, the whole operation is
//! issued again against the target title. This repeats until the server
//! stops redirecting or the hop limit is reached.

use crate::error::{Error, Result};
use crate::json::{self, Step};
use crate::query::{QueryExecutor, QueryParams};
use crate::types::PageRef;
use serde_json::Value;
use tracing::debug;

/// Outcome of inspecting one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// The subject is canonical
    None,
    /// The subject is an alias of this title
    To(String),
}

/// Inspect `query.redirects` of a response
///
/// Only the first entry is honoured. The destination is read from its `to`
/// member; a bare string entry is accepted as the destination too.
pub fn detect_redirect(body: &Value) -> Redirect {
    let first = [Step::Key("query"), Step::Key("redirects"), Step::Index(0)];
    let target = json::lookup(body, &first).and_then(|entry| match entry {
        Value::String(to) => Some(to.as_str()),
        other => json::lookup_str(other, &[Step::Key("to")]),
    });

    match target {
        Some(to) if !to.is_empty() => Redirect::To(to.to_string()),
        _ => Redirect::None,
    }
}

/// Runs single-entity operations to the canonical page
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    executor: QueryExecutor,
    max_redirects: u32,
}

impl RedirectResolver {
    /// Create a resolver that follows at most `max_redirects` hops
    pub fn new(executor: QueryExecutor, max_redirects: u32) -> Self {
        Self {
            executor,
            max_redirects,
        }
    }

    /// Hop limit
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// Run one single-entity operation
    ///
    /// Each attempt sends `base` plus the current reference's discriminant.
    /// A redirected response is discarded and the operation starts over with
    /// the target title. Otherwise `extract` produces the result.
    pub async fn resolve<T, F>(&self, reference: &PageRef, base: &QueryParams, extract: F) -> Result<T>
    where
        F: Fn(&Value) -> Result<T>,
    {
        let mut current = reference.clone();

        for hop in 0..=self.max_redirects {
            let (key, value) = current.discriminant();
            let params = base.clone().with(key, value);
            let body = self.executor.execute(params).await?;

            match detect_redirect(&body) {
                Redirect::To(target) => {
                    debug!("Redirect {hop}: '{current}' -> '{target}'");
                    current = PageRef::title(target);
                }
                Redirect::None => return extract(&body),
            }
        }

        Err(Error::TooManyRedirects {
            title: reference.to_string(),
            max_redirects: self.max_redirects,
        })
    }
}
